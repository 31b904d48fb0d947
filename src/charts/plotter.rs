//! Chart Plotter Module
//! Interactive visualizations using egui_plot: drought charts for the
//! explorer view and the live traces for the Signal Lab.

use egui::Color32;
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::data::{region_name, IndexKind};
use crate::stats::BoxSummary;

/// Color used for primary traces (clean signal, weekly mean line).
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

fn palette_color(position: usize) -> Color32 {
    PALETTE[position % PALETTE.len()]
}

fn xy(t: &[f64], y: &[f64]) -> PlotPoints {
    t.iter().zip(y).map(|(&x, &y)| [x, y]).collect()
}

/// Mean of the chosen index per week for one region: line with markers.
pub fn weekly_mean_chart(ui: &mut egui::Ui, points: &[[f64; 2]], index: IndexKind, region: &str) {
    Plot::new(format!("weekly_mean_{}", index.label()))
        .x_axis_label("Week")
        .y_axis_label(index.label())
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from_iter(points.iter().copied()))
                    .color(PRIMARY_COLOR)
                    .width(2.0)
                    .name(format!("{} weekly mean ({region})", index.label())),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points.iter().copied()))
                    .radius(3.0)
                    .color(PRIMARY_COLOR),
            );
        });
}

/// Distribution of the chosen index per region over the selected window.
/// X-axis: regions, Y-axis: index values.
pub fn region_boxplot(ui: &mut egui::Ui, summaries: &[(i32, BoxSummary)], index: IndexKind) {
    let x_labels: Vec<String> = summaries.iter().map(|(id, _)| region_name(*id)).collect();

    Plot::new(format!("region_box_{}", index.label()))
        .x_axis_label("Region")
        .y_axis_label(index.label())
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as usize;
            if mark.value >= 0.0 && idx < x_labels.len() {
                x_labels[idx].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            let mut means: Vec<[f64; 2]> = Vec::new();

            for (i, (region_id, s)) in summaries.iter().enumerate() {
                let color = palette_color(i);
                let box_elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.whisker_low, s.q1, s.median, s.q3, s.whisker_high),
                )
                .box_width(0.5)
                .fill(color.gamma_multiply(0.3))
                .stroke(egui::Stroke::new(1.5, color));

                plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(region_name(*region_id)));
                means.push([i as f64, s.mean]);
            }

            if means.len() > 1 {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(means.iter().copied()))
                        .color(Color32::GRAY)
                        .width(1.0)
                        .name("Mean"),
                );
            }
        });
}

/// Clean harmonic with the noisy overlay when enabled.
pub fn harmonic_chart(ui: &mut egui::Ui, t: &[f64], clean: &[f64], noisy: Option<&[f64]>) {
    Plot::new("signal_harmonic")
        .height(260.0)
        .x_axis_label("Time, s")
        .y_axis_label("Amplitude")
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if let Some(noisy) = noisy {
                plot_ui.line(
                    Line::new(xy(t, noisy))
                        .color(PALETTE[0])
                        .width(1.0)
                        .name("Noisy"),
                );
            }
            plot_ui.line(
                Line::new(xy(t, clean))
                    .color(PRIMARY_COLOR)
                    .width(2.0)
                    .name("Clean"),
            );
        });
}

/// Low-pass filter output.
pub fn filtered_chart(ui: &mut egui::Ui, t: &[f64], filtered: &[f64]) {
    Plot::new("signal_filtered")
        .height(260.0)
        .x_axis_label("Time, s")
        .y_axis_label("Amplitude")
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(xy(t, filtered))
                    .color(PALETTE[1])
                    .width(2.0)
                    .name("Filtered"),
            );
        });
}
