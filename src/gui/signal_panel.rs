//! Signal Lab Widget
//! Sliders for the harmonic, noise and filter parameters plus the two live
//! plots. The noise sequence is cached and only redrawn when the noise
//! parameters move or the user asks for a fresh realization.

use egui::{Color32, ComboBox, RichText};

use crate::charts;
use crate::signal::{self, FilterKind, SignalParams};

pub struct SignalPanel {
    pub params: SignalParams,
    t: Vec<f64>,
    noise: Vec<f64>,
    /// Parameters the cached noise sequence was drawn with.
    noise_params: SignalParams,
}

impl Default for SignalPanel {
    fn default() -> Self {
        let params = SignalParams::default();
        let t = signal::time_axis(signal::DURATION_SECS, signal::SAMPLE_RATE_HZ);
        let noise = signal::gaussian_noise(t.len(), params.noise_mean, params.noise_variance);
        Self {
            noise_params: params,
            params,
            t,
            noise,
        }
    }
}

impl SignalPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install restored parameters and draw a matching noise sequence.
    pub fn set_params(&mut self, params: SignalParams) {
        self.params = params;
        self.regenerate_noise();
    }

    fn regenerate_noise(&mut self) {
        self.noise = signal::gaussian_noise(
            self.t.len(),
            self.params.noise_mean,
            self.params.noise_variance,
        );
        self.noise_params = self.params;
    }

    /// Draw the parameter controls (left panel).
    pub fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("〰 Signal Lab")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        let p = &mut self.params;

        // ===== Harmonic =====
        ui.label(RichText::new("Harmonic").size(14.0).strong());
        ui.add(egui::Slider::new(&mut p.amplitude, 0.1..=10.0).text("Amplitude"));
        ui.add(egui::Slider::new(&mut p.frequency, 0.1..=10.0).text("Frequency, Hz"));
        ui.add(egui::Slider::new(&mut p.phase, 0.0..=std::f64::consts::TAU).text("Phase, rad"));

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Noise =====
        ui.label(RichText::new("Noise").size(14.0).strong());
        ui.add(egui::Slider::new(&mut p.noise_mean, -1.0..=1.0).text("Mean"));
        ui.add(egui::Slider::new(&mut p.noise_variance, 0.0..=1.0).text("Variance"));
        ui.checkbox(&mut p.show_noise, "Show noise");
        if ui.button("Regenerate noise").clicked() {
            self.regenerate_noise();
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Filter =====
        let p = &mut self.params;
        ui.label(RichText::new("Low-pass filter").size(14.0).strong());
        ui.horizontal(|ui| {
            ui.label("Kind:");
            ComboBox::from_id_salt("filter_kind")
                .width(150.0)
                .selected_text(p.filter_kind.label())
                .show_ui(ui, |ui| {
                    for kind in FilterKind::ALL {
                        ui.selectable_value(&mut p.filter_kind, kind, kind.label());
                    }
                });
        });

        match p.filter_kind {
            FilterKind::Butterworth => {
                ui.add(egui::Slider::new(&mut p.cutoff_hz, 0.1..=5.0).text("Cutoff, Hz"));
                ui.add(egui::Slider::new(&mut p.filter_order, 1..=10).text("Order"));
            }
            FilterKind::MovingAverage => {
                ui.add(egui::Slider::new(&mut p.ma_window, 1..=50).text("Window"));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            if ui
                .add(egui::Button::new("Reset").min_size(egui::vec2(150.0, 28.0)))
                .clicked()
            {
                self.params = SignalParams::default();
                self.regenerate_noise();
            }
        });
    }

    /// Draw the two plots (central panel).
    pub fn show_plots(&mut self, ui: &mut egui::Ui) {
        if self.params.noise_differs(&self.noise_params) {
            self.regenerate_noise();
        }

        let traces = signal::render(&self.t, &self.params, &self.noise);

        ui.label(RichText::new("Harmonic with noise").size(14.0).strong());
        charts::harmonic_chart(
            ui,
            &self.t,
            &traces.clean,
            self.params.show_noise.then_some(traces.noisy.as_slice()),
        );

        ui.add_space(10.0);

        ui.label(RichText::new("Low-pass filter output").size(14.0).strong());
        charts::filtered_chart(ui, &self.t, &traces.filtered);
    }
}
