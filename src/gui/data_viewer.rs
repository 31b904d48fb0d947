//! Data Viewer Widget
//! Central panel of the Drought Explorer: filtered table, weekly mean chart
//! and per-region boxplot comparison. Query results are cached per filter
//! state so redraws stay cheap.

use egui::{RichText, ScrollArea};
use polars::prelude::*;

use crate::charts;
use crate::data::{self, region_name, IndexKind, QueryParams};
use crate::stats::BoxSummary;

/// Rows shown in the table tab before truncation.
const TABLE_ROW_CAP: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewerTab {
    Table,
    WeeklyMean,
    Comparison,
}

/// Cached query results for the current filter state.
pub struct DataViewer {
    tab: ViewerTab,
    cache_key: Option<QueryParams>,
    total_rows: usize,
    rows: Vec<(i32, i32, f64)>,
    weekly: Vec<[f64; 2]>,
    boxes: Vec<(i32, BoxSummary)>,
}

impl Default for DataViewer {
    fn default() -> Self {
        Self {
            tab: ViewerTab::Table,
            cache_key: None,
            total_rows: 0,
            rows: Vec::new(),
            weekly: Vec::new(),
            boxes: Vec::new(),
        }
    }
}

impl DataViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a recompute on the next frame (after a dataset swap).
    pub fn invalidate(&mut self) {
        self.cache_key = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: Option<&DataFrame>, params: QueryParams) {
        let Some(table) = table else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No dataset loaded. Open a VHI folder to begin.").size(16.0),
                );
            });
            return;
        };

        if self.cache_key != Some(params) {
            self.refresh(table, params);
        }

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, ViewerTab::Table, "Table");
            ui.selectable_value(&mut self.tab, ViewerTab::WeeklyMean, "Weekly mean");
            ui.selectable_value(&mut self.tab, ViewerTab::Comparison, "Region comparison");
        });
        ui.separator();

        match self.tab {
            ViewerTab::Table => self.show_table(ui, params),
            ViewerTab::WeeklyMean => {
                if self.weekly.is_empty() {
                    ui.label("No rows match the current filters.");
                } else {
                    charts::weekly_mean_chart(
                        ui,
                        &self.weekly,
                        params.index,
                        &region_name(params.region_id),
                    );
                }
            }
            ViewerTab::Comparison => {
                if self.boxes.is_empty() {
                    ui.label("No rows match the current filters.");
                } else {
                    charts::region_boxplot(ui, &self.boxes, params.index);
                }
            }
        }
    }

    fn refresh(&mut self, table: &DataFrame, params: QueryParams) {
        self.total_rows = 0;
        self.rows.clear();
        if let Ok(filtered) = data::filter_table(table, &params) {
            self.total_rows = filtered.height();
            self.rows = extract_rows(&filtered, params.index, TABLE_ROW_CAP).unwrap_or_default();
        }

        self.weekly = data::weekly_mean(table, &params).unwrap_or_default();

        self.boxes =
            data::region_distributions(table, params.index, params.week_range, params.year_range)
                .into_iter()
                .filter_map(|(id, values)| BoxSummary::from_values(&values).map(|s| (id, s)))
                .collect();

        self.cache_key = Some(params);
    }

    fn show_table(&self, ui: &mut egui::Ui, params: QueryParams) {
        if self.rows.is_empty() {
            ui.label("No rows match the current filters.");
            return;
        }

        ui.label(
            RichText::new(format!(
                "{} rows, region: {}",
                self.total_rows,
                region_name(params.region_id)
            ))
            .size(11.0),
        );
        if self.total_rows > self.rows.len() {
            ui.label(
                RichText::new(format!("Showing the first {} rows.", self.rows.len())).size(11.0),
            );
        }
        ui.add_space(5.0);

        ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("filtered_table")
                .striped(true)
                .min_col_width(70.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Year").strong().size(12.0));
                    ui.label(RichText::new("Week").strong().size(12.0));
                    ui.label(RichText::new(params.index.label()).strong().size(12.0));
                    ui.end_row();

                    for (year, week, value) in &self.rows {
                        ui.label(year.to_string());
                        ui.label(week.to_string());
                        ui.label(format!("{value:.2}"));
                        ui.end_row();
                    }
                });
        });
    }
}

fn extract_rows(
    df: &DataFrame,
    index: IndexKind,
    cap: usize,
) -> PolarsResult<Vec<(i32, i32, f64)>> {
    let years = df.column("year")?.i32()?;
    let weeks = df.column("week")?.i32()?;
    let values = df.column(index.column())?.f64()?;

    Ok(years
        .into_iter()
        .zip(weeks)
        .zip(values)
        .take(cap)
        .filter_map(|((year, week), value)| Some((year?, week?, value?)))
        .collect())
}
