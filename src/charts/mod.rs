//! Charts module - egui_plot drawing

mod plotter;

pub use plotter::{filtered_chart, harmonic_chart, region_boxplot, weekly_mean_chart};
