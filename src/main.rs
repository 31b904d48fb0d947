//! VHI Explorer - Drought-index data browser and interactive signal lab.

mod charts;
mod data;
mod gui;
mod signal;
mod stats;

use std::path::PathBuf;

use eframe::egui;
use gui::ExplorerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Optional VHI data directory as the first CLI argument.
    let data_dir = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("VHI Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "VHI Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, data_dir)))),
    )
}
