//! VHI Explorer Main Application
//! Top-level window: view switching and background dataset loading.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::Context as _;
use egui::{Color32, RichText};
use polars::prelude::{ChunkAgg, DataFrame};

use crate::data::{self, DatasetLoad};
use crate::gui::{ControlPanel, ControlPanelAction, DataViewer, SignalPanel};

/// Dataset loading result from the background thread.
enum LoadResult {
    Progress(String),
    Complete(DatasetLoad),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Drought,
    SignalLab,
}

/// Main application window.
pub struct ExplorerApp {
    view: View,
    table: Option<Arc<DataFrame>>,
    control_panel: ControlPanel,
    data_viewer: DataViewer,
    signal_panel: SignalPanel,
    status: String,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, data_dir: Option<PathBuf>) -> Self {
        let mut app = Self {
            view: View::Drought,
            table: None,
            control_panel: ControlPanel::new(),
            data_viewer: DataViewer::new(),
            signal_panel: SignalPanel::new(),
            status: "No dataset loaded".to_string(),
            load_rx: None,
            is_loading: false,
        };

        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value(storage, "drought_settings") {
                app.control_panel.settings = settings;
            }
            if let Some(params) = eframe::get_value(storage, "signal_params") {
                app.signal_panel.set_params(params);
            }
        }

        if let Some(dir) = data_dir {
            app.start_load(dir);
        }

        app
    }

    /// Ask for a VHI directory and load it in the background.
    fn handle_browse_folder(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.start_load(dir);
        }
    }

    fn start_load(&mut self, dir: PathBuf) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.status = format!("Loading {}...", dir.display());

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Scanning {}...",
                dir.display()
            )));
            match load_dataset_task(&dir) {
                Ok(load) => {
                    let _ = tx.send(LoadResult::Complete(load));
                }
                Err(err) => {
                    let _ = tx.send(LoadResult::Error(format!("{err:#}")));
                }
            }
        });
    }

    /// Check for dataset loading results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.status = status;
                    }
                    LoadResult::Complete(load) => {
                        self.status = format!(
                            "Loaded {} rows from {} files ({} skipped)",
                            load.table.height(),
                            load.files_loaded,
                            load.files_skipped
                        );
                        if let Some((lo, hi)) = year_bounds(&load.table) {
                            self.control_panel.set_year_bounds(lo, hi);
                        }
                        // New snapshot replaces the old one wholesale.
                        self.table = Some(Arc::new(load.table));
                        self.data_viewer.invalidate();
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.status = format!("Error: {error}");
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn show_drought_view(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("drought_controls")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    // Filter changes need no plumbing here: the viewer cache
                    // keys off the query itself.
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseFolder => self.handle_browse_folder(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let params = self.control_panel.settings.to_query();
            self.data_viewer.show(ui, self.table.as_deref(), params);
        });
    }

    fn show_signal_view(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("signal_controls")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.signal_panel.show_controls(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.signal_panel.show_plots(ui);
        });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.view, View::Drought, "Drought Explorer");
                ui.selectable_value(&mut self.view, View::SignalLab, "Signal Lab");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let status_color = if self.status.starts_with("Error") {
                        Color32::from_rgb(220, 53, 69)
                    } else if self.status.starts_with("Loaded") {
                        Color32::from_rgb(40, 167, 69)
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(&self.status).size(11.0).color(status_color));
                });
            });
        });

        match self.view {
            View::Drought => self.show_drought_view(ctx),
            View::SignalLab => self.show_signal_view(ctx),
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, "drought_settings", &self.control_panel.settings);
        eframe::set_value(storage, "signal_params", &self.signal_panel.params);
    }
}

fn load_dataset_task(dir: &Path) -> anyhow::Result<DatasetLoad> {
    data::load_directory(dir).with_context(|| format!("loading VHI directory {}", dir.display()))
}

fn year_bounds(df: &DataFrame) -> Option<(i32, i32)> {
    let years = df.column("year").ok()?.i32().ok()?;
    Some((years.min()?, years.max()?))
}
