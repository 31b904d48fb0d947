//! GUI module - User interface components

mod app;
mod control_panel;
mod data_viewer;
mod signal_panel;

pub use app::ExplorerApp;
pub use control_panel::{ControlPanel, ControlPanelAction, DroughtSettings};
pub use data_viewer::DataViewer;
pub use signal_panel::SignalPanel;
