//! Drought Control Panel Widget
//! Left side panel with the dataset filters for the Drought Explorer view.

use egui::{Color32, ComboBox, RichText};
use serde::{Deserialize, Serialize};

use crate::data::{region_name, IndexKind, QueryParams, SortOrder, REGIONS};

/// Persistable filter state, mirroring the on-screen controls one to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroughtSettings {
    pub index: IndexKind,
    pub region_id: i32,
    pub week_range: (i32, i32),
    pub year_range: (i32, i32),
    pub sort_asc: bool,
    pub sort_desc: bool,
}

impl Default for DroughtSettings {
    fn default() -> Self {
        Self {
            index: IndexKind::Vhi,
            region_id: REGIONS[0].0,
            week_range: (1, 52),
            year_range: (2000, 2021),
            sort_asc: false,
            sort_desc: false,
        }
    }
}

impl DroughtSettings {
    /// Query for the current control state. Both sort boxes checked is the
    /// ambiguous case: a warning is shown and neither ordering is applied.
    pub fn to_query(&self) -> QueryParams {
        QueryParams {
            region_id: self.region_id,
            week_range: self.week_range,
            year_range: self.year_range,
            index: self.index,
            sort: SortOrder::resolve(self.sort_asc, self.sort_desc)
                .unwrap_or(SortOrder::Unsorted),
        }
    }

    pub fn sort_conflict(&self) -> bool {
        SortOrder::resolve(self.sort_asc, self.sort_desc).is_err()
    }
}

/// Left side control panel with index/region/range filters.
pub struct ControlPanel {
    pub settings: DroughtSettings,
    /// Year slider bounds, widened to whatever the loaded data covers.
    year_bounds: (i32, i32),
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: DroughtSettings::default(),
            year_bounds: (2000, 2021),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the year sliders to the loaded data and clamp the selection.
    pub fn set_year_bounds(&mut self, min_year: i32, max_year: i32) {
        self.year_bounds = (min_year, max_year);
        let (lo, hi) = &mut self.settings.year_range;
        *lo = (*lo).clamp(min_year, max_year);
        *hi = (*hi).clamp(min_year, max_year);
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌾 Drought Explorer")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);
        if ui.button("📂 Open VHI folder").clicked() {
            action = ControlPanelAction::BrowseFolder;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 60.0;
        let combo_width = 160.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Index:"));
            ComboBox::from_id_salt("index_kind")
                .width(combo_width)
                .selected_text(self.settings.index.label())
                .show_ui(ui, |ui| {
                    for kind in IndexKind::ALL {
                        ui.selectable_value(&mut self.settings.index, kind, kind.label());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Region:"));
            ComboBox::from_id_salt("region_id")
                .width(combo_width)
                .selected_text(region_name(self.settings.region_id))
                .show_ui(ui, |ui| {
                    for (id, name) in REGIONS {
                        ui.selectable_value(&mut self.settings.region_id, id, name);
                    }
                });
        });

        ui.add_space(10.0);

        ui.label("Week interval:");
        ui.add(egui::Slider::new(&mut self.settings.week_range.0, 1..=52).text("from"));
        ui.add(egui::Slider::new(&mut self.settings.week_range.1, 1..=52).text("to"));
        if self.settings.week_range.1 < self.settings.week_range.0 {
            self.settings.week_range.1 = self.settings.week_range.0;
        }

        ui.add_space(5.0);

        let (y_min, y_max) = self.year_bounds;
        ui.label("Year interval:");
        ui.add(egui::Slider::new(&mut self.settings.year_range.0, y_min..=y_max).text("from"));
        ui.add(egui::Slider::new(&mut self.settings.year_range.1, y_min..=y_max).text("to"));
        if self.settings.year_range.1 < self.settings.year_range.0 {
            self.settings.year_range.1 = self.settings.year_range.0;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Sorting =====
        ui.label(RichText::new("↕ Sorting").size(14.0).strong());
        ui.add_space(5.0);
        ui.checkbox(&mut self.settings.sort_asc, "Sort ascending");
        ui.checkbox(&mut self.settings.sort_desc, "Sort descending");

        if self.settings.sort_conflict() {
            ui.add_space(3.0);
            ui.label(
                RichText::new("⚠ Pick only one sort direction; none applied.")
                    .size(11.0)
                    .color(Color32::from_rgb(255, 193, 7)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            if ui
                .add(egui::Button::new("Reset filters").min_size(egui::vec2(150.0, 28.0)))
                .clicked()
            {
                self.settings = DroughtSettings::default();
                let (y_min, y_max) = self.year_bounds;
                self.set_year_bounds(y_min, y_max);
            }
        });

        action
    }
}

/// Actions triggered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    BrowseFolder,
}
