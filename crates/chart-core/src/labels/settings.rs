// File: crates/chart-core/src/labels/settings.rs
// Summary: User-facing data label settings (show, color, precision, display units, font size).

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::format::display_unit::AUTO_DISPLAY_UNITS;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLabelsSettings {
    pub show: bool,
    pub show_label_per_series: bool,
    /// 0 for automatic units, 1 for none, otherwise the unit magnitude.
    pub display_units: f64,
    /// Exact decimals; `None` derives them from the format string.
    pub precision: Option<u32>,
    pub label_color: Color,
    /// Font size in points.
    pub font_size: f64,
}

impl Default for DataLabelsSettings {
    fn default() -> Self {
        Self {
            show: false,
            show_label_per_series: false,
            display_units: AUTO_DISPLAY_UNITS,
            precision: None,
            label_color: Color::from_rgb(0x77, 0x77, 0x77),
            font_size: 9.0,
        }
    }
}

impl DataLabelsSettings {
    pub fn is_auto_display_units(&self) -> bool {
        self.display_units == AUTO_DISPLAY_UNITS
    }
}
