// File: crates/tornado-chart/src/settings.rs
// Summary: Formatting-pane settings of the tornado chart, parsed from data view objects.

use chart_core::labels::DataLabelsSettings;
use chart_core::theme::Theme;
use chart_core::Color;
use serde::{Deserialize, Serialize};

use crate::data_view::DataViewObjects;

/// Labels on tornado bars default to millions with two decimals.
pub const DEFAULT_LABEL_DISPLAY_UNITS: f64 = 1e6;
pub const DEFAULT_LABEL_PRECISION: u32 = 2;
/// Larger `labelPrecision` values are clamped to this.
pub const MAX_LABEL_PRECISION: u32 = 15;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryAxisSettings {
    pub show: bool,
    pub fill: Color,
    /// Points.
    pub font_size: f64,
}

impl Default for CategoryAxisSettings {
    fn default() -> Self {
        Self { show: true, fill: Color::from_rgb(0x66, 0x66, 0x66), font_size: 9.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendSettings {
    pub show: bool,
    pub position: LegendPosition,
    pub show_title: bool,
    pub title_text: Option<String>,
}

impl Default for LegendSettings {
    fn default() -> Self {
        Self { show: false, position: LegendPosition::Top, show_title: false, title_text: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TornadoChartSettings {
    pub labels: DataLabelsSettings,
    /// Text color for labels drawn inside a bar.
    pub inside_label_color: Color,
    pub category_axis: CategoryAxisSettings,
    pub legend: LegendSettings,
}

impl Default for TornadoChartSettings {
    fn default() -> Self {
        Self {
            labels: DataLabelsSettings {
                display_units: DEFAULT_LABEL_DISPLAY_UNITS,
                precision: Some(DEFAULT_LABEL_PRECISION),
                ..Default::default()
            },
            inside_label_color: Color::WHITE,
            category_axis: CategoryAxisSettings::default(),
            legend: LegendSettings::default(),
        }
    }
}

impl TornadoChartSettings {
    /// Defaults colored by `theme`.
    pub fn themed(theme: &Theme) -> Self {
        let mut s = Self::default();
        s.labels.label_color = theme.label_outside;
        s.inside_label_color = theme.label_inside;
        s.category_axis.fill = theme.axis_label;
        s
    }

    /// Apply whatever the objects set; missing or malformed properties keep their defaults.
    pub fn parse(objects: Option<&DataViewObjects>, theme: &Theme) -> Self {
        let mut s = Self::themed(theme);
        let Some(o) = objects else { return s };

        if let Some(v) = o.get_bool("labels", "show") {
            s.labels.show = v;
        }
        if let Some(c) = o.get_color("labels", "labelColor") {
            s.labels.label_color = c;
        }
        if let Some(v) = o.get_f64("labels", "labelDisplayUnits") {
            s.labels.display_units = v;
        }
        if let Some(v) = o.get_f64("labels", "labelPrecision") {
            s.labels.precision = (v >= 0.0).then_some((v as u32).min(MAX_LABEL_PRECISION));
        }
        if let Some(v) = o.get_f64("labels", "fontSize").filter(|v| *v > 0.0) {
            s.labels.font_size = v;
        }
        if let Some(c) = o.get_color("labels", "insideFill") {
            s.inside_label_color = c;
        }

        if let Some(v) = o.get_bool("categoryAxis", "show") {
            s.category_axis.show = v;
        }
        if let Some(c) = o.get_color("categoryAxis", "fill") {
            s.category_axis.fill = c;
        }
        if let Some(v) = o.get_f64("categoryAxis", "fontSize").filter(|v| *v > 0.0) {
            s.category_axis.font_size = v;
        }

        if let Some(v) = o.get_bool("legend", "show") {
            s.legend.show = v;
        }
        if let Some(v) = o.get_str("legend", "position") {
            s.legend.position = if v.eq_ignore_ascii_case("bottom") { LegendPosition::Bottom } else { LegendPosition::Top };
        }
        if let Some(v) = o.get_bool("legend", "showTitle") {
            s.legend.show_title = v;
        }
        if let Some(v) = o.get_str("legend", "titleText") {
            s.legend.title_text = Some(v.to_string());
        }
        s
    }
}
