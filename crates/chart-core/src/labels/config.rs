// File: crates/chart-core/src/labels/config.rs
// Summary: Label style/layout constants and CSS classes, passed explicitly to every label call.

use crate::color::Color;

/// Everything the label utilities used to read from module-level constants.
/// Construct once per visual (usually via `Default`) and pass by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelConfig {
    pub default_font_size_pt: f64,
    pub font_family: String,
    pub font_weight: String,
    pub map_polyline_opacity: f64,
    pub label_density_buffer_factor: f64,
    pub label_density_padding: f64,
    pub label_density_min: f64,
    pub label_density_max: f64,
    pub starting_label_offset: f64,
    pub max_label_offset: f64,
    pub max_label_width: f64,
    pub hundred_percent_format: String,
    pub default_label_color: Color,
    pub default_inside_label_color: Color,
    pub horizontal_background_padding: f64,
    pub vertical_background_padding: f64,
    pub background_rounding: f64,
    pub leader_line_stroke_width: f64,
    /// Vertical nudge for categorical text; numeric labels omit it.
    pub baseline_nudge: String,
    pub graphics_context_class: String,
    pub background_graphics_context_class: String,
    pub label_class: String,
    pub second_line_class: String,
    pub leader_lines_class: String,
    pub leader_line_class: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            default_font_size_pt: 9.0,
            font_family: "wf_standard-font".to_string(),
            font_weight: "normal".to_string(),
            map_polyline_opacity: 0.5,
            label_density_buffer_factor: 3.0,
            label_density_padding: 6.0,
            label_density_min: 0.0,
            label_density_max: 6.0,
            starting_label_offset: 8.0,
            max_label_offset: 8.0,
            max_label_width: 50.0,
            hundred_percent_format: "0.00 %;-0.00 %;0.00 %".to_string(),
            default_label_color: Color::from_rgb(0x77, 0x77, 0x77),
            default_inside_label_color: Color::WHITE,
            horizontal_background_padding: 4.0,
            vertical_background_padding: 2.0,
            background_rounding: 4.0,
            leader_line_stroke_width: 1.0,
            baseline_nudge: "-0.15em".to_string(),
            graphics_context_class: "labelGraphicsContext".to_string(),
            background_graphics_context_class: "labelBackgroundGraphicsContext".to_string(),
            label_class: "label".to_string(),
            second_line_class: "label-second-line".to_string(),
            leader_lines_class: "leader-lines".to_string(),
            leader_line_class: "line-label".to_string(),
        }
    }
}

impl LabelConfig {
    /// Same constants, different class for the primary label elements.
    pub fn with_label_class(mut self, class: &str) -> Self {
        self.label_class = class.to_string();
        self
    }
}
