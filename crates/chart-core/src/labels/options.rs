// File: crates/chart-core/src/labels/options.rs
// Summary: Per-chart-type label layout presets and label text measurement.

use super::LabelConfig;
use crate::geometry::Size;
use crate::text::{px_from_pt, TextMeasurer, TextProperties};

const SCATTER_STARTING_OFFSET: f64 = 2.0;
const SCATTER_OFFSET_ITERATION_DELTA: f64 = 6.0;
const SCATTER_MAXIMUM_OFFSET: f64 = 14.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CartesianChartType {
    Line,
    Area,
    StackedArea,
    ClusteredColumn,
    StackedColumn,
    ClusteredBar,
    StackedBar,
    HundredPercentStackedColumn,
    HundredPercentStackedBar,
    Waterfall,
    Scatter,
    Combo,
}

/// How far and how labels may be nudged away from their anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataLabelLayoutOptions {
    pub maximum_offset: f64,
    pub starting_offset: f64,
    /// Step between tried offsets; `None` tries only the starting offset.
    pub offset_iteration_delta: Option<f64>,
    pub allow_leader_lines: bool,
    pub attempt_to_move_labels_into_viewport: bool,
}

impl Default for DataLabelLayoutOptions {
    fn default() -> Self {
        let config = LabelConfig::default();
        Self {
            maximum_offset: config.max_label_offset,
            starting_offset: config.starting_label_offset,
            offset_iteration_delta: None,
            allow_leader_lines: false,
            attempt_to_move_labels_into_viewport: true,
        }
    }
}

pub fn get_data_label_layout_options(chart_type: CartesianChartType, config: &LabelConfig) -> DataLabelLayoutOptions {
    match chart_type {
        CartesianChartType::Scatter => DataLabelLayoutOptions {
            maximum_offset: SCATTER_MAXIMUM_OFFSET,
            starting_offset: SCATTER_STARTING_OFFSET,
            offset_iteration_delta: Some(SCATTER_OFFSET_ITERATION_DELTA),
            allow_leader_lines: true,
            attempt_to_move_labels_into_viewport: true,
        },
        _ => DataLabelLayoutOptions {
            maximum_offset: config.max_label_offset,
            starting_offset: config.starting_label_offset,
            offset_iteration_delta: None,
            allow_leader_lines: false,
            attempt_to_move_labels_into_viewport: true,
        },
    }
}

/// Rendered size of `text` at `font_size_pt` in the label font.
pub fn get_text_size(text: &str, font_size_pt: f64, config: &LabelConfig, measurer: &dyn TextMeasurer) -> Size {
    let props = TextProperties {
        text: text.to_string(),
        font_family: config.font_family.clone(),
        font_size: px_from_pt(font_size_pt),
        font_weight: config.font_weight.clone(),
    };
    Size::new(measurer.measure_width(&props), measurer.estimate_height(&props))
}
