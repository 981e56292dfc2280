// File: crates/chart-core/src/labels/mod.rs
// Summary: Shared data-label utilities: view models, rendering, formatting, dedup and layout.
// Notes:
// - Labels are rebuilt on every render pass; nothing here keeps state between
//   passes except the scene graph itself and `ColumnFormatterCache`.

mod config;
mod dedup;
mod formatting;
mod layout;
mod options;
mod render;
mod settings;

pub use config::LabelConfig;
pub use dedup::remove_duplicates;
pub use formatting::{
    get_display_unit_value_from_axis_formatter, get_label_formatted_text, label_precision,
    ColumnFormatterCache,
};
pub use layout::DataLabelLayout;
pub use options::{get_data_label_layout_options, get_text_size, CartesianChartType, DataLabelLayoutOptions};
pub use render::{
    animate_default_labels, draw_default_labels, draw_label_background, draw_label_leader_lines,
    label_key, DrawLabelsOptions,
};
pub use settings::DataLabelsSettings;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::identity::SelectionId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// One rendered text element.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub bounding_box: Rect,
    pub text: Option<String>,
    pub second_row_text: Option<String>,
    pub fill: Color,
    /// Points; `None` uses the configured default.
    pub font_size: Option<f64>,
    pub is_visible: bool,
    pub has_background: bool,
    pub text_anchor: TextAnchor,
    pub tooltip: Option<String>,
    pub leader_line_points: Option<Vec<Point>>,
    pub key: Option<String>,
    pub identity: Option<SelectionId>,
}

impl Label {
    pub fn new(text: impl Into<String>, bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            text: Some(text.into()),
            second_row_text: None,
            fill: Color::from_rgb(0x77, 0x77, 0x77),
            font_size: None,
            is_visible: true,
            has_background: false,
            text_anchor: TextAnchor::Middle,
            tooltip: None,
            leader_line_points: None,
            key: None,
            identity: None,
        }
    }

    /// A label with no primary text (e.g. only a second row).
    pub fn untitled(bounding_box: Rect) -> Self {
        Self { text: None, ..Self::new("", bounding_box) }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
    pub fn with_identity(mut self, identity: SelectionId) -> Self {
        self.identity = Some(identity);
        self
    }
    pub fn with_second_row(mut self, text: impl Into<String>) -> Self {
        self.second_row_text = Some(text.into());
        self
    }
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
    pub fn with_font_size(mut self, pt: f64) -> Self {
        self.font_size = Some(pt);
        self
    }
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.text_anchor = anchor;
        self
    }
    pub fn with_background(mut self, on: bool) -> Self {
        self.has_background = on;
        self
    }
    pub fn with_leader_line(mut self, points: Vec<Point>) -> Self {
        self.leader_line_points = Some(points);
        self
    }
    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

/// Where a label may sit relative to a rectangle parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectLabelPosition {
    InsideCenter,
    InsideEnd,
    InsideBase,
    OutsideEnd,
    OutsideBase,
}

/// Where a label may sit relative to a point parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLabelPosition {
    Above,
    Below,
    Left,
    Right,
    Center,
}

/// Growth direction of a rectangle parent; decides which edge is the "end".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RectOrientation {
    #[default]
    VerticalBottomBased,
    VerticalTopBased,
    HorizontalLeftBased,
    HorizontalRightBased,
}

/// Anchor shape of a candidate label.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelParent {
    Rectangle {
        rect: Rect,
        orientation: RectOrientation,
        valid_positions: Vec<RectLabelPosition>,
    },
    Point {
        point: Point,
        radius: f64,
        valid_positions: Vec<PointLabelPosition>,
    },
}

impl LabelParent {
    pub fn rectangle(rect: Rect) -> Self {
        LabelParent::Rectangle {
            rect,
            orientation: RectOrientation::default(),
            valid_positions: vec![RectLabelPosition::OutsideEnd, RectLabelPosition::InsideEnd],
        }
    }

    pub fn point(point: Point) -> Self {
        LabelParent::Point {
            point,
            radius: 0.0,
            valid_positions: vec![
                PointLabelPosition::Above,
                PointLabelPosition::Below,
                PointLabelPosition::Right,
                PointLabelPosition::Left,
            ],
        }
    }

    /// Geometric equality with another anchor of the same kind. Anchors of
    /// different kinds are never equal.
    pub fn same_shape(&self, other: &LabelParent) -> bool {
        match (self, other) {
            (LabelParent::Rectangle { rect: a, .. }, LabelParent::Rectangle { rect: b, .. }) => a == b,
            (LabelParent::Point { point: a, .. }, LabelParent::Point { point: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Pre-layout candidate label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDataPoint {
    pub text: String,
    pub text_size: Size,
    pub parent: LabelParent,
    pub inside_fill: Color,
    pub outside_fill: Color,
    pub is_preferred: bool,
    pub font_size: Option<f64>,
    pub second_row_text: Option<String>,
    pub tooltip: Option<String>,
    pub identity: Option<SelectionId>,
    pub key: Option<String>,
    pub has_background: bool,
}

impl LabelDataPoint {
    pub fn new(text: impl Into<String>, text_size: Size, parent: LabelParent) -> Self {
        Self {
            text: text.into(),
            text_size,
            parent,
            inside_fill: Color::WHITE,
            outside_fill: Color::from_rgb(0x77, 0x77, 0x77),
            is_preferred: false,
            font_size: None,
            second_row_text: None,
            tooltip: None,
            identity: None,
            key: None,
            has_background: false,
        }
    }

    pub fn with_identity(mut self, identity: SelectionId) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn preferred(mut self) -> Self {
        self.is_preferred = true;
        self
    }
}
