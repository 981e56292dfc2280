// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; scene graph, formatting and shared data-label utilities.

pub mod color;
pub mod ease;
pub mod error;
pub mod format;
pub mod geometry;
pub mod identity;
pub mod labels;
pub mod scale;
pub mod scene;
pub mod text;
pub mod theme;
pub mod types;

pub use color::Color;
pub use ease::Easing;
pub use error::{ChartError, Result};
pub use format::{format_value, Value, ValueFormatter, ValueFormatterOptions};
pub use geometry::{Point, Rect, Size};
pub use identity::SelectionId;
pub use labels::{Label, LabelConfig, LabelDataPoint, LabelParent};
pub use scale::{BandScale, LinearScale};
pub use scene::{ElementKind, NodeId, SceneGraph, Selector, Transition};
pub use text::{EstimatedTextMeasurer, TextMeasurer, TextProperties};
pub use theme::Theme;
pub use types::{Insets, Viewport};
