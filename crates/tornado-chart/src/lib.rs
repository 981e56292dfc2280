// File: crates/tornado-chart/src/lib.rs
// Summary: Tornado chart visual: paired horizontal bar series per category, drawn into a scene graph.

pub mod capabilities;
pub mod converter;
pub mod data_view;
pub mod error;
pub mod settings;
pub mod visual;

pub use capabilities::{tornado_capabilities, VisualCapabilities};
pub use converter::{convert, TornadoCategory, TornadoChartDataView, TornadoChartPoint, TornadoChartSeries};
pub use data_view::{DataView, DataViewMetadataColumn, DataViewObjects, PrimitiveValue, ValueType};
pub use error::TornadoError;
pub use settings::TornadoChartSettings;
pub use visual::{RenderOptions, TornadoChart};
