// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia renderer crate: text measurement with real fonts and CPU raster output.

mod raster;
mod text;

pub use raster::{RasterImage, SkiaRenderer};
pub use text::SkiaTextMeasurer;
