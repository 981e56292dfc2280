// File: crates/chart-render-skia/src/raster.rs
// Summary: Headless rasterization of a scene graph using Skia CPU raster surfaces.
// Notes:
// - Understands the subset of SVG the visuals emit: rect, text, line, polyline,
//   groups with `translate(...)` transforms, fill/stroke/opacity styles.
// - `title` elements are tooltips and never paint.

use anyhow::{anyhow, Context, Result};
use skia_safe as skia;
use tracing::debug;

use chart_core::scene::{ElementKind, NodeId, SceneGraph};
use chart_core::Color;

use crate::text::SkiaTextMeasurer;

/// Tightly packed RGBA8 pixels.
pub struct RasterImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
}

pub struct SkiaRenderer {
    text: SkiaTextMeasurer,
    background: Color,
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { text: SkiaTextMeasurer::new(), background: Color::WHITE }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    fn draw_surface(&self, scene: &SceneGraph, width: u32, height: u32) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((width as i32, height as i32))
            .ok_or_else(|| anyhow!("failed to create raster surface {width}x{height}"))?;
        let canvas = surface.canvas();
        canvas.clear(to_skia(self.background, 1.0));
        self.draw_node(canvas, scene, scene.root(), 1.0);
        debug!(width, height, nodes = scene.len(), "rasterized scene");
        Ok(surface)
    }

    /// Render `scene` into PNG bytes.
    pub fn render_png(&self, scene: &SceneGraph, width: u32, height: u32) -> Result<Vec<u8>> {
        let mut surface = self.draw_surface(scene, width, height)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render `scene` to a PNG file, creating parent directories as needed.
    pub fn render_png_to_file(
        &self,
        scene: &SceneGraph,
        width: u32,
        height: u32,
        path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_png(scene, width, height)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Render `scene` into an unpremultiplied RGBA8 buffer.
    pub fn render_rgba8(&self, scene: &SceneGraph, width: u32, height: u32) -> Result<RasterImage> {
        let mut surface = self.draw_surface(scene, width, height)?;
        let info = skia::ImageInfo::new(
            (width as i32, height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = width as usize * 4;
        let mut pixels = vec![0u8; stride * height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("read pixels failed"));
        }
        Ok(RasterImage { pixels, width, height, stride })
    }

    fn draw_node(&self, canvas: &skia::Canvas, scene: &SceneGraph, id: NodeId, opacity: f64) {
        let Some(kind) = scene.kind(id) else { return };
        if kind == ElementKind::Title || text_value(scene, id, "display").as_deref() == Some("none") {
            return;
        }
        let opacity = opacity * number_value(scene, id, "opacity").unwrap_or(1.0).clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }

        let translate = scene
            .attr(id, "transform")
            .and_then(|v| v.as_text())
            .and_then(parse_translate);
        if let Some((dx, dy)) = translate {
            canvas.save();
            canvas.translate((dx as f32, dy as f32));
        }

        match kind {
            ElementKind::Rect => self.draw_rect(canvas, scene, id, opacity),
            ElementKind::Text => self.draw_text(canvas, scene, id, opacity),
            ElementKind::Line => {
                let p = |n: &str| scene.attr_f64(id, n).unwrap_or(0.0) as f32;
                if let Some(paint) = stroke_paint(scene, id, opacity) {
                    canvas.draw_line((p("x1"), p("y1")), (p("x2"), p("y2")), &paint);
                }
            }
            ElementKind::Polyline => {
                let points = scene
                    .attr(id, "points")
                    .and_then(|v| v.as_text())
                    .map(parse_points)
                    .unwrap_or_default();
                if let (Some(paint), Some((first, rest))) = (stroke_paint(scene, id, opacity), points.split_first()) {
                    let mut path = skia::Path::new();
                    path.move_to(*first);
                    for p in rest {
                        path.line_to(*p);
                    }
                    canvas.draw_path(&path, &paint);
                }
            }
            ElementKind::Svg | ElementKind::Group | ElementKind::Title => {}
        }

        // Text children are tooltips or already painted as content.
        if kind != ElementKind::Text {
            for child in scene.children(id) {
                self.draw_node(canvas, scene, *child, opacity);
            }
        }

        if translate.is_some() {
            canvas.restore();
        }
    }

    fn draw_rect(&self, canvas: &skia::Canvas, scene: &SceneGraph, id: NodeId, opacity: f64) {
        let v = |n: &str| scene.attr_f64(id, n).unwrap_or(0.0) as f32;
        let (w, h) = (v("width"), v("height"));
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let rect = skia::Rect::from_xywh(v("x"), v("y"), w, h);
        let (rx, ry) = (v("rx"), v("ry"));
        if let Some(paint) = fill_paint(scene, id, opacity, Color::BLACK) {
            if rx > 0.0 || ry > 0.0 {
                canvas.draw_round_rect(rect, rx, ry, &paint);
            } else {
                canvas.draw_rect(rect, &paint);
            }
        }
        if let Some(paint) = stroke_paint(scene, id, opacity) {
            canvas.draw_rect(rect, &paint);
        }
    }

    fn draw_text(&self, canvas: &skia::Canvas, scene: &SceneGraph, id: NodeId, opacity: f64) {
        let Some(text) = scene.own_text(id).filter(|t| !t.is_empty()) else { return };
        let size = text_value(scene, id, "font-size")
            .and_then(|s| s.trim_end_matches("px").trim().parse::<f64>().ok())
            .unwrap_or(12.0);
        let color = match text_value(scene, id, "fill") {
            Some(raw) if raw.trim() == "none" => return,
            Some(raw) => raw.parse().unwrap_or(Color::BLACK),
            None => Color::BLACK,
        };
        let color = to_skia(color, opacity * number_value(scene, id, "fill-opacity").unwrap_or(1.0));
        let family = text_value(scene, id, "font-family").unwrap_or_default();
        let weight = text_value(scene, id, "font-weight").unwrap_or_default();

        let mut paragraph = self.text.layout(text, &family, size as f32, &weight, color);
        let width = paragraph.longest_line() as f64;
        let mut x = scene.attr_f64(id, "x").unwrap_or(0.0);
        let mut y = scene.attr_f64(id, "y").unwrap_or(0.0);
        match text_value(scene, id, "text-anchor").as_deref() {
            Some("middle") => x -= width / 2.0,
            Some("end") => x -= width,
            _ => {}
        }
        if let Some(em) = scene
            .attr(id, "dy")
            .and_then(|v| v.as_text())
            .and_then(|s| s.trim_end_matches("em").parse::<f64>().ok())
        {
            y += em * size;
        }
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        paragraph.paint(canvas, (x as f32, (y - size * 0.8) as f32));
    }
}

fn to_skia(c: Color, opacity: f64) -> skia::Color {
    let a = (c.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

/// Style first, then presentation attribute.
fn text_value(scene: &SceneGraph, id: NodeId, name: &str) -> Option<String> {
    scene
        .style(id, name)
        .or_else(|| scene.attr(id, name))
        .map(|v| v.to_string())
}

fn number_value(scene: &SceneGraph, id: NodeId, name: &str) -> Option<f64> {
    scene.style(id, name).or_else(|| scene.attr(id, name)).and_then(|v| v.as_number())
}

fn paint_color(scene: &SceneGraph, id: NodeId, name: &str) -> Option<Color> {
    let raw = text_value(scene, id, name)?;
    if raw.trim() == "none" {
        return None;
    }
    raw.parse().ok()
}

fn fill_paint(scene: &SceneGraph, id: NodeId, opacity: f64, fallback: Color) -> Option<skia::Paint> {
    let color = match text_value(scene, id, "fill") {
        Some(raw) if raw.trim() == "none" => return None,
        Some(raw) => raw.parse().unwrap_or(fallback),
        None => fallback,
    };
    let fill_opacity = number_value(scene, id, "fill-opacity").unwrap_or(1.0);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(color, opacity * fill_opacity));
    Some(paint)
}

fn stroke_paint(scene: &SceneGraph, id: NodeId, opacity: f64) -> Option<skia::Paint> {
    let color = paint_color(scene, id, "stroke")?;
    let width = number_value(scene, id, "stroke-width").unwrap_or(1.0);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width as f32);
    paint.set_color(to_skia(color, opacity));
    Some(paint)
}

/// `translate(x, y)` or `translate(x)`; other transforms are ignored.
fn parse_translate(s: &str) -> Option<(f64, f64)> {
    let inner = s.trim().strip_prefix("translate(")?.strip_suffix(')')?;
    let mut parts = inner.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next().map(|p| p.parse().ok()).unwrap_or(Some(0.0))?;
    Some((x, y))
}

fn parse_points(s: &str) -> Vec<skia::Point> {
    let nums: Vec<f32> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|p| p.parse().ok())
        .collect();
    nums.chunks_exact(2).map(|c| skia::Point::new(c[0], c[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_forms() {
        assert_eq!(parse_translate("translate(10,20)"), Some((10.0, 20.0)));
        assert_eq!(parse_translate("translate(5 6)"), Some((5.0, 6.0)));
        assert_eq!(parse_translate("translate(7)"), Some((7.0, 0.0)));
        assert_eq!(parse_translate("scale(2)"), None);
    }

    #[test]
    fn polyline_points() {
        let pts = parse_points("1,2 3.5,4");
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[1], skia::Point::new(3.5, 4.0));
    }
}
