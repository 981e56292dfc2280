// File: crates/chart-render-skia/src/text.rs
// Summary: Text shaping via Skia textlayout; implements the core `TextMeasurer` seam.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use chart_core::text::{TextMeasurer, TextProperties};

/// Families tried after the requested one; web font aliases such as
/// `wf_standard-font` rarely exist on the host.
const FALLBACK_FAMILIES: [&str; 6] = ["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct SkiaTextMeasurer {
    fonts: FontCollection,
}

impl Default for SkiaTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaTextMeasurer {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(family: &str, size: f32, weight: &str, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        let mut families: Vec<&str> = Vec::with_capacity(FALLBACK_FAMILIES.len() + 1);
        if !family.is_empty() {
            families.push(family);
        }
        families.extend(FALLBACK_FAMILIES);
        ts.set_font_families(&families);
        let weight = match weight {
            "bold" | "bolder" | "700" => skia::font_style::Weight::BOLD,
            "600" => skia::font_style::Weight::SEMI_BOLD,
            "lighter" | "300" => skia::font_style::Weight::LIGHT,
            _ => skia::font_style::Weight::NORMAL,
        };
        ts.set_font_style(skia::FontStyle::new(weight, skia::font_style::Width::NORMAL, skia::font_style::Slant::Upright));
        ts
    }

    /// Lay out a single paragraph; `size` is in pixels.
    pub fn layout(&self, text: &str, family: &str, size: f32, weight: &str, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(family, size, weight, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    fn layout_props(&self, props: &TextProperties) -> Paragraph {
        self.layout(
            &props.text,
            &props.font_family,
            props.font_size as f32,
            &props.font_weight,
            skia::Color::from_argb(0, 0, 0, 0),
        )
    }
}

impl TextMeasurer for SkiaTextMeasurer {
    fn measure_width(&self, props: &TextProperties) -> f64 {
        // width of the longest line
        self.layout_props(props).longest_line() as f64
    }

    fn estimate_height(&self, props: &TextProperties) -> f64 {
        self.layout_props(props).height() as f64
    }
}
