// File: crates/chart-core/src/text.rs
// Summary: Text properties, point/pixel conversion and the text measurement seam.

/// Font description plus the string to measure.
#[derive(Clone, Debug, PartialEq)]
pub struct TextProperties {
    pub text: String,
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    pub font_weight: String,
}

/// Points to CSS pixels (96 dpi).
#[inline]
pub fn px_from_pt(pt: f64) -> f64 {
    pt * 96.0 / 72.0
}

/// Points to a CSS pixel literal such as `12px`.
pub fn px_string_from_pt(pt: f64) -> String {
    let px = px_from_pt(pt);
    let rounded = (px * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{}px", rounded)
    }
}

/// Measures rendered text. Implementations may be backed by real fonts
/// (see the Skia backend) or by estimation.
pub trait TextMeasurer {
    fn measure_width(&self, props: &TextProperties) -> f64;
    fn estimate_height(&self, props: &TextProperties) -> f64;
}

/// Deterministic measurer based on average glyph advances. Used when no font
/// backend is available and by tests.
#[derive(Clone, Copy, Debug)]
pub struct EstimatedTextMeasurer {
    /// Average advance as a fraction of the font size.
    pub average_advance: f64,
    /// Line height as a fraction of the font size.
    pub line_height: f64,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self { average_advance: 0.55, line_height: 1.2 }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_width(&self, props: &TextProperties) -> f64 {
        let size = props.font_size.max(1.0);
        let bold = matches!(props.font_weight.as_str(), "bold" | "bolder" | "600" | "700" | "800" | "900");
        let factor = if bold { self.average_advance * 1.1 } else { self.average_advance };
        props
            .text
            .chars()
            .map(|c| {
                // narrow glyphs
                if matches!(c, '.' | ',' | ':' | ';' | 'i' | 'l' | 'I' | '|' | '!' | '\'' | ' ') {
                    size * factor * 0.5
                } else if c.is_ascii_uppercase() || matches!(c, 'm' | 'w' | 'M' | 'W') {
                    size * factor * 1.25
                } else {
                    size * factor
                }
            })
            .sum()
    }

    fn estimate_height(&self, props: &TextProperties) -> f64 {
        props.font_size.max(1.0) * self.line_height
    }
}
