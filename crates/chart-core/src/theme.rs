// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for visual colors (background, axis, labels, series palette).

use crate::color::Color;

#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub label_outside: Color,
    pub label_inside: Color,
    pub scrollbar: Color,
    pub palette: Vec<Color>,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_rgb(255, 255, 255),
            axis_line: Color::from_rgb(0x99, 0x99, 0x99),
            axis_label: Color::from_rgb(0x66, 0x66, 0x66),
            label_outside: Color::from_rgb(0x77, 0x77, 0x77),
            label_inside: Color::from_rgb(0xff, 0xff, 0xff),
            scrollbar: Color::from_argb(128, 0x80, 0x80, 0x80),
            palette: vec![
                Color::from_rgb(0x01, 0xb8, 0xaa),
                Color::from_rgb(0x37, 0x46, 0x49),
                Color::from_rgb(0xfd, 0x62, 0x5e),
                Color::from_rgb(0xf2, 0xc8, 0x0f),
                Color::from_rgb(0x5f, 0x6b, 0x6d),
                Color::from_rgb(0x8a, 0xd4, 0xeb),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_rgb(18, 18, 20),
            axis_line: Color::from_rgb(180, 180, 190),
            axis_label: Color::from_rgb(235, 235, 245),
            label_outside: Color::from_rgb(210, 210, 220),
            label_inside: Color::from_rgb(18, 18, 20),
            scrollbar: Color::from_argb(128, 150, 150, 160),
            palette: vec![
                Color::from_rgb(64, 160, 255),
                Color::from_rgb(40, 200, 120),
                Color::from_rgb(220, 80, 80),
                Color::from_rgb(255, 230, 70),
            ],
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Color::from_rgb(0x00, 0x00, 0x00),
            axis_line: Color::from_rgb(0xff, 0xff, 0xff),
            axis_label: Color::from_rgb(0xff, 0xff, 0xff),
            label_outside: Color::from_rgb(0xff, 0xff, 0xff),
            label_inside: Color::from_rgb(0x00, 0x00, 0x00),
            scrollbar: Color::from_rgb(0xcc, 0xcc, 0xcc),
            palette: vec![
                Color::from_rgb(0x00, 0xff, 0xff),
                Color::from_rgb(0xff, 0xff, 0x00),
            ],
        }
    }

    /// Palette color for series `index`, cycling.
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.axis_line;
        }
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
