// File: crates/chart-core/src/color.rs
// Summary: RGBA color with CSS hex parsing/formatting, as used by scene styles and themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ChartError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Alpha as a 0..=1 fraction.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// CSS form: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, trim_float(self.opacity()))
        }
    }
}

fn trim_float(v: f64) -> String {
    let s = format!("{:.3}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    /// Accepts `#rgb`, `#rrggbb`, `#aarrggbb` and a handful of named colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let err = || ChartError::InvalidColor(s.to_string());
        match raw.to_ascii_lowercase().as_str() {
            "black" => return Ok(Color::BLACK),
            "white" => return Ok(Color::WHITE),
            "transparent" => return Ok(Color::TRANSPARENT),
            "red" => return Ok(Color::from_rgb(255, 0, 0)),
            "green" => return Ok(Color::from_rgb(0, 128, 0)),
            "blue" => return Ok(Color::from_rgb(0, 0, 255)),
            "gray" | "grey" => return Ok(Color::from_rgb(128, 128, 128)),
            _ => {}
        }
        if let Some(args) = raw.strip_prefix("rgba(").or_else(|| raw.strip_prefix("rgb(")) {
            let parts: Vec<&str> = args.trim_end_matches(')').split(',').map(str::trim).collect();
            let channel = |i: usize| parts.get(i).and_then(|p| p.parse::<u8>().ok()).ok_or_else(err);
            let alpha = match parts.len() {
                3 => 255,
                4 => {
                    let a: f64 = parts[3].parse().map_err(|_| err())?;
                    (a.clamp(0.0, 1.0) * 255.0).round() as u8
                }
                _ => return Err(err()),
            };
            return Ok(Color::from_argb(alpha, channel(0)?, channel(1)?, channel(2)?));
        }
        let hex = raw.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Color::from_rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Color::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::from_argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
