// File: crates/chart-core/src/format/formatter.rs
// Summary: Value formatter combining a format string, precision override and display units.

use tracing::trace;

use super::display_unit::{self, DisplayUnit};
use super::number::{custom_format_metadata, format_general, format_number_with_precision, MAX_DECIMAL_PLACES};
use super::{format_value, Value};

/// Inputs for `ValueFormatter::create`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueFormatterOptions {
    pub format: Option<String>,
    /// Exact number of decimals; `None` keeps what the format asks for.
    pub precision: Option<u32>,
    /// Display-units hint: 0 for automatic, 1 for none, or a unit magnitude.
    pub value: Option<f64>,
    /// Secondary magnitude hint (e.g. the largest value on the axis).
    pub value2: Option<f64>,
    /// Replace verbose formats with shorter equivalents.
    pub allow_format_beautification: bool,
}

/// Verbose formats and their compact equivalents.
const BEAUTIFY_TABLE: &[(&str, &str)] = &[
    ("0.00 %;-0.00 %;0.00 %", "0.00 %"),
    ("0.0 %;-0.0 %;0.0 %", "0.0 %"),
    ("0 %;-0 %;0 %", "0 %"),
    ("#,0.00;-#,0.00;#,0.00", "#,0.00"),
    ("#,0;-#,0;#,0", "#,0"),
    ("\\$#,0.00;(\\$#,0.00);\\$#,0.00", "\\$#,0.00"),
    ("\\$#,0;(\\$#,0);\\$#,0", "\\$#,0"),
];

/// Shorter equivalent of `format`, or `format` itself.
pub fn beautify_format(format: &str) -> &str {
    BEAUTIFY_TABLE
        .iter()
        .find(|(verbose, _)| *verbose == format)
        .map(|(_, short)| *short)
        .unwrap_or(format)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueFormatter {
    options: ValueFormatterOptions,
    format: Option<String>,
    display_unit: Option<DisplayUnit>,
}

impl ValueFormatter {
    pub fn create(options: ValueFormatterOptions) -> Self {
        let format = options.format.as_deref().map(|f| {
            if options.allow_format_beautification { beautify_format(f).to_string() } else { f.to_string() }
        });
        let is_percent = format
            .as_deref()
            .map(|f| custom_format_metadata(f, false).has_percent)
            .unwrap_or(false);
        let magnitude = options.value.unwrap_or(0.0).abs().max(options.value2.unwrap_or(0.0).abs());
        let display_unit = if is_percent { None } else { display_unit::resolve_display_unit(magnitude) };
        trace!(format = ?format, precision = ?options.precision, unit = ?display_unit.map(|u| u.suffix), "create value formatter");
        Self { options, format, display_unit }
    }

    pub fn options(&self) -> &ValueFormatterOptions { &self.options }

    /// Effective format string after beautification.
    pub fn format_string(&self) -> Option<&str> { self.format.as_deref() }

    pub fn display_unit(&self) -> Option<&DisplayUnit> { self.display_unit.as_ref() }

    pub fn precision(&self) -> Option<u32> { self.options.precision }

    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Number(v) => self.format_number(*v),
            other => format_value(other, self.format.as_deref()),
        }
    }

    pub fn format_number(&self, v: f64) -> String {
        let precision = self.options.precision;
        let (scaled, suffix) = match &self.display_unit {
            Some(unit) => (display_unit::project(unit, v), unit.suffix),
            None => (v, ""),
        };
        let body = match (self.format.as_deref(), precision) {
            (Some(f), p) => format_number_with_precision(scaled, f, p),
            (None, Some(p)) => format!("{:.*}", (p as usize).min(MAX_DECIMAL_PLACES), scaled),
            (None, None) if suffix.is_empty() => format_general(scaled, 10),
            (None, None) => format_general(scaled, 2),
        };
        format!("{body}{suffix}")
    }
}
