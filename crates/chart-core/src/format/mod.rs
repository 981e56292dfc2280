// File: crates/chart-core/src/format/mod.rs
// Summary: Formatting service: primitive values, numeric and date format strings, display units.

pub mod date;
pub mod display_unit;
pub mod formatter;
pub mod number;

use chrono::NaiveDateTime;

pub use display_unit::DisplayUnit;
pub use formatter::{ValueFormatter, ValueFormatterOptions};
pub use number::{custom_format_metadata, FormatMetadata};

/// Text shown for missing values.
pub const BLANK: &str = "(Blank)";

/// Primitive value as found in a data view cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Number(v) }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::Text(v) }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self { Value::DateTime(v) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

/// Format `value` with an optional format string. Numbers without a format
/// use general formatting; dates without a format use the short date pattern.
pub fn format_value(value: &Value, format: Option<&str>) -> String {
    match value {
        Value::Null => BLANK.to_string(),
        Value::Bool(b) => if *b { "True".to_string() } else { "False".to_string() },
        Value::Number(v) => match format {
            Some(f) if !f.is_empty() => number::format_number(*v, f),
            _ => number::format_general(*v, 10),
        },
        Value::Text(s) => s.clone(),
        Value::DateTime(dt) => {
            let pattern = format.filter(|f| !f.is_empty()).unwrap_or_else(|| date::default_format_for(dt));
            date::format_date(dt, pattern)
        }
    }
}
