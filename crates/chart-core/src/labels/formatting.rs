// File: crates/chart-core/src/labels/formatting.rs
// Summary: Label text formatting helpers and the per-chart column formatter cache.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::DataLabelsSettings;
use crate::format::number::{custom_format_metadata, split_sections};
use crate::format::{format_value, Value, ValueFormatter, ValueFormatterOptions};

/// Decimals used for count-like fields whose format asks for none.
const DEFAULT_COUNT_LABEL_PRECISION: u32 = 0;

/// Format a label value with `formatter` when given, otherwise with the
/// formatting service and `format`.
pub fn get_label_formatted_text(value: &Value, format: Option<&str>, formatter: Option<&ValueFormatter>) -> String {
    match formatter {
        Some(f) => f.format(value),
        None => format_value(value, format),
    }
}

/// The axis formatter's display unit, but only when labels ask for automatic units.
pub fn get_display_unit_value_from_axis_formatter(
    axis_formatter: Option<&ValueFormatter>,
    settings: &DataLabelsSettings,
) -> Option<f64> {
    if !settings.is_auto_display_units() {
        return None;
    }
    axis_formatter.and_then(|f| f.display_unit()).map(|unit| unit.value)
}

/// Decimals to show for a label: explicit precision, else the positive
/// subformat's decimals when it has a decimal point, else none.
pub fn label_precision(precision: Option<u32>, format: Option<&str>) -> u32 {
    if let Some(p) = precision {
        return p;
    }
    if let Some(format) = format.filter(|f| !f.is_empty()) {
        let positive = split_sections(format).first().copied().unwrap_or(format);
        let metadata = custom_format_metadata(positive, true);
        if metadata.has_dots {
            return metadata.precision.unwrap_or(DEFAULT_COUNT_LABEL_PRECISION);
        }
    }
    DEFAULT_COUNT_LABEL_PRECISION
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    format: String,
    display_units: u64,
    precision: u32,
    value2: Option<u64>,
}

/// Memoized label formatters for one chart instance. Never evicts.
#[derive(Debug, Default)]
pub struct ColumnFormatterCache {
    cache: HashMap<CacheKey, Rc<ValueFormatter>>,
    default_formatter: Option<Rc<ValueFormatter>>,
}

impl ColumnFormatterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter for `format` under `settings`. Without a format string every
    /// call returns the same default formatter, built on first use.
    pub fn get_or_create(
        &mut self,
        format: Option<&str>,
        settings: &DataLabelsSettings,
        value2: Option<f64>,
    ) -> Rc<ValueFormatter> {
        let format = match format.filter(|f| !f.is_empty()) {
            Some(f) => f,
            None => {
                let formatter = self
                    .default_formatter
                    .get_or_insert_with(|| Rc::new(ValueFormatter::create(options_for(settings, None, value2, settings.precision))));
                return Rc::clone(formatter);
            }
        };

        let precision = label_precision(settings.precision, Some(format));
        let key = CacheKey {
            format: format.to_string(),
            display_units: settings.display_units.to_bits(),
            precision,
            value2: value2.map(f64::to_bits),
        };
        let formatter = self.cache.entry(key).or_insert_with(|| {
            trace!(format, precision, display_units = settings.display_units, ?value2, "label formatter cache miss");
            Rc::new(ValueFormatter::create(options_for(settings, Some(format), value2, Some(precision))))
        });
        Rc::clone(formatter)
    }

    /// Number of memoized formatters, excluding the default one.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn options_for(
    settings: &DataLabelsSettings,
    format: Option<&str>,
    value2: Option<f64>,
    precision: Option<u32>,
) -> ValueFormatterOptions {
    ValueFormatterOptions {
        format: format.map(str::to_string),
        precision,
        value: Some(settings.display_units),
        value2,
        allow_format_beautification: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_from_positive_section_only() {
        assert_eq!(label_precision(None, Some("#,0.000;(#,0.0)")), 3);
        assert_eq!(label_precision(None, Some("#,0")), 0);
        assert_eq!(label_precision(None, None), 0);
        assert_eq!(label_precision(Some(1), Some("0.00")), 1);
    }
}
