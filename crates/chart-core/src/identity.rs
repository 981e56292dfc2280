// File: crates/chart-core/src/identity.rs
// Summary: Opaque selection identity with stable keys, used to key rendered elements.

use std::fmt;

/// Identity of a data point (category, series, measure). Only its keys are
/// observable; their layout is an implementation detail.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionId {
    parts: Vec<String>,
    highlight: bool,
}

impl SelectionId {
    pub fn builder() -> SelectionIdBuilder {
        SelectionIdBuilder::default()
    }

    /// Stable key including the highlight flag.
    pub fn key(&self) -> String {
        let base = self.key_without_highlight();
        if self.highlight { format!("{base}|hl") } else { base }
    }

    /// Stable key that is equal for the highlighted and plain variant of a point.
    pub fn key_without_highlight(&self) -> String {
        format!("{{{}}}", self.parts.join(","))
    }

    pub fn with_highlight(&self, highlight: bool) -> Self {
        Self { parts: self.parts.clone(), highlight }
    }

    pub fn is_highlight(&self) -> bool { self.highlight }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SelectionIdBuilder {
    parts: Vec<String>,
}

impl SelectionIdBuilder {
    pub fn with_category(mut self, query_name: &str, index: usize) -> Self {
        self.parts.push(format!("cat:{query_name}#{index}"));
        self
    }

    pub fn with_series(mut self, query_name: &str, value: &str) -> Self {
        self.parts.push(format!("ser:{query_name}={value}"));
        self
    }

    pub fn with_measure(mut self, query_name: &str) -> Self {
        self.parts.push(format!("m:{query_name}"));
        self
    }

    pub fn create(self) -> SelectionId {
        SelectionId { parts: self.parts, highlight: false }
    }
}
