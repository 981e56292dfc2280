// File: crates/tornado-chart/src/data_view.rs
// Summary: Categorical data view handed to the visual by the host (serde model plus object lookups).
// Notes:
// - Field names follow the host's camelCase JSON.
// - Date-time cells travel as ISO-8601 text and are typed by their column.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use chart_core::format::Value;
use chart_core::Color;

use crate::error::TornadoError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataView {
    #[serde(default)]
    pub metadata: DataViewMetadata,
    #[serde(default)]
    pub categorical: Option<DataViewCategorical>,
}

impl DataView {
    pub fn from_json(json: &str) -> Result<Self, TornadoError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TornadoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMetadata {
    #[serde(default)]
    pub columns: Vec<DataViewMetadataColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<DataViewObjects>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    #[default]
    Text,
    Numeric,
    Integer,
    Bool,
    DateTime,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMetadataColumn {
    pub display_name: String,
    #[serde(default)]
    pub query_name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub roles: BTreeMap<String, bool>,
    #[serde(default, rename = "type")]
    pub value_type: ValueType,
    /// Series value this column belongs to when the view is grouped.
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<DataViewObjects>,
}

impl DataViewMetadataColumn {
    pub fn new(display_name: &str, value_type: ValueType) -> Self {
        Self {
            display_name: display_name.to_string(),
            query_name: Some(display_name.to_string()),
            value_type,
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.insert(role.to_string(), true);
        self
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.get(role).copied().unwrap_or(false)
    }

    /// Query name, falling back to the display name.
    pub fn query(&self) -> &str {
        self.query_name.as_deref().unwrap_or(&self.display_name)
    }
}

/// One cell as it appears in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PrimitiveValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PrimitiveValue::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Typed value for a cell of a column of `value_type`.
    pub fn to_value(&self, value_type: ValueType) -> Value {
        match (self, value_type) {
            (PrimitiveValue::Null, _) => Value::Null,
            (PrimitiveValue::Bool(b), _) => Value::Bool(*b),
            (PrimitiveValue::Number(v), _) => Value::Number(*v),
            (PrimitiveValue::Text(s), ValueType::DateTime) => parse_date_time(s).map(Value::DateTime).unwrap_or_else(|| Value::Text(s.clone())),
            (PrimitiveValue::Text(s), _) => Value::Text(s.clone()),
        }
    }
}

impl From<f64> for PrimitiveValue {
    fn from(v: f64) -> Self { PrimitiveValue::Number(v) }
}

impl From<&str> for PrimitiveValue {
    fn from(v: &str) -> Self { PrimitiveValue::Text(v.to_string()) }
}

impl<T: Into<PrimitiveValue>> From<Option<T>> for PrimitiveValue {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(PrimitiveValue::Null) }
}

fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewCategorical {
    #[serde(default)]
    pub categories: Option<Vec<DataViewCategoryColumn>>,
    #[serde(default)]
    pub values: Option<DataViewValueColumns>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewCategoryColumn {
    pub source: DataViewMetadataColumn,
    pub values: Vec<PrimitiveValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewValueColumns {
    /// Grouping column when series come from the Series role.
    #[serde(default)]
    pub source: Option<DataViewMetadataColumn>,
    pub columns: Vec<DataViewValueColumn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewValueColumn {
    pub source: DataViewMetadataColumn,
    pub values: Vec<PrimitiveValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<PrimitiveValue>>,
}

/// `objectName -> propertyName -> value` as set in the formatting pane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataViewObjects(pub BTreeMap<String, BTreeMap<String, serde_json::Value>>);

impl DataViewObjects {
    pub fn set(&mut self, object: &str, property: &str, value: serde_json::Value) {
        self.0.entry(object.to_string()).or_default().insert(property.to_string(), value);
    }

    pub fn property(&self, object: &str, property: &str) -> Option<&serde_json::Value> {
        self.0.get(object).and_then(|o| o.get(property))
    }

    pub fn get_bool(&self, object: &str, property: &str) -> Option<bool> {
        self.property(object, property).and_then(|v| v.as_bool())
    }

    pub fn get_f64(&self, object: &str, property: &str) -> Option<f64> {
        self.property(object, property).and_then(|v| v.as_f64())
    }

    pub fn get_str(&self, object: &str, property: &str) -> Option<&str> {
        self.property(object, property).and_then(|v| v.as_str())
    }

    /// Fill properties are `{ "solid": { "color": "#rrggbb" } }`; a bare
    /// color string is accepted too.
    pub fn get_color(&self, object: &str, property: &str) -> Option<Color> {
        let v = self.property(object, property)?;
        let raw = v
            .get("solid")
            .and_then(|s| s.get("color"))
            .and_then(|c| c.as_str())
            .or_else(|| v.as_str())?;
        match raw.parse() {
            Ok(c) => Some(c),
            Err(err) => {
                tracing::warn!(object, property, %err, "ignoring fill");
                None
            }
        }
    }
}
