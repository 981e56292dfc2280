// File: crates/tornado-chart/src/capabilities.rs
// Summary: Static description of the visual's data roles, mappings and formatting objects.

use std::collections::BTreeMap;

use serde::Serialize;

pub const CATEGORY_ROLE: &str = "Category";
pub const SERIES_ROLE: &str = "Series";
pub const VALUES_ROLE: &str = "Values";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RoleKind {
    Grouping,
    Measure,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRole {
    pub name: &'static str,
    pub kind: RoleKind,
    pub display_name: &'static str,
}

/// Upper bound on the number of fields bound to one role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoleLimit {
    pub max: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMapping {
    /// Alternative role limits; a field configuration must satisfy one of them.
    pub conditions: Vec<BTreeMap<&'static str, RoleLimit>>,
    pub categorical: CategoricalMapping,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalMapping {
    /// Role bound to categories, reduced to at most `top` rows.
    pub categories_for: &'static str,
    pub top: usize,
    pub values_group_by: &'static str,
    pub values_select: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Bool,
    Numeric,
    Integer,
    Fill,
    Text,
    FormatString,
    DisplayUnits,
    Enumeration,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescriptor {
    pub display_name: &'static str,
    pub properties: BTreeMap<&'static str, PropertyDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualCapabilities {
    pub data_roles: Vec<DataRole>,
    pub data_view_mappings: Vec<DataViewMapping>,
    pub objects: BTreeMap<&'static str, ObjectDescriptor>,
}

impl VisualCapabilities {
    pub fn role(&self, name: &str) -> Option<&DataRole> {
        self.data_roles.iter().find(|r| r.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn object(display_name: &'static str, props: &[(&'static str, &'static str, PropertyType)]) -> ObjectDescriptor {
    ObjectDescriptor {
        display_name,
        properties: props
            .iter()
            .map(|&(name, display_name, property_type)| (name, PropertyDescriptor { display_name, property_type }))
            .collect(),
    }
}

fn limits(items: &[(&'static str, usize)]) -> BTreeMap<&'static str, RoleLimit> {
    items.iter().map(|&(role, max)| (role, RoleLimit { max })).collect()
}

pub fn tornado_capabilities() -> VisualCapabilities {
    let data_roles = vec![
        DataRole { name: CATEGORY_ROLE, kind: RoleKind::Grouping, display_name: "Group" },
        DataRole { name: SERIES_ROLE, kind: RoleKind::Grouping, display_name: "Legend" },
        DataRole { name: VALUES_ROLE, kind: RoleKind::Measure, display_name: "Values" },
    ];
    let data_view_mappings = vec![DataViewMapping {
        conditions: vec![
            limits(&[(CATEGORY_ROLE, 1), (VALUES_ROLE, 2), (SERIES_ROLE, 0)]),
            limits(&[(CATEGORY_ROLE, 1), (VALUES_ROLE, 1), (SERIES_ROLE, 1)]),
        ],
        categorical: CategoricalMapping {
            categories_for: CATEGORY_ROLE,
            top: 1000,
            values_group_by: SERIES_ROLE,
            values_select: VALUES_ROLE,
        },
    }];

    let mut objects = BTreeMap::new();
    objects.insert("general", object("General", &[("formatString", "Format", PropertyType::FormatString)]));
    objects.insert("dataPoint", object("Data colors", &[("fill", "Fill", PropertyType::Fill)]));
    objects.insert(
        "categoryAxis",
        object(
            "Group",
            &[
                ("show", "Show", PropertyType::Bool),
                ("fill", "Color", PropertyType::Fill),
                ("fontSize", "Text size", PropertyType::Numeric),
            ],
        ),
    );
    objects.insert(
        "labels",
        object(
            "Data labels",
            &[
                ("show", "Show", PropertyType::Bool),
                ("labelColor", "Color", PropertyType::Fill),
                ("insideFill", "Inside fill", PropertyType::Fill),
                ("labelDisplayUnits", "Display units", PropertyType::DisplayUnits),
                ("labelPrecision", "Decimal places", PropertyType::Integer),
                ("fontSize", "Text size", PropertyType::Numeric),
            ],
        ),
    );
    objects.insert(
        "legend",
        object(
            "Legend",
            &[
                ("show", "Show", PropertyType::Bool),
                ("position", "Position", PropertyType::Enumeration),
                ("showTitle", "Title", PropertyType::Bool),
                ("titleText", "Legend name", PropertyType::Text),
            ],
        ),
    );

    VisualCapabilities { data_roles, data_view_mappings, objects }
}
