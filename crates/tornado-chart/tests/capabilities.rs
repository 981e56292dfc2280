// File: crates/tornado-chart/tests/capabilities.rs
// Purpose: Declared data roles, mappings and formatting objects.

use tornado_chart::capabilities::{RoleKind, CATEGORY_ROLE, SERIES_ROLE, VALUES_ROLE};
use tornado_chart::TornadoChart;

#[test]
fn capabilities_are_defined() {
    let caps = TornadoChart::capabilities();
    assert_eq!(caps.data_roles.len(), 3);
    assert_eq!(caps.role(CATEGORY_ROLE).map(|r| r.kind), Some(RoleKind::Grouping));
    assert_eq!(caps.role(SERIES_ROLE).map(|r| r.kind), Some(RoleKind::Grouping));
    assert_eq!(caps.role(VALUES_ROLE).map(|r| r.kind), Some(RoleKind::Measure));
    assert!(caps.role("Tooltips").is_none());
}

#[test]
fn mapping_allows_two_measures_or_one_grouped_measure() {
    let caps = TornadoChart::capabilities();
    let conditions = &caps.data_view_mappings[0].conditions;
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0][VALUES_ROLE].max, 2);
    assert_eq!(conditions[0][SERIES_ROLE].max, 0);
    assert_eq!(conditions[1][VALUES_ROLE].max, 1);
    assert_eq!(conditions[1][SERIES_ROLE].max, 1);
}

#[test]
fn formatting_objects_are_declared() {
    let caps = TornadoChart::capabilities();
    for name in ["dataPoint", "categoryAxis", "labels", "legend"] {
        assert!(caps.objects.contains_key(name), "missing object {name}");
    }
    assert!(caps.objects["labels"].properties.contains_key("labelDisplayUnits"));
}

#[test]
fn serializes_to_camel_case_json() -> anyhow::Result<()> {
    let json = TornadoChart::capabilities().to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["dataRoles"][0]["name"], "Category");
    assert_eq!(value["dataRoles"][2]["kind"], "Measure");
    assert_eq!(value["dataViewMappings"][0]["categorical"]["valuesGroupBy"], "Series");
    assert_eq!(value["objects"]["labels"]["properties"]["show"]["type"], "bool");
    Ok(())
}
