// File: crates/tornado-chart/tests/converter.rs
// Purpose: Data view -> view model: identities, ordering, nulls, grouping, colors and failures.

mod common;

use chart_core::{Color, Theme};
use chart_core::labels::ColumnFormatterCache;
use common::{sales_by_country, sales_by_day_of_week, VisualBuilder};
use serde_json::json;
use tornado_chart::data_view::{DataViewValueColumns, DataViewObjects};
use tornado_chart::settings::MAX_LABEL_PRECISION;
use tornado_chart::{convert, DataViewMetadataColumn, PrimitiveValue, TornadoError, ValueType};

#[test]
fn series_carry_measure_identities() {
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&sales_by_country(6));
    assert_eq!(data.series.len(), 2);
    let keys: Vec<String> = data.series.iter().map(|s| s.selection_id.key()).collect();
    assert!(keys[0].contains("Sales Amount (2014)"));
    assert!(keys[1].contains("Sales Amount (2015)"));
    assert_ne!(keys[0], keys[1]);
}

#[test]
fn points_are_series_major_with_unique_identities() {
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&sales_by_country(3));
    let order: Vec<(usize, usize)> = data.data_points.iter().map(|p| (p.series_index, p.category_index)).collect();
    assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    let mut keys: Vec<String> = data.data_points.iter().map(|p| p.identity.key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 6);
    assert_eq!(data.max_value, 742731.43);
}

#[test]
fn categories_are_formatted_with_their_column_format() {
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&sales_by_day_of_week());
    assert_eq!(data.categories.len(), 7);
    assert_eq!(data.categories[0].formatted, "Monday, January 5, 2015");
    assert_eq!(data.categories[6].formatted, "Sunday, January 11, 2015");
}

#[test]
fn labels_default_to_millions_with_two_decimals() {
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&sales_by_day_of_week());
    assert_eq!(data.data_points[0].label, "0.74M");
    assert_eq!(data.data_points[3].label, "0.30M");
    assert!(data.data_points[0].tooltip.contains("742,035"));
}

#[test]
fn series_colors_come_from_the_theme_unless_overridden() {
    let theme = Theme::light();
    let mut cache = ColumnFormatterCache::new();
    let mut data_view = sales_by_country(2);
    let data = convert(&data_view, &theme, &mut cache).expect("converts");
    assert_eq!(data.series[0].fill, theme.series_color(0));
    assert_eq!(data.series[1].fill, theme.series_color(1));

    if let Some(values) = data_view.categorical.as_mut().and_then(|c| c.values.as_mut()) {
        let mut objects = DataViewObjects::default();
        objects.set("dataPoint", "fill", json!({ "solid": { "color": "#123456" } }));
        values.columns[1].source.objects = Some(objects);
    }
    let data = convert(&data_view, &theme, &mut cache).expect("converts");
    assert_eq!(data.series[1].fill, Color::from_rgb(0x12, 0x34, 0x56));
    assert!(data.data_points.iter().filter(|p| p.series_index == 1).all(|p| p.color == data.series[1].fill));
}

#[test]
fn null_values_produce_no_point() {
    let mut data_view = sales_by_country(3);
    if let Some(values) = data_view.categorical.as_mut().and_then(|c| c.values.as_mut()) {
        values.columns[0].values[1] = PrimitiveValue::Null;
    }
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&data_view);
    assert_eq!(data.data_points.len(), 5);
    assert!(!data.data_points.iter().any(|p| p.series_index == 0 && p.category_index == 1));
    assert_eq!(data.series[0].values[1], None);
}

#[test]
fn missing_categories_or_values_give_an_empty_view() {
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let mut no_categories = sales_by_country(3);
    if let Some(c) = no_categories.categorical.as_mut() {
        c.categories = None;
    }
    assert!(builder.converter(&no_categories).is_empty());

    let mut no_values = sales_by_country(3);
    if let Some(c) = no_values.categorical.as_mut() {
        c.values = Some(DataViewValueColumns::default());
    }
    let data = builder.converter(&no_values);
    assert!(data.is_empty());
    assert_eq!(data.max_value, 0.0);
}

#[test]
fn short_value_column_is_rejected() {
    let mut data_view = sales_by_country(3);
    if let Some(values) = data_view.categorical.as_mut().and_then(|c| c.values.as_mut()) {
        values.columns[0].values.pop();
    }
    let err = convert(&data_view, &Theme::light(), &mut ColumnFormatterCache::new()).unwrap_err();
    assert!(matches!(err, TornadoError::LengthMismatch { expected: 3, actual: 2, .. }));
}

#[test]
fn grouped_series_take_their_group_names() {
    let mut data_view = sales_by_country(3);
    if let Some(values) = data_view.categorical.as_mut().and_then(|c| c.values.as_mut()) {
        values.source = Some(DataViewMetadataColumn::new("Year", ValueType::Integer).with_role("Series"));
        values.columns[0].source.group_name = Some("2014".to_string());
        values.columns[1].source.group_name = Some("2015".to_string());
    }
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&data_view);
    assert!(data.has_dynamic_series);
    assert_eq!(data.series[0].name, "2014");
    assert_eq!(data.series[1].name, "2015");
    assert!(data.series[0].selection_id.key().contains("Year"));
    assert_eq!(data.legend_title.as_deref(), Some("Year"));
}

#[test]
fn only_two_series_are_kept() {
    let mut data_view = sales_by_country(3);
    if let Some(values) = data_view.categorical.as_mut().and_then(|c| c.values.as_mut()) {
        let mut extra = values.columns[0].clone();
        extra.source.display_name = "Sales Amount (2016)".to_string();
        values.columns.push(extra);
    }
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    assert_eq!(builder.converter(&data_view).series.len(), 2);
}

#[test]
fn oversized_label_precision_is_clamped() {
    for precision in [70_000.0, 200_000_000.0] {
        let mut data_view = sales_by_country(3);
        let mut objects = DataViewObjects::default();
        objects.set("labels", "show", json!(true));
        objects.set("labels", "labelPrecision", json!(precision));
        data_view.metadata.objects = Some(objects);
        let mut builder = VisualBuilder::new(1000.0, 500.0);
        let data = builder.converter(&data_view);
        assert_eq!(data.settings.labels.precision, Some(MAX_LABEL_PRECISION));
        let label = &data.data_points[0].label;
        assert!(label.ends_with('M'));
        assert_eq!(label.split_once('.').map(|(_, f)| f.len()), Some(MAX_LABEL_PRECISION as usize + 1));
    }
}

#[test]
fn point_identities_follow_measure_queries_not_display_names() {
    let mut data_view = sales_by_country(3);
    if let Some(values) = data_view.categorical.as_mut().and_then(|c| c.values.as_mut()) {
        for (column, query) in values.columns.iter_mut().zip(["Sales.Amount2014", "Sales.Amount2015"]) {
            column.source.display_name = "Sales Amount".to_string();
            column.source.query_name = Some(query.to_string());
        }
    }
    let mut builder = VisualBuilder::new(1000.0, 500.0);
    let data = builder.converter(&data_view);
    let mut keys: Vec<String> = data.data_points.iter().map(|p| p.identity.key()).collect();
    assert!(keys[0].contains("Sales.Amount2014"));
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 6);

    builder.update_render_timeout(&data_view, |_| {});
    let before = builder.find("rect.column");
    builder.update_render_timeout(&data_view, |_| {});
    assert_eq!(builder.find("rect.column"), before);
}
