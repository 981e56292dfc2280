// File: crates/tornado-chart/src/converter.rs
// Summary: Data view -> tornado view model (categories, up to two series, data points, labels).
// Notes:
// - Points are ordered series-major: every point of the left series, then the right one.
// - Null or non-numeric cells produce no point.

use chart_core::format::{format_value, Value};
use chart_core::labels::ColumnFormatterCache;
use chart_core::theme::Theme;
use chart_core::{Color, SelectionId};
use tracing::debug;

use crate::capabilities::{CATEGORY_ROLE, VALUES_ROLE};
use crate::data_view::{DataView, DataViewMetadataColumn, DataViewValueColumn};
use crate::error::TornadoError;
use crate::settings::TornadoChartSettings;

/// A tornado draws at most one series on each side of the axis.
pub const MAX_SERIES_COUNT: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct TornadoCategory {
    pub value: Value,
    pub formatted: String,
    pub identity: SelectionId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TornadoChartSeries {
    pub name: String,
    pub selection_id: SelectionId,
    pub fill: Color,
    pub format: Option<String>,
    /// One entry per category.
    pub values: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TornadoChartPoint {
    pub category_index: usize,
    pub series_index: usize,
    pub value: f64,
    pub label: String,
    pub tooltip: String,
    pub color: Color,
    pub identity: SelectionId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: Color,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TornadoChartDataView {
    pub categories: Vec<TornadoCategory>,
    pub series: Vec<TornadoChartSeries>,
    pub data_points: Vec<TornadoChartPoint>,
    pub settings: TornadoChartSettings,
    pub legend_title: Option<String>,
    pub legend: Vec<LegendItem>,
    /// Largest value over all points, never negative.
    pub max_value: f64,
    pub has_dynamic_series: bool,
}

impl TornadoChartDataView {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }

    fn empty(settings: TornadoChartSettings) -> Self {
        Self { settings, ..Default::default() }
    }
}

/// Convert `data_view`. Views without categories or values yield an empty
/// model carrying the parsed settings.
pub fn convert(
    data_view: &DataView,
    theme: &Theme,
    formatters: &mut ColumnFormatterCache,
) -> Result<TornadoChartDataView, TornadoError> {
    let settings = TornadoChartSettings::parse(data_view.metadata.objects.as_ref(), theme);
    let Some(categorical) = &data_view.categorical else {
        return Ok(TornadoChartDataView::empty(settings));
    };
    let Some(category_column) = categorical.categories.as_ref().and_then(|c| c.first()) else {
        return Ok(TornadoChartDataView::empty(settings));
    };
    let Some(values) = categorical.values.as_ref().filter(|v| !v.columns.is_empty()) else {
        return Ok(TornadoChartDataView::empty(settings));
    };
    debug_assert!(category_column.source.roles.is_empty() || category_column.source.has_role(CATEGORY_ROLE));

    let source = &category_column.source;
    let categories: Vec<TornadoCategory> = category_column
        .values
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let value = raw.to_value(source.value_type);
            let formatted = format_value(&value, source.format.as_deref());
            let identity = SelectionId::builder().with_category(source.query(), i).create();
            TornadoCategory { value, formatted, identity }
        })
        .collect();

    let grouping = values.source.as_ref();
    let has_dynamic_series = grouping.is_some();
    let mut series = Vec::with_capacity(MAX_SERIES_COUNT);
    for (index, column) in values.columns.iter().take(MAX_SERIES_COUNT).enumerate() {
        check_length(column, categories.len())?;
        series.push(build_series(index, column, grouping, theme));
    }

    let mut data_points = Vec::new();
    let mut max_value = 0.0f64;
    for (series_index, (s, column)) in series.iter().zip(&values.columns).enumerate() {
        let formatter = formatters.get_or_create(s.format.as_deref(), &settings.labels, None);
        for (category_index, value) in s.values.iter().enumerate() {
            let Some(value) = *value else { continue };
            max_value = max_value.max(value);
            let category = &categories[category_index];
            let mut builder = SelectionId::builder().with_category(source.query(), category_index);
            if let (Some(g), Some(group)) = (grouping, &column.source.group_name) {
                builder = builder.with_series(g.query(), group);
            }
            let identity = builder.with_measure(column.source.query()).create();
            data_points.push(TornadoChartPoint {
                category_index,
                series_index,
                value,
                label: formatter.format(&Value::Number(value)),
                tooltip: format!(
                    "{}: {} {}",
                    category.formatted,
                    s.name,
                    format_value(&Value::Number(value), s.format.as_deref())
                ),
                color: s.fill,
                identity,
            });
        }
    }

    let legend = series.iter().map(|s| LegendItem { label: s.name.clone(), color: s.fill }).collect();
    let legend_title = settings
        .legend
        .title_text
        .clone()
        .or_else(|| grouping.map(|g| g.display_name.clone()));

    debug!(
        categories = categories.len(),
        series = series.len(),
        points = data_points.len(),
        max_value,
        "tornado data view converted"
    );
    Ok(TornadoChartDataView {
        categories,
        series,
        data_points,
        settings,
        legend_title,
        legend,
        max_value,
        has_dynamic_series,
    })
}

fn check_length(column: &DataViewValueColumn, expected: usize) -> Result<(), TornadoError> {
    if column.values.len() != expected {
        return Err(TornadoError::LengthMismatch {
            column: column.source.display_name.clone(),
            expected,
            actual: column.values.len(),
        });
    }
    Ok(())
}

fn build_series(
    index: usize,
    column: &DataViewValueColumn,
    grouping: Option<&DataViewMetadataColumn>,
    theme: &Theme,
) -> TornadoChartSeries {
    let source = &column.source;
    debug_assert!(source.roles.is_empty() || source.has_role(VALUES_ROLE));
    let (name, selection_id) = match (grouping, &source.group_name) {
        (Some(g), Some(group)) => (
            group.clone(),
            SelectionId::builder().with_series(g.query(), group).with_measure(source.query()).create(),
        ),
        _ => (source.display_name.clone(), SelectionId::builder().with_measure(source.query()).create()),
    };
    let fill = source
        .objects
        .as_ref()
        .and_then(|o| o.get_color("dataPoint", "fill"))
        .unwrap_or_else(|| theme.series_color(index));
    TornadoChartSeries {
        name,
        selection_id,
        fill,
        format: source.format.clone(),
        values: column.values.iter().map(|v| v.as_f64()).collect(),
    }
}
