// File: crates/tornado-chart/tests/common/mod.rs
// Purpose: DOM-style harness around the tornado visual plus sample data views.
#![allow(dead_code)]

use chart_core::scene::SceneGraph;
use chart_core::{NodeId, Viewport};
use serde_json::json;
use tornado_chart::data_view::{
    DataViewCategorical, DataViewCategoryColumn, DataViewMetadata, DataViewValueColumn, DataViewValueColumns,
};
use tornado_chart::{
    DataView, DataViewMetadataColumn, DataViewObjects, PrimitiveValue, TornadoChart, TornadoChartDataView, ValueType,
};

pub struct VisualBuilder {
    pub visual: TornadoChart,
}

impl VisualBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self { visual: TornadoChart::new(Viewport::new(width, height)) }
    }

    pub fn update(&mut self, data_view: &DataView) {
        self.visual.update(data_view);
    }

    /// Update, let every transition run to its end, then inspect.
    pub fn update_render_timeout(&mut self, data_view: &DataView, check: impl FnOnce(&Self)) {
        self.visual.update(data_view);
        self.visual.finish_transitions();
        check(self);
    }

    pub fn scene(&self) -> &SceneGraph {
        self.visual.scene()
    }

    /// The `svg` element.
    pub fn main_element(&self) -> NodeId {
        self.visual.root()
    }

    pub fn find(&self, query: &str) -> Vec<NodeId> {
        self.scene().query(self.main_element(), query)
    }

    pub fn text(&self, id: NodeId) -> String {
        self.scene().text_content(id)
    }

    pub fn texts(&self, query: &str) -> Vec<String> {
        self.find(query).into_iter().map(|id| self.text(id)).collect()
    }

    pub fn converter(&mut self, data_view: &DataView) -> TornadoChartDataView {
        self.visual.converter(data_view).expect("data view converts")
    }
}

const COUNTRIES: [&str; 6] = ["Australia", "Canada", "France", "Germany", "United Kingdom", "United States"];
const SALES_2014: [f64; 6] = [742731.43, 162066.43, 283085.78, 300263.49, 376074.57, 814724.34];
const SALES_2015: [f64; 6] = [123455.43, 40566.43, 200457.78, 5000.49, 320000.57, 450000.34];

const DAY_SALES_2014: [f64; 7] = [742034.87, 162066.43, 283085.78, 301234.5, 376074.57, 812345.0, 425000.0];
const DAY_SALES_2015: [f64; 7] = [123455.43, 40566.43, 200457.78, 5000.49, 320000.57, 450000.34, 380000.0];

pub const DAY_CATEGORY_FORMAT: &str = "dddd\\, MMMM %d\\, yyyy";

fn measure(name: &str, format: &str, values: &[f64]) -> DataViewValueColumn {
    DataViewValueColumn {
        source: DataViewMetadataColumn::new(name, ValueType::Numeric).with_role("Values").with_format(format),
        values: values.iter().map(|v| PrimitiveValue::from(*v)).collect(),
        highlights: None,
    }
}

fn data_view(category: DataViewCategoryColumn, measures: Vec<DataViewValueColumn>) -> DataView {
    let mut columns = vec![category.source.clone()];
    columns.extend(measures.iter().map(|m| m.source.clone()));
    DataView {
        metadata: DataViewMetadata { columns, objects: None },
        categorical: Some(DataViewCategorical {
            categories: Some(vec![category]),
            values: Some(DataViewValueColumns { source: None, columns: measures }),
        }),
    }
}

/// Sales per country for 2014 and 2015; `count` keeps the first countries.
pub fn sales_by_country(count: usize) -> DataView {
    let count = count.min(COUNTRIES.len());
    let category = DataViewCategoryColumn {
        source: DataViewMetadataColumn::new("Country", ValueType::Text).with_role("Category"),
        values: COUNTRIES[..count].iter().map(|c| PrimitiveValue::from(*c)).collect(),
    };
    data_view(
        category,
        vec![
            measure("Sales Amount (2014)", "$#,0.00", &SALES_2014[..count]),
            measure("Sales Amount (2015)", "$#,0.00", &SALES_2015[..count]),
        ],
    )
}

/// Sales per day of the week starting Monday, January 5, 2015.
pub fn sales_by_day_of_week() -> DataView {
    let days = (5..12).map(|d| PrimitiveValue::from(format!("2015-01-{d:02}T00:00:00").as_str())).collect();
    let category = DataViewCategoryColumn {
        source: DataViewMetadataColumn::new("Date", ValueType::DateTime)
            .with_role("Category")
            .with_format(DAY_CATEGORY_FORMAT),
        values: days,
    };
    data_view(
        category,
        vec![
            measure("Sales Amount (2014)", "#,0", &DAY_SALES_2014),
            measure("Sales Amount (2015)", "#,0", &DAY_SALES_2015),
        ],
    )
}

pub fn with_labels(mut data_view: DataView) -> DataView {
    let mut objects = data_view.metadata.objects.take().unwrap_or_else(DataViewObjects::default);
    objects.set("labels", "show", json!(true));
    data_view.metadata.objects = Some(objects);
    data_view
}
