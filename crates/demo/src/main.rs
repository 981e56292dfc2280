// File: crates/demo/src/main.rs
// Summary: Demo loads a CSV (category column + one or two measures) or a JSON data view and
//          writes the tornado chart next to it as SVG and PNG.

use anyhow::{Context, Result};
use chart_core::{theme, Easing, Viewport};
use chart_render_skia::{SkiaRenderer, SkiaTextMeasurer};
use serde_json::json;
use std::path::{Path, PathBuf};
use tornado_chart::data_view::{
    DataViewCategorical, DataViewCategoryColumn, DataViewMetadata, DataViewValueColumn, DataViewValueColumns,
};
use tornado_chart::{DataView, DataViewMetadataColumn, DataViewObjects, PrimitiveValue, RenderOptions, TornadoChart, ValueType};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 400;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Usage: tornado-demo [path] [--labels] [--theme light|dark|high-contrast-dark] [--easing cubic-in-out]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let raw = args
        .first()
        .filter(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "crates/demo/data/sales_by_country.csv".to_string());
    let show_labels = args.iter().any(|a| a == "--labels");
    let selected = args
        .iter()
        .position(|a| a == "--theme")
        .and_then(|i| args.get(i + 1))
        .map(|name| theme::find(name))
        .unwrap_or_default();
    let easing = match args.iter().position(|a| a == "--easing").and_then(|i| args.get(i + 1)) {
        Some(name) => name.parse::<Easing>()?,
        None => Easing::default(),
    };
    info!(theme = selected.name, available = ?theme::presets().iter().map(|t| t.name).collect::<Vec<_>>(), "theme");

    let (path, used_alt) = resolve_path(&raw)?;
    info!(path = %path.display(), used_alt, "using input file");

    let mut data_view = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        DataView::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
        load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
    };
    if show_labels {
        let mut objects = data_view.metadata.objects.take().unwrap_or_default();
        objects.set("labels", "show", json!(true));
        objects.set("legend", "show", json!(true));
        data_view.metadata.objects = Some(objects);
    }

    let renderer = SkiaRenderer::new().with_background(selected.background);
    let mut chart = TornadoChart::with_options(
        Viewport::new(WIDTH as f64, HEIGHT as f64),
        RenderOptions { theme: selected, easing, ..Default::default() },
        Box::new(SkiaTextMeasurer::new()),
    );
    chart.update(&data_view);
    chart.finish_transitions();
    let data = chart.data();
    if data.is_empty() {
        warn!("nothing to draw; check the CSV headers and values");
    }
    info!(categories = data.categories.len(), series = data.series.len(), "converted");

    let out_svg = out_name_with(&path, "svg");
    std::fs::write(&out_svg, chart.to_svg()).with_context(|| format!("write {}", out_svg.display()))?;
    info!(path = %out_svg.display(), "wrote");

    let out_png = out_name_with(&path, "png");
    renderer.render_png_to_file(chart.scene(), WIDTH, HEIGHT, &out_png)?;
    info!(path = %out_png.display(), "wrote");
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// `<stem>_tornado.<ext>` next to the input.
fn out_name_with(input: &Path, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    input.with_file_name(format!("{stem}_tornado.{ext}"))
}

/// First column is the category, the next one or two columns are measures.
/// Empty or non-numeric cells become nulls.
fn load_csv(path: &Path) -> Result<DataView> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.len() < 2 {
        anyhow::bail!("expected a category column and at least one measure, got {headers:?}");
    }
    if headers.len() > 3 {
        warn!(extra = headers.len() - 3, "only the first two measures are drawn");
    }
    let measure_count = (headers.len() - 1).min(2);

    let mut categories = Vec::new();
    let mut measures: Vec<Vec<PrimitiveValue>> = vec![Vec::new(); measure_count];
    for rec in rdr.records() {
        let rec = rec?;
        categories.push(PrimitiveValue::from(rec.get(0).unwrap_or_default()));
        for (m, values) in measures.iter_mut().enumerate() {
            let cell = rec.get(m + 1).and_then(|s| s.parse::<f64>().ok());
            values.push(PrimitiveValue::from(cell));
        }
    }

    let category_source = DataViewMetadataColumn::new(&headers[0], ValueType::Text).with_role("Category");
    let columns: Vec<DataViewValueColumn> = measures
        .into_iter()
        .enumerate()
        .map(|(m, values)| DataViewValueColumn {
            source: DataViewMetadataColumn::new(&headers[m + 1], ValueType::Numeric).with_role("Values").with_format("#,0.00"),
            values,
            highlights: None,
        })
        .collect();

    let mut metadata_columns = vec![category_source.clone()];
    metadata_columns.extend(columns.iter().map(|c| c.source.clone()));
    Ok(DataView {
        metadata: DataViewMetadata { columns: metadata_columns, objects: Some(DataViewObjects::default()) },
        categorical: Some(DataViewCategorical {
            categories: Some(vec![DataViewCategoryColumn { source: category_source, values: categories }]),
            values: Some(DataViewValueColumns { source: None, columns }),
        }),
    })
}
