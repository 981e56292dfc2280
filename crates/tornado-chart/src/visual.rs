// File: crates/tornado-chart/src/visual.rs
// Summary: Tornado chart visual: owns the scene graph and redraws it on every update.
// Notes:
// - Scene layout: svg.tornado-chart > g.tornado-main (clearCatcher, columns, axes,
//   labels, categories), then g.y (scrollbar) and g.legend.
// - Rows that do not fit at the minimum category height scroll; only the
//   visible window is drawn.

use chart_core::labels::{animate_default_labels, get_text_size, ColumnFormatterCache, LabelConfig};
use chart_core::scene::{JoinKey, Selector};
use chart_core::text::px_string_from_pt;
use chart_core::{
    BandScale, Color, Easing, ElementKind, EstimatedTextMeasurer, Insets, Label, LinearScale, NodeId, Rect,
    SceneGraph, TextMeasurer, Theme, Transition, Viewport,
};
use tracing::{debug, warn};

use crate::capabilities::{tornado_capabilities, VisualCapabilities};
use crate::converter::{convert, TornadoChartDataView, TornadoChartPoint};
use crate::data_view::DataView;
use crate::error::TornadoError;
use crate::settings::{LegendPosition, TornadoChartSettings};

pub const ROOT_CLASS: &str = "tornado-chart";
pub const MAIN_CLASS: &str = "tornado-main";
pub const CLEAR_CATCHER_CLASS: &str = "clearCatcher";
pub const COLUMNS_CLASS: &str = "columns";
pub const COLUMN_CLASS: &str = "column";
pub const AXES_CLASS: &str = "axes";
pub const AXIS_CLASS: &str = "axis";
pub const LABELS_CLASS: &str = "labels";
pub const LABEL_TEXT_CLASS: &str = "label-text";
pub const CATEGORIES_CLASS: &str = "categories";
pub const CATEGORY_TEXT_CLASS: &str = "category-text";
pub const CATEGORY_TITLE_CLASS: &str = "category-title";
pub const SCROLLBAR_CLASS: &str = "y";
pub const SCROLLBAR_THUMB_CLASS: &str = "scrollbar";
pub const LEGEND_CLASS: &str = "legend";

const ELLIPSIS: &str = "…";

pub struct RenderOptions {
    pub theme: Theme,
    pub insets: Insets,
    pub animation_duration_ms: f64,
    pub easing: Easing,
    /// Rows never get shorter than this; extra rows scroll.
    pub min_category_height: f64,
    pub scrollbar_width: f64,
    /// Upper bound of the category column as a fraction of the viewport width.
    pub category_label_width_ratio: f64,
    /// Fraction of each row left empty between bars.
    pub bar_padding: f64,
    pub legend_height: f64,
    /// Gap between a bar end and its label.
    pub label_padding: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            insets: Insets::default(),
            animation_duration_ms: 250.0,
            easing: Easing::CUBIC_IN_OUT,
            min_category_height: 20.0,
            scrollbar_width: 10.0,
            category_label_width_ratio: 0.25,
            bar_padding: 0.2,
            legend_height: 20.0,
            label_padding: 4.0,
        }
    }
}

/// Pixel layout of one render pass.
#[derive(Clone, Copy, Debug)]
struct Layout {
    width: f64,
    /// Top of the first visible row.
    top: f64,
    available_height: f64,
    first: usize,
    visible: usize,
    total: usize,
    scrolling: bool,
    category_width: f64,
    bar_left: f64,
    mid: f64,
    rows: BandScale,
    /// Value -> half-width bar length.
    values: LinearScale,
}

impl Layout {
    fn is_visible(&self, category_index: usize) -> bool {
        category_index >= self.first && category_index < self.first + self.visible
    }

    fn row_top(&self, category_index: usize) -> f64 {
        self.rows.position(category_index - self.first)
    }

    fn bar_rect(&self, point: &TornadoChartPoint) -> Rect {
        let length = self.values.length(point.value.max(0.0));
        let left = if point.series_index == 0 { self.mid - length } else { self.mid };
        Rect::new(left, self.row_top(point.category_index), length, self.rows.bandwidth())
    }
}

pub struct TornadoChart {
    viewport: Viewport,
    options: RenderOptions,
    measurer: Box<dyn TextMeasurer>,
    formatters: ColumnFormatterCache,
    label_config: LabelConfig,
    scene: SceneGraph,
    main: NodeId,
    columns: NodeId,
    axes: NodeId,
    labels: NodeId,
    categories: NodeId,
    scrollbar: NodeId,
    legend: NodeId,
    data: TornadoChartDataView,
    scroll_offset: usize,
}

impl TornadoChart {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_options(viewport, RenderOptions::default(), Box::new(EstimatedTextMeasurer::default()))
    }

    pub fn with_options(viewport: Viewport, options: RenderOptions, measurer: Box<dyn TextMeasurer>) -> Self {
        let mut scene = SceneGraph::new(ElementKind::Svg);
        let root = scene.root();
        scene.classed(root, ROOT_CLASS, true);

        let main = scene.append_classed(root, ElementKind::Group, MAIN_CLASS);
        scene.append_classed(main, ElementKind::Rect, CLEAR_CATCHER_CLASS);
        let columns = scene.append_classed(main, ElementKind::Group, COLUMNS_CLASS);
        let axes = scene.append_classed(main, ElementKind::Group, AXES_CLASS);
        let labels = scene.append_classed(main, ElementKind::Group, LABELS_CLASS);
        let categories = scene.append_classed(main, ElementKind::Group, CATEGORIES_CLASS);
        let scrollbar = scene.append_classed(root, ElementKind::Group, SCROLLBAR_CLASS);
        let legend = scene.append_classed(root, ElementKind::Group, LEGEND_CLASS);

        let data = TornadoChartDataView {
            settings: TornadoChartSettings::themed(&options.theme),
            ..Default::default()
        };
        let mut chart = Self {
            viewport,
            options,
            measurer,
            formatters: ColumnFormatterCache::new(),
            label_config: LabelConfig::default().with_label_class(LABEL_TEXT_CLASS),
            scene,
            main,
            columns,
            axes,
            labels,
            categories,
            scrollbar,
            legend,
            data,
            scroll_offset: 0,
        };
        chart.render();
        chart
    }

    pub fn capabilities() -> VisualCapabilities {
        tornado_capabilities()
    }

    /// Convert `data_view` without touching the scene.
    pub fn converter(&mut self, data_view: &DataView) -> Result<TornadoChartDataView, TornadoError> {
        convert(data_view, &self.options.theme, &mut self.formatters)
    }

    /// Convert and redraw. A view that fails to convert is logged and drawn as empty.
    pub fn update(&mut self, data_view: &DataView) {
        self.data = match self.converter(data_view) {
            Ok(data) => data,
            Err(err) => {
                warn!(%err, "tornado data view rejected");
                TornadoChartDataView {
                    settings: TornadoChartSettings::parse(data_view.metadata.objects.as_ref(), &self.options.theme),
                    ..Default::default()
                }
            }
        };
        self.render();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.render();
    }

    /// Make `first_category` the top visible row (clamped).
    pub fn scroll_to(&mut self, first_category: usize) {
        self.scroll_offset = first_category;
        self.render();
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn data(&self) -> &TornadoChartDataView {
        &self.data
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn root(&self) -> NodeId {
        self.scene.root()
    }

    pub fn main(&self) -> NodeId {
        self.main
    }

    /// Move the scene clock forward, progressing running transitions.
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.scene.advance(elapsed_ms);
    }

    pub fn finish_transitions(&mut self) {
        self.scene.finish_transitions();
    }

    pub fn to_svg(&self) -> String {
        self.scene.to_svg()
    }

    fn render(&mut self) {
        let layout = self.layout();
        self.scroll_offset = layout.first;

        let root = self.scene.root();
        self.scene.set_attr(root, "width", self.viewport.width);
        self.scene.set_attr(root, "height", self.viewport.height);
        if let Some(catcher) = self.scene.select(self.main, &Selector::class(CLEAR_CATCHER_CLASS)) {
            self.scene.set_attr(catcher, "x", 0.0);
            self.scene.set_attr(catcher, "y", 0.0);
            self.scene.set_attr(catcher, "width", self.viewport.width);
            self.scene.set_attr(catcher, "height", self.viewport.height);
            self.scene.set_style(catcher, "fill", Color::TRANSPARENT);
        }

        self.render_columns(&layout);
        self.render_axis(&layout);
        self.render_labels(&layout);
        self.render_categories(&layout);
        self.render_scrollbar(&layout);
        self.render_legend();
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            categories = layout.total,
            visible = layout.visible,
            first = layout.first,
            "tornado rendered"
        );
    }

    fn legend_height(&self) -> f64 {
        let legend = &self.data.settings.legend;
        if legend.show && !self.data.legend.is_empty() { self.options.legend_height } else { 0.0 }
    }

    fn layout(&self) -> Layout {
        let o = &self.options;
        let (width, height) = (self.viewport.width.max(0.0), self.viewport.height.max(0.0));
        let legend_height = self.legend_height();
        let top_legend = if self.data.settings.legend.position == LegendPosition::Top { legend_height } else { 0.0 };
        let top = o.insets.top as f64 + top_legend;
        let available_height = (height - o.insets.vsum() as f64 - legend_height).max(0.0);

        let total = if self.data.series.is_empty() { 0 } else { self.data.categories.len() };
        let capacity = ((available_height / o.min_category_height.max(1.0)).floor() as usize).max(1);
        let visible = total.min(capacity);
        let first = self.scroll_offset.min(total - visible);
        let scrolling = visible < total;

        let right = width - o.insets.right as f64 - if scrolling { o.scrollbar_width } else { 0.0 };
        let category_width = if self.data.settings.category_axis.show && total > 0 {
            let widest = self
                .data
                .categories
                .iter()
                .map(|c| self.measure(&c.formatted, self.data.settings.category_axis.font_size))
                .fold(0.0f64, f64::max);
            (width * o.category_label_width_ratio).min(widest + 10.0)
        } else {
            0.0
        };
        let bar_left = o.insets.left as f64 + category_width;
        let bar_width = (right - bar_left).max(0.0);
        let mid = bar_left + bar_width / 2.0;
        let step = if visible > 0 { available_height / visible as f64 } else { 0.0 };

        Layout {
            width,
            top,
            available_height,
            first,
            visible,
            total,
            scrolling,
            category_width,
            bar_left,
            mid,
            rows: BandScale::new(top, step, o.bar_padding),
            values: LinearScale::new(0.0, self.data.max_value, 0.0, bar_width / 2.0),
        }
    }

    fn measure(&self, text: &str, font_size_pt: f64) -> f64 {
        get_text_size(text, font_size_pt, &self.label_config, self.measurer.as_ref()).width
    }

    fn visible_points(&self, layout: &Layout) -> Vec<&TornadoChartPoint> {
        self.data
            .data_points
            .iter()
            .filter(|p| layout.is_visible(p.category_index))
            .collect()
    }

    fn render_columns(&mut self, layout: &Layout) {
        let points: Vec<(Rect, Color, JoinKey)> = self
            .visible_points(layout)
            .into_iter()
            .map(|p| (layout.bar_rect(p), p.color, JoinKey::Key(p.identity.key_without_highlight())))
            .collect();
        let joined = self.scene.join(
            self.columns,
            &Selector::tag_class(ElementKind::Rect, COLUMN_CLASS),
            ElementKind::Rect,
            Some(COLUMN_CLASS),
            &points,
            |(_, _, key), _| key.clone(),
        );
        self.scene.remove_exiting(&joined);

        for &(id, i) in &joined.entered {
            // Bars grow out of the axis.
            self.scene.set_attr(id, "x", layout.mid);
            self.scene.set_attr(id, "width", 0.0);
            self.scene.set_attr(id, "y", points[i].0.top);
            self.scene.set_attr(id, "height", points[i].0.height);
        }
        for (id, i) in joined.all() {
            let (rect, color, _) = &points[i];
            self.scene.set_style(id, "fill", *color);
            self.scene.transition(
                id,
                Transition::new(self.options.animation_duration_ms)
                    .ease(self.options.easing)
                    .attr("x", rect.left)
                    .attr("y", rect.top)
                    .attr("width", rect.width)
                    .attr("height", rect.height),
            );
        }
    }

    fn render_axis(&mut self, layout: &Layout) {
        let lines: Vec<f64> = if layout.visible > 0 { vec![layout.mid] } else { Vec::new() };
        let joined = self.scene.join(
            self.axes,
            &Selector::tag_class(ElementKind::Line, AXIS_CLASS),
            ElementKind::Line,
            Some(AXIS_CLASS),
            &lines,
            |_, i| JoinKey::Index(i),
        );
        self.scene.remove_exiting(&joined);
        let bottom = layout.top + layout.rows.step() * layout.visible as f64;
        for (id, _) in joined.all() {
            self.scene.set_attr(id, "x1", layout.mid);
            self.scene.set_attr(id, "x2", layout.mid);
            self.scene.set_attr(id, "y1", layout.top);
            self.scene.set_attr(id, "y2", bottom);
            self.scene.set_style(id, "stroke", self.options.theme.axis_line);
            self.scene.set_style(id, "stroke-width", 1.0);
        }
    }

    fn render_labels(&mut self, layout: &Layout) {
        let settings = &self.data.settings;
        let labels: Vec<Label> = if settings.labels.show {
            self.visible_points(layout)
                .into_iter()
                .filter(|p| !p.label.is_empty())
                .map(|p| self.bar_label(layout, p))
                .collect()
        } else {
            Vec::new()
        };
        animate_default_labels(
            &mut self.scene,
            self.labels,
            &labels,
            self.options.animation_duration_ms,
            true,
            self.options.easing,
            &self.label_config,
        );
    }

    /// Inside the bar end when the text fits, otherwise just past it.
    fn bar_label(&self, layout: &Layout, point: &TornadoChartPoint) -> Label {
        let settings = &self.data.settings;
        let font_size = settings.labels.font_size;
        let size = get_text_size(&point.label, font_size, &self.label_config, self.measurer.as_ref());
        let bar = layout.bar_rect(point);
        let pad = self.options.label_padding;
        let inside = size.width + 2.0 * pad <= bar.width;
        let left = match (point.series_index == 0, inside) {
            (true, true) => bar.left + pad,
            (true, false) => bar.left - pad - size.width,
            (false, true) => bar.right() - pad - size.width,
            (false, false) => bar.right() + pad,
        };
        let top = bar.top + (bar.height - size.height) / 2.0;
        let fill = if inside { settings.inside_label_color } else { settings.labels.label_color };
        Label::new(point.label.clone(), Rect::new(left, top, size.width, size.height))
            .with_fill(fill)
            .with_font_size(font_size)
            .with_identity(point.identity.clone())
    }

    fn render_categories(&mut self, layout: &Layout) {
        let axis = &self.data.settings.category_axis;
        let rows: Vec<(usize, String)> = if axis.show {
            (layout.first..layout.first + layout.visible)
                .map(|i| (i, self.data.categories[i].formatted.clone()))
                .collect()
        } else {
            Vec::new()
        };
        let max_width = (layout.category_width - 10.0).max(0.0);
        let font_size = axis.font_size;
        let fill = axis.fill;
        let shown: Vec<String> = rows.iter().map(|(_, text)| self.truncate(text, font_size, max_width)).collect();

        let joined = self.scene.join(
            self.categories,
            &Selector::tag_class(ElementKind::Text, CATEGORY_TEXT_CLASS),
            ElementKind::Text,
            Some(CATEGORY_TEXT_CLASS),
            &rows,
            |(_, text), _| JoinKey::Key(text.clone()),
        );
        self.scene.remove_exiting(&joined);
        for (id, i) in joined.all() {
            let (category_index, full) = &rows[i];
            let y = layout.row_top(*category_index) + layout.rows.bandwidth() / 2.0;
            self.scene.set_attr(id, "x", layout.bar_left - 5.0);
            self.scene.set_attr(id, "y", y);
            self.scene.set_attr(id, "dy", "0.35em");
            self.scene.set_style(id, "fill", fill);
            self.scene.set_style(id, "font-size", px_string_from_pt(font_size));
            self.scene.set_style(id, "text-anchor", "end");
            self.scene.set_text(id, Some(shown[i].as_str()));
            let title = self.scene.append_classed(id, ElementKind::Title, CATEGORY_TITLE_CLASS);
            self.scene.set_text(title, Some(full.as_str()));
        }
    }

    /// Cut `text` to `max_width`, ending in an ellipsis when shortened.
    fn truncate(&self, text: &str, font_size_pt: f64, max_width: f64) -> String {
        if self.measure(text, font_size_pt) <= max_width {
            return text.to_string();
        }
        let chars: Vec<char> = text.chars().collect();
        for end in (0..chars.len()).rev() {
            let candidate = format!("{}{ELLIPSIS}", chars[..end].iter().collect::<String>());
            if self.measure(&candidate, font_size_pt) <= max_width {
                return candidate;
            }
        }
        ELLIPSIS.to_string()
    }

    fn render_scrollbar(&mut self, layout: &Layout) {
        let thumbs: Vec<Rect> = if layout.scrolling {
            let total = layout.total as f64;
            let x = layout.width - self.options.insets.right as f64 - self.options.scrollbar_width;
            let y = layout.top + layout.available_height * layout.first as f64 / total;
            let h = layout.available_height * layout.visible as f64 / total;
            vec![Rect::new(x, y, self.options.scrollbar_width, h)]
        } else {
            Vec::new()
        };
        let joined = self.scene.join(
            self.scrollbar,
            &Selector::tag(ElementKind::Rect),
            ElementKind::Rect,
            Some(SCROLLBAR_THUMB_CLASS),
            &thumbs,
            |_, i| JoinKey::Index(i),
        );
        self.scene.remove_exiting(&joined);
        for (id, i) in joined.all() {
            let r = thumbs[i];
            self.scene.set_attr(id, "x", r.left);
            self.scene.set_attr(id, "y", r.top);
            self.scene.set_attr(id, "width", r.width);
            self.scene.set_attr(id, "height", r.height);
            self.scene.set_attr(id, "rx", r.width / 2.0);
            self.scene.set_attr(id, "ry", r.width / 2.0);
            self.scene.set_style(id, "fill", self.options.theme.scrollbar);
        }
    }

    fn render_legend(&mut self) {
        self.scene.clear_children(self.legend);
        let height = self.legend_height();
        if height <= 0.0 {
            return;
        }
        let settings = &self.data.settings;
        let font_size = settings.category_axis.font_size;
        let y = match settings.legend.position {
            LegendPosition::Top => self.options.insets.top as f64,
            LegendPosition::Bottom => self.viewport.height - self.options.insets.bottom as f64 - height,
        };
        let baseline = y + height / 2.0;
        let mut x = self.options.insets.left as f64;
        let mut items: Vec<(Option<Color>, String)> = Vec::new();
        if settings.legend.show_title {
            if let Some(title) = self.data.legend_title.clone() {
                items.push((None, title));
            }
        }
        items.extend(self.data.legend.iter().map(|item| (Some(item.color), item.label.clone())));
        let text_fill = settings.category_axis.fill;

        for (color, text) in items {
            if let Some(color) = color {
                let swatch = self.scene.append_classed(self.legend, ElementKind::Rect, "legend-swatch");
                self.scene.set_attr(swatch, "x", x);
                self.scene.set_attr(swatch, "y", baseline - 5.0);
                self.scene.set_attr(swatch, "width", 10.0);
                self.scene.set_attr(swatch, "height", 10.0);
                self.scene.set_style(swatch, "fill", color);
                x += 14.0;
            }
            let class = if color.is_some() { "legend-text" } else { "legend-title" };
            let node = self.scene.append_classed(self.legend, ElementKind::Text, class);
            self.scene.set_attr(node, "x", x);
            self.scene.set_attr(node, "y", baseline);
            self.scene.set_attr(node, "dy", "0.35em");
            self.scene.set_style(node, "fill", text_fill);
            self.scene.set_style(node, "font-size", px_string_from_pt(font_size));
            self.scene.set_text(node, Some(text.as_str()));
            x += self.measure(&text, font_size) + 16.0;
        }
    }
}
