// File: crates/chart-core/src/labels/render.rs
// Summary: Synchronize label view models into scene text/rect/polyline elements (plain and animated).

use tracing::debug;

use super::{Label, LabelConfig};
use crate::color::Color;
use crate::ease::Easing;
use crate::scene::{ElementKind, JoinKey, NodeId, SceneGraph, Selector, Transition};
use crate::text::px_string_from_pt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawLabelsOptions {
    /// Numeric labels use a tight box and skip the baseline nudge.
    pub numeric: bool,
    /// Render `second_row_text` as a second element per label.
    pub two_rows: bool,
    /// Attach a `title` tooltip and make the elements interactive.
    pub has_tooltip: bool,
}

/// Join key of a label: explicit key, then identity, then position.
pub fn label_key(label: &Label, index: usize) -> JoinKey {
    if let Some(key) = label.key.as_deref().filter(|k| !k.is_empty()) {
        return JoinKey::Key(key.to_string());
    }
    if let Some(identity) = &label.identity {
        return JoinKey::Key(identity.key_without_highlight());
    }
    JoinKey::Index(index)
}

fn second_row_key(label: &Label, index: usize) -> JoinKey {
    match &label.identity {
        Some(identity) => JoinKey::Key(identity.key_without_highlight()),
        None => JoinKey::Index(index),
    }
}

fn center_x(label: &Label) -> f64 {
    label.bounding_box.left + label.bounding_box.width / 2.0
}

fn baseline_y(label: &Label, box_height: f64, config: &LabelConfig) -> f64 {
    let y = label.bounding_box.top + box_height;
    if label.has_background { y - config.vertical_background_padding } else { y }
}

fn font_size_px(label: &Label, config: &LabelConfig) -> String {
    let pt = label.font_size.filter(|s| *s > 0.0).unwrap_or(config.default_font_size_pt);
    px_string_from_pt(pt)
}

fn apply_text_attrs(scene: &mut SceneGraph, id: NodeId, label: &Label, y: f64, numeric: bool, config: &LabelConfig) {
    scene.set_attr(id, "x", center_x(label));
    scene.set_attr(id, "y", y);
    if numeric {
        scene.remove_attr(id, "dy");
    } else {
        scene.set_attr(id, "dy", config.baseline_nudge.as_str());
    }
    scene.set_style(id, "fill", label.fill);
    scene.set_style(id, "font-size", font_size_px(label, config));
    scene.set_style(id, "text-anchor", label.text_anchor.as_css());
}

fn attach_tooltip(scene: &mut SceneGraph, id: NodeId, label: &Label) {
    let title = scene.append(id, ElementKind::Title);
    scene.set_text(title, label.tooltip.as_deref());
    scene.set_style(id, "pointer-events", "all");
}

/// Render `labels` as text elements under `context`, one per visible label.
/// Returns the primary text elements in label order.
pub fn draw_default_labels(
    scene: &mut SceneGraph,
    context: NodeId,
    labels: &[Label],
    options: DrawLabelsOptions,
    config: &LabelConfig,
) -> Vec<NodeId> {
    let visible: Vec<&Label> = labels.iter().filter(|l| l.is_visible).collect();
    let joined = scene.join(
        context,
        &Selector::class(&config.label_class),
        ElementKind::Text,
        Some(config.label_class.as_str()),
        &visible,
        |l, i| label_key(l, i),
    );
    let primary = joined.all();
    for &(id, i) in &primary {
        let label = visible[i];
        scene.interrupt(id);
        scene.set_text(id, label.text.as_deref());
        let y = baseline_y(label, label.bounding_box.height, config);
        apply_text_attrs(scene, id, label, y, options.numeric, config);
    }
    scene.remove_exiting(&joined);

    let second_rows: Vec<&Label> = if options.two_rows {
        visible
            .iter()
            .copied()
            .filter(|l| l.second_row_text.as_deref().map(|t| !t.is_empty()).unwrap_or(false))
            .collect()
    } else {
        Vec::new()
    };
    let joined_second = scene.join(
        context,
        &Selector::class(&config.second_line_class),
        ElementKind::Text,
        Some(config.second_line_class.as_str()),
        &second_rows,
        |l, i| second_row_key(l, i),
    );
    let secondary = joined_second.all();
    for &(id, i) in &secondary {
        let label = second_rows[i];
        scene.interrupt(id);
        scene.set_text(id, label.second_row_text.as_deref());
        // Below a primary row the second row centers on the upper half.
        let box_height = if label.text.is_some() {
            label.bounding_box.height / 2.0
        } else {
            label.bounding_box.height
        };
        let y = baseline_y(label, box_height, config);
        apply_text_attrs(scene, id, label, y, options.numeric, config);
    }
    scene.remove_exiting(&joined_second);

    if options.has_tooltip {
        for &(id, i) in &primary {
            attach_tooltip(scene, id, visible[i]);
        }
        for &(id, i) in &secondary {
            attach_tooltip(scene, id, second_rows[i]);
        }
    }

    debug!(labels = primary.len(), second_rows = secondary.len(), "draw default labels");
    primary.into_iter().map(|(id, _)| id).collect()
}

/// Like `draw_default_labels` (single row) but positions and opacity change
/// through a transition; removed labels fade out before they are deleted.
pub fn animate_default_labels(
    scene: &mut SceneGraph,
    context: NodeId,
    labels: &[Label],
    duration_ms: f64,
    numeric: bool,
    easing: Easing,
    config: &LabelConfig,
) -> Vec<NodeId> {
    let visible: Vec<&Label> = labels.iter().filter(|l| l.is_visible).collect();
    let joined = scene.join(
        context,
        &Selector::class(&config.label_class),
        ElementKind::Text,
        Some(config.label_class.as_str()),
        &visible,
        |l, i| label_key(l, i),
    );
    for &(id, _) in &joined.entered {
        scene.set_style(id, "opacity", 0.0);
    }
    let all = joined.all();
    for &(id, i) in &all {
        let label = visible[i];
        scene.set_text(id, label.text.as_deref());
        scene.set_style(id, "fill", label.fill);
        scene.set_style(id, "font-size", font_size_px(label, config));
        scene.set_style(id, "text-anchor", label.text_anchor.as_css());
        let mut t = Transition::new(duration_ms)
            .ease(easing)
            .attr("x", center_x(label))
            .attr("y", label.bounding_box.top + label.bounding_box.height)
            .style("opacity", 1.0);
        if numeric {
            scene.remove_attr(id, "dy");
        } else {
            t = t.attr("dy", config.baseline_nudge.as_str());
        }
        scene.transition(id, t);
    }
    for &id in &joined.exiting {
        scene.transition(id, Transition::new(duration_ms).style("opacity", 0.0).remove());
    }
    debug!(labels = all.len(), exiting = joined.exiting.len(), duration_ms, "animate default labels");
    all.into_iter().map(|(id, _)| id).collect()
}

/// Diagnostic rounded rectangles behind each visible label.
pub fn draw_label_background(
    scene: &mut SceneGraph,
    context: NodeId,
    labels: &[Label],
    fill: Option<Color>,
    fill_opacity: Option<f64>,
    config: &LabelConfig,
) -> Vec<NodeId> {
    let visible: Vec<&Label> = labels.iter().filter(|l| l.is_visible).collect();
    let joined = scene.join(
        context,
        &Selector::tag(ElementKind::Rect),
        ElementKind::Rect,
        None,
        &visible,
        |l, i| label_key(l, i),
    );
    let hpad = config.horizontal_background_padding;
    let vpad = config.vertical_background_padding;
    let all = joined.all();
    for &(id, i) in &all {
        let label = visible[i];
        let bb = label.bounding_box;
        let height = if label.text.is_none() && label.second_row_text.is_none() {
            0.0
        } else {
            bb.height + 2.0 * vpad
        };
        scene.set_attr(id, "x", bb.left - hpad);
        scene.set_attr(id, "y", bb.top - vpad);
        scene.set_attr(id, "rx", config.background_rounding);
        scene.set_attr(id, "ry", config.background_rounding);
        scene.set_attr(id, "width", bb.width + 2.0 * hpad);
        scene.set_attr(id, "height", height);
        scene.set_style(id, "fill", fill.unwrap_or(Color::BLACK));
        scene.set_style(id, "fill-opacity", fill_opacity.unwrap_or(1.0));
    }
    scene.remove_exiting(&joined);
    all.into_iter().map(|(id, _)| id).collect()
}

fn points_attr(label: &Label) -> Option<String> {
    label.leader_line_points.as_ref().map(|pts| {
        pts.iter()
            .map(|p| format!("{},{}", crate::scene::fmt_num(p.x), crate::scene::fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Connector polylines for `labels`, kept in a dedicated group under `context`.
/// `key` identifies lines across renders (position when `None`); the stroke
/// uses `leader_line_color` or falls back to each label's fill.
pub fn draw_label_leader_lines(
    scene: &mut SceneGraph,
    context: NodeId,
    labels: &[Label],
    key: Option<&dyn Fn(&Label, usize) -> JoinKey>,
    leader_line_color: Option<Color>,
    config: &LabelConfig,
) -> Vec<NodeId> {
    let group_selector = Selector::class(&config.leader_lines_class);
    let group = match scene.select(context, &group_selector) {
        Some(g) => g,
        None => scene.append_classed(context, ElementKind::Group, &config.leader_lines_class),
    };
    let joined = scene.join(
        group,
        &Selector::tag(ElementKind::Polyline),
        ElementKind::Polyline,
        Some(config.leader_line_class.as_str()),
        labels,
        |l, i| match key {
            Some(k) => k(l, i),
            None => JoinKey::Index(i),
        },
    );
    let all = joined.all();
    for &(id, i) in &all {
        let label = &labels[i];
        match points_attr(label) {
            Some(points) => scene.set_attr(id, "points", points),
            None => scene.remove_attr(id, "points"),
        }
        scene.set_style(id, "stroke", leader_line_color.unwrap_or(label.fill));
        scene.set_style(id, "stroke-width", config.leader_line_stroke_width);
    }
    scene.remove_exiting(&joined);
    all.into_iter().map(|(id, _)| id).collect()
}
