// File: crates/chart-core/tests/labels_render.rs
// Purpose: Label join semantics against the scene graph: keys, rows, tooltips, backgrounds, leader lines.

use chart_core::labels::{
    animate_default_labels, draw_default_labels, draw_label_background, draw_label_leader_lines, DrawLabelsOptions,
};
use chart_core::scene::JoinKey;
use chart_core::{Color, Easing, ElementKind, Label, LabelConfig, Point, Rect, SceneGraph, SelectionId, Selector};

fn scene() -> (SceneGraph, chart_core::NodeId) {
    let mut scene = SceneGraph::new(ElementKind::Svg);
    let root = scene.root();
    let ctx = scene.append_classed(root, ElementKind::Group, "labelGraphicsContext");
    (scene, ctx)
}

fn labels(texts: &[&str]) -> Vec<Label> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Label::new(*t, Rect::new(i as f64 * 40.0, 10.0, 30.0, 12.0)).with_key(*t))
        .collect()
}

fn label_texts(scene: &SceneGraph, ctx: chart_core::NodeId) -> Vec<String> {
    scene
        .select_all(ctx, &Selector::class("label"))
        .into_iter()
        .map(|id| scene.text_content(id))
        .collect()
}

#[test]
fn one_element_per_visible_label() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let mut input = labels(&["a", "b", "c"]);
    input[1] = input[1].clone().hidden();
    let ids = draw_default_labels(&mut scene, ctx, &input, DrawLabelsOptions::default(), &config);
    assert_eq!(ids.len(), 2);
    assert_eq!(label_texts(&scene, ctx), vec!["a", "c"]);
}

#[test]
fn positions_and_styles_follow_bounding_box() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let input = vec![Label::new("x", Rect::new(10.0, 20.0, 30.0, 12.0)).with_fill(Color::from_rgb(0x11, 0x22, 0x33))];
    let ids = draw_default_labels(&mut scene, ctx, &input, DrawLabelsOptions::default(), &config);
    let id = ids[0];
    assert_eq!(scene.attr_f64(id, "x"), Some(25.0));
    assert_eq!(scene.attr_f64(id, "y"), Some(32.0));
    assert_eq!(scene.attr(id, "dy").and_then(|v| v.as_text()), Some("-0.15em"));
    assert_eq!(scene.style(id, "fill").and_then(|v| v.as_text()), Some("#112233"));
    assert_eq!(scene.style(id, "font-size").and_then(|v| v.as_text()), Some("12px"));
    assert_eq!(scene.style(id, "text-anchor").and_then(|v| v.as_text()), Some("middle"));
}

#[test]
fn numeric_labels_skip_baseline_nudge() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let input = labels(&["1"]);
    let ids = draw_default_labels(&mut scene, ctx, &input, DrawLabelsOptions::default(), &config);
    assert!(scene.attr(ids[0], "dy").is_some());
    let opts = DrawLabelsOptions { numeric: true, ..Default::default() };
    let ids = draw_default_labels(&mut scene, ctx, &input, opts, &config);
    assert!(scene.attr(ids[0], "dy").is_none());
}

#[test]
fn background_padding_lifts_baseline() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let input = vec![Label::new("x", Rect::new(0.0, 0.0, 10.0, 10.0)).with_background(true)];
    let ids = draw_default_labels(&mut scene, ctx, &input, DrawLabelsOptions::default(), &config);
    assert_eq!(scene.attr_f64(ids[0], "y"), Some(8.0));
}

#[test]
fn empty_render_removes_previous_labels() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    draw_default_labels(&mut scene, ctx, &labels(&["a", "b"]), DrawLabelsOptions::default(), &config);
    assert_eq!(label_texts(&scene, ctx).len(), 2);
    let ids = draw_default_labels(&mut scene, ctx, &[], DrawLabelsOptions::default(), &config);
    assert!(ids.is_empty());
    assert!(label_texts(&scene, ctx).is_empty());
}

#[test]
fn stable_keys_reuse_elements() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let first = draw_default_labels(&mut scene, ctx, &labels(&["a", "b", "c"]), DrawLabelsOptions::default(), &config);
    let second = draw_default_labels(&mut scene, ctx, &labels(&["b", "c", "d"]), DrawLabelsOptions::default(), &config);
    assert_eq!(second[0], first[1]);
    assert_eq!(second[1], first[2]);
    assert!(!scene.contains(first[0]));
    assert_eq!(label_texts(&scene, ctx).len(), 3);
}

#[test]
fn identity_key_is_used_when_no_explicit_key() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let id = SelectionId::builder().with_category("Country", 2).create();
    let input = vec![Label::new("x", Rect::new(0.0, 0.0, 10.0, 10.0)).with_identity(id.with_highlight(true))];
    let ids = draw_default_labels(&mut scene, ctx, &input, DrawLabelsOptions::default(), &config);
    assert_eq!(scene.key(ids[0]), Some(&JoinKey::Key(id.key_without_highlight())));
}

#[test]
fn second_row_uses_half_height() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let input = vec![
        Label::new("Sales", Rect::new(0.0, 0.0, 40.0, 20.0)).with_second_row("12K"),
        Label::untitled(Rect::new(50.0, 0.0, 40.0, 20.0)).with_second_row("7K"),
        Label::new("Only", Rect::new(100.0, 0.0, 40.0, 20.0)),
    ];
    let opts = DrawLabelsOptions { two_rows: true, ..Default::default() };
    draw_default_labels(&mut scene, ctx, &input, opts, &config);
    let rows = scene.select_all(ctx, &Selector::class("label-second-line"));
    assert_eq!(rows.len(), 2);
    assert_eq!(scene.text_content(rows[0]), "12K");
    assert_eq!(scene.attr_f64(rows[0], "y"), Some(10.0));
    assert_eq!(scene.attr_f64(rows[1], "y"), Some(20.0));

    draw_default_labels(&mut scene, ctx, &input, DrawLabelsOptions::default(), &config);
    assert!(scene.select_all(ctx, &Selector::class("label-second-line")).is_empty());
}

#[test]
fn tooltips_attach_titles() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let input = vec![Label::new("x", Rect::new(0.0, 0.0, 10.0, 10.0)).with_tooltip("Total: 12")];
    let opts = DrawLabelsOptions { has_tooltip: true, ..Default::default() };
    let ids = draw_default_labels(&mut scene, ctx, &input, opts, &config);
    let titles = scene.select_all(ids[0], &Selector::tag(ElementKind::Title));
    assert_eq!(titles.len(), 1);
    assert_eq!(scene.text_content(titles[0]), "Total: 12");
    assert_eq!(scene.style(ids[0], "pointer-events").and_then(|v| v.as_text()), Some("all"));

    // Re-rendering does not stack titles.
    let ids = draw_default_labels(&mut scene, ctx, &input, opts, &config);
    assert_eq!(scene.select_all(ids[0], &Selector::tag(ElementKind::Title)).len(), 1);
}

#[test]
fn custom_label_class() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default().with_label_class("label-text");
    draw_default_labels(&mut scene, ctx, &labels(&["a"]), DrawLabelsOptions::default(), &config);
    assert_eq!(scene.select_all(ctx, &Selector::class("label-text")).len(), 1);
    assert!(scene.select_all(ctx, &Selector::class("label")).is_empty());
}

#[test]
fn animated_labels_fade_in_and_out() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let ids = animate_default_labels(&mut scene, ctx, &labels(&["a", "b"]), 200.0, false, Easing::LINEAR, &config);
    assert_eq!(scene.style(ids[0], "opacity").and_then(|v| v.as_number()), Some(0.0));
    scene.advance(100.0);
    let mid = scene.style(ids[0], "opacity").and_then(|v| v.as_number()).unwrap_or(-1.0);
    assert!((mid - 0.5).abs() < 1e-9, "opacity halfway: {mid}");
    scene.advance(100.0);
    assert_eq!(scene.style(ids[0], "opacity").and_then(|v| v.as_number()), Some(1.0));
    assert_eq!(scene.attr_f64(ids[0], "x"), Some(15.0));

    animate_default_labels(&mut scene, ctx, &labels(&["b"]), 200.0, false, Easing::LINEAR, &config);
    assert!(scene.contains(ids[0]), "exiting label stays while fading");
    scene.advance(200.0);
    assert!(!scene.contains(ids[0]));
    assert_eq!(label_texts(&scene, ctx), vec!["b"]);
}

#[test]
fn draw_interrupts_running_animation() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let ids = animate_default_labels(&mut scene, ctx, &labels(&["a"]), 500.0, true, Easing::default(), &config);
    assert!(scene.has_transition(ids[0]));
    draw_default_labels(&mut scene, ctx, &labels(&["a"]), DrawLabelsOptions::default(), &config);
    assert!(!scene.has_transition(ids[0]));
}

#[test]
fn background_rects_are_padded() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let input = vec![
        Label::new("x", Rect::new(10.0, 20.0, 30.0, 12.0)),
        Label { text: None, second_row_text: None, ..Label::new("", Rect::new(50.0, 20.0, 30.0, 12.0)) },
    ];
    let rects = draw_label_background(&mut scene, ctx, &input, None, None, &config);
    assert_eq!(rects.len(), 2);
    assert_eq!(scene.attr_f64(rects[0], "x"), Some(6.0));
    assert_eq!(scene.attr_f64(rects[0], "y"), Some(18.0));
    assert_eq!(scene.attr_f64(rects[0], "width"), Some(38.0));
    assert_eq!(scene.attr_f64(rects[0], "height"), Some(16.0));
    assert_eq!(scene.attr_f64(rects[0], "rx"), Some(4.0));
    assert_eq!(scene.style(rects[0], "fill").and_then(|v| v.as_text()), Some("#000000"));
    assert_eq!(scene.style(rects[0], "fill-opacity").and_then(|v| v.as_number()), Some(1.0));
    assert_eq!(scene.attr_f64(rects[1], "height"), Some(0.0));
}

#[test]
fn leader_lines_live_in_their_own_group() {
    let (mut scene, ctx) = scene();
    let config = LabelConfig::default();
    let fill = Color::from_rgb(0xaa, 0x00, 0x00);
    let input = vec![
        Label::new("a", Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_fill(fill)
            .with_leader_line(vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]),
        Label::new("b", Rect::new(20.0, 0.0, 10.0, 10.0)),
    ];
    let lines = draw_label_leader_lines(&mut scene, ctx, &input, None, None, &config);
    assert_eq!(lines.len(), 2);
    let groups = scene.select_all(ctx, &Selector::class("leader-lines"));
    assert_eq!(groups.len(), 1);
    assert_eq!(scene.parent(lines[0]), Some(groups[0]));
    assert!(scene.has_class(lines[0], "line-label"));
    assert_eq!(scene.attr(lines[0], "points").and_then(|v| v.as_text()), Some("1,2 3.5,4"));
    assert!(scene.attr(lines[1], "points").is_none());
    assert_eq!(scene.style(lines[0], "stroke").and_then(|v| v.as_text()), Some("#aa0000"));
    assert_eq!(scene.style(lines[0], "stroke-width").and_then(|v| v.as_number()), Some(1.0));

    let by_text = |l: &Label, _: usize| JoinKey::from(l.text.clone().unwrap_or_default());
    let again = draw_label_leader_lines(&mut scene, ctx, &input[..1], Some(&by_text), Some(Color::BLACK), &config);
    assert_eq!(again.len(), 1);
    assert_eq!(scene.select_all(ctx, &Selector::class("leader-lines")).len(), 1);
    assert_eq!(scene.style(again[0], "stroke").and_then(|v| v.as_text()), Some("#000000"));
}
