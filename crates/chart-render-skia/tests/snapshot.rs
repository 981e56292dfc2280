// File: crates/chart-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic scene (no text) to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chart_core::labels::{draw_label_background, draw_label_leader_lines};
use chart_core::{Color, ElementKind, Label, LabelConfig, Point, Rect, SceneGraph};
use chart_render_skia::SkiaRenderer;

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn render_bytes() -> Vec<u8> {
    let mut scene = SceneGraph::new(ElementKind::Svg);
    let root = scene.root();
    let ctx = scene.append_classed(root, ElementKind::Group, "labelBackgroundGraphicsContext");
    let labels = vec![
        Label::new("a", Rect::new(20.0, 20.0, 40.0, 12.0))
            .with_fill(Color::from_rgb(0x01, 0xb8, 0xaa))
            .with_leader_line(vec![Point::new(10.0, 60.0), Point::new(40.0, 32.0)]),
        Label::new("b", Rect::new(80.0, 50.0, 30.0, 12.0)).with_fill(Color::from_rgb(0xfd, 0x62, 0x5e)),
    ];
    let config = LabelConfig::default();
    draw_label_background(&mut scene, ctx, &labels, Some(Color::from_rgb(0x37, 0x46, 0x49)), Some(0.6), &config);
    draw_label_leader_lines(&mut scene, root, &labels, None, None, &config);
    SkiaRenderer::new().render_png(&scene, 128, 96).expect("render png")
}

#[test]
fn golden_label_backgrounds() {
    let bytes = render_bytes();
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("label_backgrounds.png");
    if bless_mode() {
        std::fs::create_dir_all(&snap_dir).ok();
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }
    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions());
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
