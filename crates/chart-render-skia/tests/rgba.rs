// File: crates/chart-render-skia/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use chart_core::{Color, ElementKind, SceneGraph};
use chart_render_skia::SkiaRenderer;

#[test]
fn render_rgba8_buffer() {
    let mut scene = SceneGraph::new(ElementKind::Svg);
    let root = scene.root();
    let r = scene.append(root, ElementKind::Rect);
    scene.set_attr(r, "x", 10.0);
    scene.set_attr(r, "y", 10.0);
    scene.set_attr(r, "width", 20.0);
    scene.set_attr(r, "height", 20.0);
    scene.set_style(r, "fill", Color::from_rgb(255, 0, 0));

    let renderer = SkiaRenderer::new();
    let img = renderer.render_rgba8(&scene, 40, 40).expect("rgba render");
    assert_eq!(img.width as usize * img.height as usize * 4, img.pixels.len());
    assert_eq!(img.stride, img.width as usize * 4);

    // Top-left pixel is the white background.
    assert_eq!(&img.pixels[0..4], &[255, 255, 255, 255]);
    // Center of the rect is red.
    let at = |x: usize, y: usize| &img.pixels[y * img.stride + x * 4..y * img.stride + x * 4 + 4];
    assert_eq!(at(20, 20), &[255, 0, 0, 255]);
}

#[test]
fn transparent_and_hidden_elements_do_not_paint() {
    let mut scene = SceneGraph::new(ElementKind::Svg);
    let root = scene.root();
    let g = scene.append(root, ElementKind::Group);
    scene.set_attr(g, "transform", "translate(5,5)");
    let r = scene.append(g, ElementKind::Rect);
    scene.set_attr(r, "width", 10.0);
    scene.set_attr(r, "height", 10.0);
    scene.set_style(r, "opacity", 0.0);

    let img = SkiaRenderer::new().with_background(Color::BLACK).render_rgba8(&scene, 20, 20).expect("render");
    assert!(img.pixels.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}
