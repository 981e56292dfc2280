use chart_core::labels::{draw_default_labels, remove_duplicates, DataLabelLayout, DrawLabelsOptions};
use chart_core::labels::{get_data_label_layout_options, CartesianChartType};
use chart_core::{ElementKind, Label, LabelConfig, LabelDataPoint, LabelParent, Point, Rect, SceneGraph, Size};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_labels(n: usize) -> Vec<Label> {
    (0..n)
        .map(|i| {
            let x = (i % 100) as f64 * 12.0;
            let y = (i / 100) as f64 * 14.0;
            Label::new(format!("{i}"), Rect::new(x, y, 10.0, 12.0)).with_key(format!("k{i}"))
        })
        .collect()
}

fn gen_points(n: usize) -> Vec<LabelDataPoint> {
    (0..n)
        .map(|i| {
            // every fourth point repeats an earlier anchor
            let j = if i % 4 == 3 { i - 1 } else { i };
            let p = Point::new((j % 50) as f64 * 20.0, (j / 50) as f64 * 20.0);
            LabelDataPoint::new(format!("{}", j % 7), Size::new(12.0, 10.0), LabelParent::point(p))
        })
        .collect()
}

fn bench_draw(c: &mut Criterion) {
    let config = LabelConfig::default();
    let mut group = c.benchmark_group("draw_default_labels");
    for &n in &[100usize, 1_000usize] {
        let labels = gen_labels(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("rerender_{n}")), &labels, |b, labels| {
            let mut scene = SceneGraph::new(ElementKind::Svg);
            let ctx = scene.root();
            draw_default_labels(&mut scene, ctx, labels, DrawLabelsOptions::default(), &config);
            b.iter(|| black_box(draw_default_labels(&mut scene, ctx, labels, DrawLabelsOptions::default(), &config)));
        });
    }
    group.finish();
}

fn bench_dedup_and_layout(c: &mut Criterion) {
    let points = gen_points(2_000);
    c.bench_function("remove_duplicates_2000", |b| {
        b.iter_batched(|| points.clone(), |p| black_box(remove_duplicates(p)), BatchSize::SmallInput);
    });
    let config = LabelConfig::default();
    let layout = DataLabelLayout::new(get_data_label_layout_options(CartesianChartType::Scatter, &config), config);
    let unique = remove_duplicates(points);
    c.bench_function("scatter_layout_unique", |b| {
        b.iter(|| black_box(layout.layout(&unique, Size::new(1000.0, 800.0))));
    });
}

criterion_group!(benches, bench_draw, bench_dedup_and_layout);
criterion_main!(benches);
