use chart_core::format::number::format_number;
use chart_core::labels::{ColumnFormatterCache, DataLabelsSettings};
use chart_core::Value;
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn bench_format(c: &mut Criterion) {
    let values: Vec<f64> = (0..1_000).map(|i| (i as f64 * 7919.13).sin() * 1.0e6).collect();

    c.bench_function("format_number_grouped", |b| {
        b.iter(|| {
            for v in &values {
                black_box(format_number(*v, "#,0.00;(#,0.00)"));
            }
        })
    });

    let settings = DataLabelsSettings { display_units: 1e6, precision: Some(2), ..Default::default() };
    c.bench_function("cached_label_formatter", |b| {
        let mut cache = ColumnFormatterCache::new();
        b.iter(|| {
            for v in &values {
                let f = cache.get_or_create(Some("#,0"), &settings, None);
                black_box(f.format(&Value::Number(*v)));
            }
        })
    });
}

criterion_group!(benches, bench_format);
criterion_main!(benches);
