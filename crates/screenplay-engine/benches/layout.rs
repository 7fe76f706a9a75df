use criterion::{Criterion, criterion_group, criterion_main};
use screenplay_engine::{LayoutConfig, layout_document, parse_fountain};
mod common;

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.sample_size(10);

    let doc = parse_fountain(&common::generate_screenplay(100));
    let config = LayoutConfig::default();

    group.bench_function("layout_document", |b| {
        b.iter(|| {
            let layout = layout_document(std::hint::black_box(&doc), &config);
            std::hint::black_box(layout);
        });
    });

    group.bench_function("to_pdf", |b| {
        b.iter(|| std::hint::black_box(doc.to_pdf(&config)));
    });

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
