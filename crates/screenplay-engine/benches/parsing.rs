use criterion::{Criterion, criterion_group, criterion_main};
use screenplay_engine::{Document, parse_fountain};
mod common;

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let text = common::generate_screenplay(100);

    group.bench_function("parse_fountain", |b| {
        b.iter(|| {
            let doc = parse_fountain(std::hint::black_box(&text));
            std::hint::black_box(doc);
        });
    });

    let doc: Document = parse_fountain(&text);
    group.bench_function("to_fountain", |b| {
        b.iter(|| std::hint::black_box(std::hint::black_box(&doc).to_fountain()));
    });

    group.finish();
}

criterion_group!(benches, bench_parsing);
criterion_main!(benches);
