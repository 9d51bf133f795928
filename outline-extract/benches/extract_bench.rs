//! Benchmarks for extraction and normalization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use outline_extract::config::ExtractSettings;
use outline_extract::core::Block;
use outline_extract::extract::{extract, normalize};

fn outline(width: usize, depth: usize) -> Vec<Block> {
    fn node(width: usize, depth: usize) -> Block {
        let block = Block::new("Some ==highlighted== text with **bold** and plain words");
        if depth == 0 {
            return block;
        }
        block.with_children((0..width).map(|_| node(width, depth - 1)))
    }
    (0..width).map(|_| node(width, depth)).collect()
}

fn extract_benchmark(c: &mut Criterion) {
    let settings = ExtractSettings::default();
    let pattern = settings.compile_pattern().expect("default pattern compiles");
    let roots = outline(4, 5);

    c.bench_function("extract_preorder", |b| {
        b.iter(|| black_box(extract(black_box(&roots), &pattern).count()))
    });

    c.bench_function("extract_and_normalize", |b| {
        b.iter(|| {
            extract(&roots, &pattern)
                .map(|item| normalize(item.text, item.source_id(), &settings))
                .map(|text| text.len())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, extract_benchmark);
criterion_main!(benches);
