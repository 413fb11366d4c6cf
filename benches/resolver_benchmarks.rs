use std::collections::HashMap;
use std::hint::black_box;

use biff_config::alias::{DEFAULT_MAX_ITERATIONS, resolve};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Chain N0 -> N1 -> ... -> leaf
fn chain_table(depth: usize) -> HashMap<String, String> {
    let mut table: HashMap<String, String> = (0..depth)
        .map(|i| (format!("N{i}"), format!("$(N{})", i + 1)))
        .collect();
    table.insert(format!("N{depth}"), "leaf".to_string());
    table
}

fn bench_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_chain_depth");
    for depth in [1, 3, 6, 9] {
        let table = chain_table(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &table, |b, table| {
            b.iter(|| resolve(black_box("value: $(N0)"), table, DEFAULT_MAX_ITERATIONS))
        });
    }
    group.finish();
}

fn bench_wide_document(c: &mut Criterion) {
    let table: HashMap<String, String> = (0..200)
        .map(|i| (format!("ALIAS_{i}"), format!("value-{i}")))
        .collect();
    let text: String = (0..5_000)
        .map(|i| format!("<Param>$(ALIAS_{})</Param>\n", i % 200))
        .collect();

    c.bench_function("alias_wide_document", |b| {
        b.iter(|| resolve(black_box(&text), &table, DEFAULT_MAX_ITERATIONS))
    });
}

fn bench_circular_detection(c: &mut Criterion) {
    let table = HashMap::from([
        ("A".to_string(), "$(B)".to_string()),
        ("B".to_string(), "$(A)".to_string()),
    ]);

    c.bench_function("alias_circular_detection", |b| {
        b.iter(|| resolve(black_box("$(A)"), &table, DEFAULT_MAX_ITERATIONS))
    });
}

criterion_group!(
    resolver_benches,
    bench_chain_depth,
    bench_wide_document,
    bench_circular_detection
);

criterion_main!(resolver_benches);
