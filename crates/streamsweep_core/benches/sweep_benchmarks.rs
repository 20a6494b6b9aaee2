//! Criterion benchmarks for streamsweep_core
//!
//! Run with: cargo bench -p streamsweep_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use streamsweep_core::arff::count_data_rows;
use streamsweep_core::{Preset, SweepPlan, divide};

fn arff_text(rows: usize) -> String {
    let mut content = String::from(
        "@relation bench\n@attribute a numeric\n@attribute b numeric\n@attribute class {x,y}\n@data\n",
    );
    for i in 0..rows {
        if i % 100 == 0 {
            content.push_str("% checkpoint\n\n");
        }
        content.push_str(&format!("{i}.5,{},x\n", i * 3));
    }
    content
}

fn bench_count_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_data_rows");
    for rows in [1_000, 100_000] {
        let text = arff_text(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |b, text| {
            b.iter(|| count_data_rows(black_box(text.as_bytes())))
        });
    }
    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let items: Vec<u64> = (0..10_000).collect();
    c.bench_function("divide_10k_into_64", |b| {
        b.iter(|| divide(black_box(&items), black_box(64)).len())
    });
}

fn bench_plan_generators(c: &mut Criterion) {
    let config = Preset::Imbalanced.config().with_nodes(1, 0);
    c.bench_function("plan_imbalanced_preset", |b| {
        b.iter(|| SweepPlan::build(black_box(&config)).map(|plan| plan.len()))
    });
}

criterion_group!(benches, bench_count_rows, bench_divide, bench_plan_generators);
criterion_main!(benches);
