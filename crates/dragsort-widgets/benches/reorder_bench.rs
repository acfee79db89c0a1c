use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dragsort_widgets::collection::{OrderedCollection, ReorderableSource};
use dragsort_widgets::reorder::walk_to;

fn collection(len: usize) -> OrderedCollection {
    OrderedCollection::from_records((0..len).map(|i| [("label", format!("Item number {i}"))]))
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/walk_end_to_start");
    for &len in &[32usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(len as u64 - 1));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut source = collection(len);
            b.iter(|| {
                let mut hover = len - 1;
                black_box(walk_to(&mut source, &mut hover, 0).unwrap());
                let mut hover = 0;
                black_box(walk_to(&mut source, &mut hover, len - 1).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_single_relocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/move_item");
    for &len in &[32usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut source = collection(len);
            b.iter(|| {
                source.move_item(black_box(len - 1), 0).unwrap();
                source.move_item(0, black_box(len - 1)).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk, bench_single_relocation);
criterion_main!(benches);
