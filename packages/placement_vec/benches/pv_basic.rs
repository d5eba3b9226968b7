//! Basic benchmarks for the `placement_vec` crate, with `Vec` as the baseline.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use placement_vec::PlacementVec;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;
const ITEM_COUNT: usize = 1000;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("pv_basic");

    let allocs_op = allocs.operation("push_1000");
    group.bench_function("push_1000", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut items = PlacementVec::new();

                for _ in 0..ITEM_COUNT {
                    _ = black_box(items.push(black_box(TEST_VALUE)));
                }

                drop(black_box(items));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("vec_push_1000");
    group.bench_function("vec_push_1000", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut items = Vec::new();

                for _ in 0..ITEM_COUNT {
                    items.push(black_box(TEST_VALUE));
                }

                drop(black_box(items));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("push_1000_reserved");
    group.bench_function("push_1000_reserved", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut items = PlacementVec::with_capacity(ITEM_COUNT);

                for _ in 0..ITEM_COUNT {
                    _ = black_box(items.push(black_box(TEST_VALUE)));
                }

                drop(black_box(items));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_front");
    group.bench_function("insert_front", |b| {
        b.iter_custom(|iters| {
            let mut containers = iter::repeat_with(|| {
                let mut items = PlacementVec::with_capacity(ITEM_COUNT + 1);
                items.extend(iter::repeat_n(TEST_VALUE, ITEM_COUNT));
                items
            })
            .take(usize::try_from(iters).unwrap())
            .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for items in &mut containers {
                _ = black_box(items.insert(0, black_box(TEST_VALUE)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("erase_front");
    group.bench_function("erase_front", |b| {
        b.iter_custom(|iters| {
            let mut containers = iter::repeat_with(|| {
                iter::repeat_n(TEST_VALUE, ITEM_COUNT).collect::<PlacementVec<_>>()
            })
            .take(usize::try_from(iters).unwrap())
            .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for items in &mut containers {
                _ = black_box(items.erase(0));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("clone_1000");
    group.bench_function("clone_1000", |b| {
        b.iter_custom(|iters| {
            let source = iter::repeat_n(TEST_VALUE, ITEM_COUNT).collect::<PlacementVec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(source.clone()));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("read_all");
    group.bench_function("read_all", |b| {
        b.iter_custom(|iters| {
            let items = iter::repeat_n(TEST_VALUE, ITEM_COUNT).collect::<PlacementVec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                for value in &items {
                    _ = black_box(*value);
                }
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
