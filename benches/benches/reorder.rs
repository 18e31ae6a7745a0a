// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Size, Vec2};
use understory_sortable::{Axes, ReorderInput, SlotGeometry, reorder};

const ITEM: Size = Size::new(100.0, 40.0);

fn column(n: usize) -> Vec<SlotGeometry> {
    (0..n)
        .map(|i| SlotGeometry {
            index: i,
            size: ITEM,
            edge_offset: Vec2::new(0.0, 44.0 * i as f64),
        })
        .collect()
}

fn grid(n: usize, columns: usize) -> Vec<SlotGeometry> {
    (0..n)
        .map(|i| SlotGeometry {
            index: i,
            size: ITEM,
            edge_offset: Vec2::new(104.0 * (i % columns) as f64, 44.0 * (i / columns) as f64),
        })
        .collect()
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_sortable_reorder");

    for &n in &[16_usize, 256, 4_096] {
        let slots = column(n);
        let active = n / 2;
        group.bench_function(format!("list(n={n})"), |b| {
            b.iter(|| {
                let input = ReorderInput {
                    slots: &slots,
                    active_index: active,
                    fallback_index: active,
                    helper_size: ITEM,
                    margin_offset: Vec2::new(0.0, 4.0),
                    axes: Axes::Y,
                    // A quarter of the list below the start.
                    sorting_offset: Vec2::new(0.0, 44.0 * (active + n / 4) as f64),
                    page_scroll_delta: Vec2::ZERO,
                    container_size: Size::new(ITEM.width, 44.0 * n as f64),
                };
                black_box(reorder::compute(black_box(&input)));
            });
        });

        let columns = 8;
        let slots = grid(n, columns);
        group.bench_function(format!("grid(n={n},cols={columns})"), |b| {
            b.iter(|| {
                let input = ReorderInput {
                    slots: &slots,
                    active_index: active,
                    fallback_index: active,
                    helper_size: ITEM,
                    margin_offset: Vec2::new(4.0, 4.0),
                    axes: Axes::XY,
                    sorting_offset: Vec2::new(52.0, 44.0 * (active / columns) as f64 - 90.0),
                    page_scroll_delta: Vec2::ZERO,
                    container_size: Size::new(104.0 * columns as f64, 44.0 * (n / columns) as f64),
                };
                black_box(reorder::compute(black_box(&input)));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reorder);
criterion_main!(benches);
