// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_sortable::{
    Geometry, HelperSpec, PointerEvent, Sortable, SortableConfig, SortableHost, VisualSink,
};

const ROW: f64 = 40.0;

/// Rows `1..=n` stacked in container `0`; effects are counted, not rendered.
struct Rows {
    n: u32,
    transforms: usize,
}

impl Geometry<u32> for Rows {
    fn parent(&self, node: u32) -> Option<u32> {
        (node != 0).then_some(0)
    }

    fn bounding_box(&self, node: u32) -> Rect {
        match node {
            0 => Rect::new(0.0, 0.0, 200.0, ROW * f64::from(self.n)),
            n => Rect::new(0.0, ROW * f64::from(n - 1), 200.0, ROW * f64::from(n)),
        }
    }

    fn scroll_offset(&self, _: u32) -> Vec2 {
        Vec2::ZERO
    }

    fn layout_offset(&self, node: u32, _: u32) -> Vec2 {
        Vec2::new(0.0, ROW * f64::from(node.saturating_sub(1)))
    }
}

impl VisualSink<u32> for Rows {
    fn set_item_transform(&mut self, _: u32, _: Vec2, _: Option<u32>) {
        self.transforms += 1;
    }
    fn clear_item_transform(&mut self, _: u32) {}
    fn set_ghost_hidden(&mut self, _: u32, _: bool) {}
    fn create_helper(&mut self, _: &HelperSpec<u32>) {}
    fn set_helper_transform(&mut self, _: Vec2) {}
    fn remove_helper(&mut self) {}
    fn scroll_by(&mut self, _: u32, _: Vec2) {}
}

impl SortableHost<u32, u8> for Rows {}

fn setup(n: u32) -> (Sortable<u32, u8>, Rows) {
    let mut sortable = Sortable::new(SortableConfig::default()).expect("default config is valid");
    sortable.set_container(0);
    for (index, node) in (1..=n).enumerate() {
        sortable.registry_mut().register_item(node, 0, index);
    }
    (sortable, Rows { n, transforms: 0 })
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_sortable_drag");
    group.sample_size(50);

    for &n in &[16_u32, 256, 1_024] {
        let steps = 64_u32;
        group.bench_function(format!("full_drag(n={n},moves={steps})"), |b| {
            b.iter_batched(
                || setup(n),
                |(mut sortable, mut host)| {
                    let start = Point::new(10.0, ROW / 2.0);
                    sortable.on_pointer_down(&PointerEvent::new(1, start), 0, &mut host);
                    // Sweep the first node to the middle of the list.
                    let travel = ROW * f64::from(n / 2);
                    for step in 1..=steps {
                        let y = start.y + travel * f64::from(step) / f64::from(steps);
                        let event = PointerEvent::new(1, Point::new(10.0, y));
                        sortable.on_pointer_move(&event, u64::from(step) * 16, &mut host);
                    }
                    sortable.on_pointer_up(&PointerEvent::new(1, start), &mut host);
                    black_box(host.transforms);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_drag);
criterion_main!(benches);
