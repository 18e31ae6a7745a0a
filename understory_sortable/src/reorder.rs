// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder pass: per-item shifts and the prospective drop index.
//!
//! [`compute`] is a pure function of the dragged item's sorting offset and the
//! cached geometry of the collection, so running it twice without an
//! intervening move yields identical output.
//!
//! ## Rules
//!
//! Let `s` be the sorting offset plus the page-scroll delta, `w`/`h` the helper
//! size, and `e` an item's edge offset. Each comparison uses half of the
//! smaller of the helper and the item on that axis.
//!
//! - Items after the active index shift back one slot once the helper's
//!   trailing half reaches `e`; the last such item is the new index.
//! - Items before the active index shift forward one slot once the helper's
//!   leading edge reaches `e + half`; the first such item is the new index.
//! - In a grid the tests also consider the cross axis, and a shift that would
//!   leave the container wraps to the neighbor's cached position instead.
//! - The item at the active index gets no shift and becomes the placeholder.
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_sortable::{Axes, ReorderInput, SlotGeometry, reorder};
//!
//! // Five items, 100px wide with a 10px gap, laid out horizontally.
//! let slots: Vec<SlotGeometry> = (0..5)
//!     .map(|i| SlotGeometry {
//!         index: i,
//!         size: Size::new(100.0, 40.0),
//!         edge_offset: Vec2::new(110.0 * i as f64, 0.0),
//!     })
//!     .collect();
//!
//! let input = ReorderInput {
//!     slots: &slots,
//!     active_index: 0,
//!     fallback_index: 0,
//!     helper_size: Size::new(100.0, 40.0),
//!     margin_offset: Vec2::new(10.0, 0.0),
//!     axes: Axes::X,
//!     sorting_offset: Vec2::new(160.0, 0.0),
//!     page_scroll_delta: Vec2::ZERO,
//!     container_size: Size::new(550.0, 40.0),
//! };
//! let out = reorder::compute(&input);
//! assert_eq!(out.new_index, 1);
//! assert_eq!(out.shifts[1], Vec2::new(-110.0, 0.0));
//! assert_eq!(out.placeholder, Some(0));
//! ```

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::types::Axes;

/// Untransformed geometry of one item, in index order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotGeometry {
    /// Item index.
    pub index: usize,
    /// Item size.
    pub size: Size,
    /// Position relative to the scroll container.
    pub edge_offset: Vec2,
}

/// Inputs to a reorder pass.
#[derive(Copy, Clone, Debug)]
pub struct ReorderInput<'a> {
    /// Items of the active collection sorted by index.
    pub slots: &'a [SlotGeometry],
    /// Working index of the dragged item.
    pub active_index: usize,
    /// Index reported when no item qualifies.
    pub fallback_index: usize,
    /// Helper size.
    pub helper_size: Size,
    /// Gap added to a one-slot shift (horizontal margins, larger vertical margin).
    pub margin_offset: Vec2,
    /// Reorder axes.
    pub axes: Axes,
    /// Start edge + translation + container scroll delta, in the same frame as the slots.
    pub sorting_offset: Vec2,
    /// Page scroll since the drag started.
    pub page_scroll_delta: Vec2,
    /// Size of the scroll container; bounds grid wrapping.
    pub container_size: Size,
}

/// Result of a reorder pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ReorderOutcome {
    /// Shift for each slot, parallel to [`ReorderInput::slots`].
    pub shifts: Vec<Vec2>,
    /// Position in `slots` of the item coincident with the active index.
    pub placeholder: Option<usize>,
    /// Prospective drop index.
    pub new_index: usize,
}

/// Runs a reorder pass.
#[must_use]
pub fn compute(input: &ReorderInput<'_>) -> ReorderOutcome {
    let slots = input.slots;
    let s = input.sorting_offset + input.page_scroll_delta;
    let helper = input.helper_size;
    let step = Vec2::new(
        helper.width + input.margin_offset.x,
        helper.height + input.margin_offset.y,
    );
    let active = input.active_index;

    let mut shifts = Vec::with_capacity(slots.len());
    let mut placeholder = None;
    let mut new_index: Option<usize> = None;

    for (i, slot) in slots.iter().enumerate() {
        let e = slot.edge_offset;
        let half = Vec2::new(
            helper.width.min(slot.size.width) / 2.0,
            helper.height.min(slot.size.height) / 2.0,
        );
        let mut shift = Vec2::ZERO;

        if slot.index == active {
            placeholder = Some(i);
            shifts.push(shift);
            continue;
        }

        let before = slot.index < active;
        let after = slot.index > active;

        if input.axes.contains(Axes::XY) {
            if before
                && ((s.x - half.x <= e.x && s.y <= e.y + half.y) || s.y + half.y <= e.y)
            {
                // Left on the same row, or on a row above: move right.
                shift.x = step.x;
                if e.x + shift.x > input.container_size.width - half.x
                    && let Some(next) = slots.get(i + 1)
                {
                    // Past the right edge: take the next item's place at the
                    // head of the following row.
                    shift = next.edge_offset - e;
                }
                new_index.get_or_insert(slot.index);
            } else if after
                && ((s.x + half.x >= e.x && s.y + half.y >= e.y)
                    || s.y + half.y >= e.y + slot.size.height)
            {
                // Right on the same row, or on a row below: move left.
                shift.x = -step.x;
                if e.x + shift.x < half.x
                    && let Some(prev) = i.checked_sub(1).and_then(|p| slots.get(p))
                {
                    shift = prev.edge_offset - e;
                }
                new_index = Some(slot.index);
            }
        } else if input.axes.contains(Axes::X) {
            if after && s.x + half.x >= e.x {
                shift.x = -step.x;
                new_index = Some(slot.index);
            } else if before && s.x <= e.x + half.x {
                shift.x = step.x;
                new_index.get_or_insert(slot.index);
            }
        } else if input.axes.contains(Axes::Y) {
            if after && s.y + half.y >= e.y {
                shift.y = -step.y;
                new_index = Some(slot.index);
            } else if before && s.y <= e.y + half.y {
                shift.y = step.y;
                new_index.get_or_insert(slot.index);
            }
        }

        shifts.push(shift);
    }

    ReorderOutcome {
        shifts,
        placeholder,
        new_index: new_index.unwrap_or(input.fallback_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(n: usize, height: f64, gap: f64) -> Vec<SlotGeometry> {
        (0..n)
            .map(|i| SlotGeometry {
                index: i,
                size: Size::new(200.0, height),
                edge_offset: Vec2::new(0.0, (height + gap) * i as f64),
            })
            .collect()
    }

    fn list_input(slots: &[SlotGeometry], active: usize, dy: f64) -> ReorderInput<'_> {
        ReorderInput {
            slots,
            active_index: active,
            fallback_index: active,
            helper_size: Size::new(200.0, 100.0),
            margin_offset: Vec2::new(0.0, 10.0),
            axes: Axes::Y,
            sorting_offset: slots[active].edge_offset + Vec2::new(0.0, dy),
            page_scroll_delta: Vec2::ZERO,
            container_size: Size::new(200.0, 1000.0),
        }
    }

    #[test]
    fn no_movement_keeps_index() {
        let slots = column(5, 100.0, 10.0);
        let out = compute(&list_input(&slots, 2, 0.0));
        assert_eq!(out.new_index, 2);
        assert_eq!(out.placeholder, Some(2));
        assert!(out.shifts.iter().all(|s| *s == Vec2::ZERO));
    }

    #[test]
    fn forward_takes_highest_qualifying_index() {
        let slots = column(5, 100.0, 10.0);
        // Trailing half reaches item 3's edge (330) but not item 4's (440).
        let out = compute(&list_input(&slots, 1, 180.0));
        assert_eq!(out.new_index, 3);
        assert_eq!(out.shifts[2], Vec2::new(0.0, -110.0));
        assert_eq!(out.shifts[3], Vec2::new(0.0, -110.0));
        assert_eq!(out.shifts[4], Vec2::ZERO);
    }

    #[test]
    fn backward_takes_lowest_qualifying_index() {
        let slots = column(5, 100.0, 10.0);
        // Leading edge at 100: within item 1's first half (110 + 50), not item 0's.
        let out = compute(&list_input(&slots, 3, 100.0 - 330.0));
        assert_eq!(out.new_index, 1);
        assert_eq!(out.shifts[0], Vec2::ZERO);
        assert_eq!(out.shifts[1], Vec2::new(0.0, 110.0));
        assert_eq!(out.shifts[2], Vec2::new(0.0, 110.0));
    }

    #[test]
    fn page_scroll_counts_toward_sorting_offset() {
        let slots = column(3, 100.0, 10.0);
        let mut input = list_input(&slots, 0, 0.0);
        input.page_scroll_delta = Vec2::new(0.0, 70.0);
        assert_eq!(compute(&input).new_index, 1);
    }

    #[test]
    fn append_index_has_no_placeholder() {
        let slots = column(3, 100.0, 10.0);
        let input = ReorderInput {
            active_index: 3,
            fallback_index: 3,
            sorting_offset: Vec2::new(0.0, 400.0),
            ..list_input(&slots, 0, 0.0)
        };
        let out = compute(&input);
        assert_eq!(out.placeholder, None);
        assert_eq!(out.new_index, 3);
    }

    fn grid() -> Vec<SlotGeometry> {
        // 3 columns of 100x100 with a 10px gap, two rows.
        (0..6)
            .map(|i| SlotGeometry {
                index: i,
                size: Size::new(100.0, 100.0),
                edge_offset: Vec2::new(110.0 * (i % 3) as f64, 110.0 * (i / 3) as f64),
            })
            .collect()
    }

    #[test]
    fn grid_wraps_to_next_row_anchor() {
        let slots = grid();
        let input = ReorderInput {
            slots: &slots,
            active_index: 4,
            fallback_index: 4,
            helper_size: Size::new(100.0, 100.0),
            margin_offset: Vec2::new(10.0, 10.0),
            axes: Axes::XY,
            // Dragged up into item 1's cell.
            sorting_offset: Vec2::new(110.0, 0.0),
            page_scroll_delta: Vec2::ZERO,
            container_size: Size::new(330.0, 220.0),
        };
        let out = compute(&input);
        assert_eq!(out.new_index, 1);
        // Item 1 moves right one slot.
        assert_eq!(out.shifts[1], Vec2::new(110.0, 0.0));
        // Item 2 would leave the row, so it takes item 3's place instead.
        assert_eq!(out.shifts[2], Vec2::new(-220.0, 110.0));
        assert_eq!(out.shifts[3], Vec2::new(110.0, 0.0));
        assert_eq!(out.placeholder, Some(4));
    }

    #[test]
    fn compute_is_idempotent() {
        let slots = grid();
        let input = ReorderInput {
            slots: &slots,
            active_index: 0,
            fallback_index: 0,
            helper_size: Size::new(100.0, 100.0),
            margin_offset: Vec2::new(10.0, 10.0),
            axes: Axes::XY,
            sorting_offset: Vec2::new(150.0, 120.0),
            page_scroll_delta: Vec2::ZERO,
            container_size: Size::new(330.0, 220.0),
        };
        assert_eq!(compute(&input), compute(&input));
    }
}
