// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing traits and notification payloads.
//!
//! The engine never touches a view tree. A host adapter implements:
//!
//! - [`Geometry`]: synchronous queries for bounding boxes, scroll offsets,
//!   margins, and the parent chain used for ancestor lookups.
//! - [`VisualSink`]: the effects the engine asks for (item shifts, helper
//!   placement, ghost visibility, scrolling).
//! - [`SortableHost`]: host-dependent options plus sort notifications. Every
//!   method has a default, so a minimal host only implements the two
//!   supertraits.

use kurbo::{Insets, Rect, Size, Vec2};

use crate::helper::HelperSpec;
use crate::types::{AxisConfig, PointerEvent};

/// Geometry queries against the host's view tree.
///
/// All rectangles are in viewport coordinates and all queries are answered for
/// the moment of the call.
pub trait Geometry<N> {
    /// Parent of `node`, or `None` at the root.
    fn parent(&self, node: N) -> Option<N>;

    /// Bounding box of `node`, including any transform currently applied.
    fn bounding_box(&self, node: N) -> Rect;

    /// Current scroll offset of `node` (zero for non-scrolling nodes).
    fn scroll_offset(&self, node: N) -> Vec2;

    /// Untransformed position of `node` relative to `container`'s content origin.
    ///
    /// This is the value cached as an item's edge offset; it must not include
    /// transforms applied through [`VisualSink::set_item_transform`].
    fn layout_offset(&self, node: N, container: N) -> Vec2;

    /// Margin of `node`.
    fn margin(&self, node: N) -> Insets {
        let _ = node;
        Insets::ZERO
    }

    /// Scroll offset of the page (outermost viewport).
    fn page_scroll(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Whether `node` is a form control (input, textarea, select, option, button).
    fn is_form_control(&self, node: N) -> bool {
        let _ = node;
        false
    }
}

/// Visual effects requested by the engine.
pub trait VisualSink<N> {
    /// Shifts an item by `offset`, animating over `transition` milliseconds if given.
    fn set_item_transform(&mut self, node: N, offset: Vec2, transition: Option<u32>);

    /// Removes any shift and transition from an item.
    fn clear_item_transform(&mut self, node: N);

    /// Hides or restores the source node of the drag.
    fn set_ghost_hidden(&mut self, node: N, hidden: bool);

    /// Creates the helper that follows the pointer.
    fn create_helper(&mut self, helper: &HelperSpec<N>);

    /// Moves the helper to `offset` from its creation rect.
    fn set_helper_transform(&mut self, offset: Vec2);

    /// Removes the helper.
    fn remove_helper(&mut self);

    /// Scrolls `container` by `delta`.
    fn scroll_by(&mut self, container: N, delta: Vec2);
}

/// A sortable item as reported to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInfo<N, C> {
    /// Node the item was registered with.
    pub node: N,
    /// Index within its collection.
    pub index: usize,
    /// Owning collection.
    pub collection: C,
}

/// Payload of [`SortableHost::on_sort_over`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOver<C> {
    /// Index the item would land on if released now.
    pub new_index: usize,
    /// Prospective index from the previous move, `None` right after a transfer.
    pub old_index: Option<usize>,
    /// Working index of the dragged item in its current collection.
    pub index: usize,
    /// Collection the drag started in.
    pub old_collection: C,
    /// Collection the dragged item currently belongs to.
    pub collection: C,
}

/// Payload of [`SortableHost::on_sort_end`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortEnd<C> {
    /// Index the item started at.
    pub old_index: usize,
    /// Index the item was dropped at.
    pub new_index: usize,
    /// Collection the drag started in.
    pub old_collection: C,
    /// Collection the item was dropped into.
    pub new_collection: C,
}

/// Render state of a group boundary, pushed to the host on refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupState<N, C> {
    /// Collection the group belongs to.
    pub collection: C,
    /// The current drag cannot enter this group.
    pub disabled: bool,
    /// Start node to render as a placeholder when a foreign item was moved here.
    pub placeholder: Option<N>,
    /// Size of that placeholder.
    pub placeholder_size: Size,
}

/// Host options and notifications.
#[allow(
    unused_variables,
    reason = "Default implementations ignore their arguments"
)]
pub trait SortableHost<N: Copy, C>: Geometry<N> + VisualSink<N> {
    /// Movement axes for `collection`; `None` asks for the outer container's axes.
    fn axis(&self, collection: Option<&C>) -> AxisConfig {
        AxisConfig::default()
    }

    /// Size of the helper for an item (defaults to the item's bounding box size).
    fn helper_size(&self, item: &ItemInfo<N, C>) -> Size {
        self.bounding_box(item.node).size()
    }

    /// Veto a press before it is resolved to an item (defaults to vetoing form controls).
    fn should_cancel_start(&self, event: &PointerEvent<N>) -> bool {
        self.is_form_control(event.target)
    }

    /// Whether groups closed to a drag from `start` are reported disabled (defaults to `true`).
    fn is_disabled_checker(&self, start: &C) -> bool {
        true
    }

    /// A group's render state changed.
    fn group_changed(&mut self, state: &GroupState<N, C>) {}

    /// A drag started.
    fn on_sort_start(&mut self, item: &ItemInfo<N, C>, event: &PointerEvent<N>) {}

    /// The pointer moved during a drag.
    fn on_sort_move(&mut self, event: &PointerEvent<N>) {}

    /// The prospective drop index changed.
    fn on_sort_over(&mut self, over: &SortOver<C>) {}

    /// A drag ended; `event` is `None` when the drag was ended without pointer input.
    fn on_sort_end(&mut self, end: &SortEnd<C>, event: Option<&PointerEvent<N>>) {}
}
