// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session: geometry captured when a drag starts, plus the per-move translation.
//!
//! A session is created when a press passes its gate and dropped on release.
//! Its mutation is scoped to three steps:
//!
//! 1) [`DragSession::update_translate`] on every pointer move,
//! 2) [`DragSession::nudge`] on every autoscroll tick,
//! 3) [`DragSession::rehome`] when the item moves to another collection.

use kurbo::{Insets, Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::config::LockOffset;
use crate::types::{Axes, ItemId, LockAxis};

/// Allowed translation range on one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    /// Smallest translation.
    pub min: f64,
    /// Largest translation.
    pub max: f64,
}

/// Translation bounds of the helper; axes that are not permitted carry no span.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TranslateBounds {
    /// Horizontal span.
    pub x: Option<Span>,
    /// Vertical span.
    pub y: Option<Span>,
}

impl TranslateBounds {
    /// Bounds that keep the helper's center inside `container`, for a node currently at `node`.
    #[must_use]
    pub fn new(node: Rect, container: Rect, helper: Size, axes: Axes) -> Self {
        let x = axes.contains(Axes::X).then(|| Span {
            min: container.x0 - node.x0 - helper.width / 2.0,
            max: container.x1 - node.x0 - helper.width / 2.0,
        });
        let y = axes.contains(Axes::Y).then(|| Span {
            min: container.y0 - node.y0 - helper.height / 2.0,
            max: container.y1 - node.y0 - helper.height / 2.0,
        });
        Self { x, y }
    }

    /// Re-targets the bounds from container `old` to container `new`.
    ///
    /// The leading bound moves against the leading-edge shift and the trailing
    /// bound with the trailing-edge shift, so the helper's current position
    /// keeps its meaning.
    pub fn retarget(&mut self, old: Rect, new: Rect) {
        if let Some(x) = &mut self.x {
            x.min -= new.x0 - old.x0;
            x.max += new.x1 - old.x1;
        }
        if let Some(y) = &mut self.y {
            y.min -= new.y0 - old.y0;
            y.max += new.y1 - old.y1;
        }
    }
}

/// Clamp that prefers `min` when the range is inverted.
fn limit(min: f64, max: f64, value: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// The in-progress drag.
#[derive(Clone, Debug)]
pub struct DragSession<N, C> {
    pub(crate) item: ItemId,
    pub(crate) node: N,
    pub(crate) start_collection: C,
    pub(crate) start_index: usize,
    pub(crate) collection: C,
    pub(crate) index: usize,
    pub(crate) new_index: Option<usize>,
    pub(crate) helper_size: Size,
    pub(crate) margin_offset: Vec2,
    pub(crate) axes: Axes,
    pub(crate) lock_axis: Option<LockAxis>,
    pub(crate) translate: Vec2,
    pub(crate) bounds: TranslateBounds,
    pub(crate) outer_bounds: TranslateBounds,
    pub(crate) scroll_container: N,
    pub(crate) container_rect: Rect,
    pub(crate) offset_edge: Vec2,
    pub(crate) initial_pointer: Point,
    pub(crate) initial_scroll: Vec2,
    pub(crate) initial_page_scroll: Vec2,
    pub(crate) hidden: SmallVec<[N; 4]>,
}

impl<N: Copy, C: Clone> DragSession<N, C> {
    /// Item the drag started from.
    #[must_use]
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Source node of the drag.
    #[must_use]
    pub fn node(&self) -> N {
        self.node
    }

    /// Collection the drag started in.
    #[must_use]
    pub fn start_collection(&self) -> &C {
        &self.start_collection
    }

    /// Index the drag started at.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Collection the dragged item currently belongs to.
    #[must_use]
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Working index in the current collection.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Prospective drop index from the last reorder pass.
    #[must_use]
    pub fn new_index(&self) -> Option<usize> {
        self.new_index
    }

    /// Index the item would be dropped at right now.
    #[must_use]
    pub fn drop_index(&self) -> usize {
        self.new_index.unwrap_or(self.index)
    }

    /// Current helper translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Helper size used for reorder and autoscroll math.
    #[must_use]
    pub fn helper_size(&self) -> Size {
        self.helper_size
    }

    /// Translation bounds against the immediate scroll container.
    #[must_use]
    pub fn bounds(&self) -> TranslateBounds {
        self.bounds
    }

    /// Translation bounds against the outer container.
    #[must_use]
    pub fn outer_bounds(&self) -> TranslateBounds {
        self.outer_bounds
    }

    /// Axes used for reordering.
    #[must_use]
    pub fn axes(&self) -> Axes {
        self.axes
    }

    /// Scroll container the item currently lives in.
    #[must_use]
    pub fn scroll_container(&self) -> N {
        self.scroll_container
    }

    /// Whether the item has left its start collection.
    #[must_use]
    pub fn is_transferred(&self) -> bool
    where
        C: PartialEq,
    {
        self.collection != self.start_collection
    }

    pub(crate) fn margin_offset(margin: Insets) -> Vec2 {
        Vec2::new(margin.x0 + margin.x1, margin.y0.max(margin.y1))
    }

    /// Recomputes the translation from the pointer position.
    ///
    /// Page scroll since the start is subtracted, the result is clamped to the
    /// container when `lock` is given, and the lock axis is applied last.
    pub(crate) fn update_translate(
        &mut self,
        pointer: Point,
        page_scroll: Vec2,
        lock: Option<&LockOffset>,
    ) -> Vec2 {
        let mut translate = pointer - self.initial_pointer;
        translate -= page_scroll - self.initial_page_scroll;

        if let Some(lock) = lock {
            let [min_lock, max_lock] = lock.to_pixels(self.helper_size);
            let half = Vec2::new(self.helper_size.width / 2.0, self.helper_size.height / 2.0);
            let min_offset = half - min_lock;
            let max_offset = half - max_lock;
            if let Some(x) = self.bounds.x {
                translate.x = limit(x.min + min_offset.x, x.max - max_offset.x, translate.x);
            }
            if let Some(y) = self.bounds.y {
                translate.y = limit(y.min + min_offset.y, y.max - max_offset.y, translate.y);
            }
        }

        match self.lock_axis {
            Some(LockAxis::X) => translate.y = 0.0,
            Some(LockAxis::Y) => translate.x = 0.0,
            None => {}
        }

        self.translate = translate;
        translate
    }

    /// Applies one autoscroll step: the container scrolled by `delta`.
    pub(crate) fn nudge(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Moves the session into another collection's scroll container.
    ///
    /// The edge offset trades the old container's scroll baseline for
    /// `new_scroll`, the new container's current scroll offset. Scrolling the
    /// old container after the drag started does not move the edge offset.
    pub(crate) fn rehome(
        &mut self,
        collection: C,
        index: usize,
        container: N,
        container_rect: Rect,
        new_scroll: Vec2,
    ) {
        self.offset_edge -= self.initial_scroll;
        self.bounds.retarget(self.container_rect, container_rect);
        self.container_rect = container_rect;
        self.scroll_container = container;
        self.initial_scroll = new_scroll;
        self.offset_edge += new_scroll;
        self.collection = collection;
        self.index = index;
        self.new_index = None;
    }
}
