// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: pointer ingestion, the drag lifecycle, and task scheduling.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::autoscroll::AutoscrollController;
use crate::config::SortableConfig;
use crate::error::ConfigError;
use crate::gesture::{Fired, GestureController, PressOutcome};
use crate::helper::HelperSpec;
use crate::host::{ItemInfo, SortEnd, SortOver, SortableHost};
use crate::registry::Registry;
use crate::reorder::{self, ReorderInput, SlotGeometry};
use crate::session::{DragSession, TranslateBounds};
use crate::transfer;
use crate::types::{Phase, PointerEvent};

/// Headless sortable engine.
///
/// Feed it pointer input with [`on_pointer_down`](Self::on_pointer_down),
/// [`on_pointer_move`](Self::on_pointer_move) and
/// [`on_pointer_up`](Self::on_pointer_up), and call
/// [`advance`](Self::advance) when [`next_deadline`](Self::next_deadline)
/// comes due. All effects go through the host.
///
/// ## Pointer move ordering
///
/// Each move is processed as: transfer check, gate check, translation and
/// reorder, autoscroll check, then [`SortableHost::on_sort_move`].
#[derive(Clone, Debug)]
pub struct Sortable<N, C> {
    config: SortableConfig,
    registry: Registry<N, C>,
    container: Option<N>,
    gesture: GestureController<N>,
    autoscroll: AutoscrollController<N>,
    phase: Phase,
}

impl<N, C> Sortable<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Clone + Eq + Hash + Debug,
{
    /// Creates an engine, rejecting contradictory configuration.
    pub fn new(config: SortableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(gate = ?config.gate(), "sortable engine created");
        Ok(Self {
            gesture: GestureController::new(&config),
            autoscroll: AutoscrollController::new(
                config.autoscroll_interval,
                config.autoscroll_acceleration,
            ),
            registry: Registry::new(),
            container: None,
            phase: Phase::Idle,
            config,
        })
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// Sets the outer container. Pointer input is ignored until this is called.
    pub fn set_container(&mut self, container: N) {
        self.container = Some(container);
    }

    /// The outer container, once resolved.
    #[must_use]
    pub fn container(&self) -> Option<N> {
        self.container
    }

    /// Items, handles, and groups.
    #[must_use]
    pub fn registry(&self) -> &Registry<N, C> {
        &self.registry
    }

    /// Mutable access for registration.
    pub fn registry_mut(&mut self) -> &mut Registry<N, C> {
        &mut self.registry
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The drag session, while dragging.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<N, C>> {
        self.registry.session()
    }

    /// Earliest time at which [`advance`](Self::advance) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.gesture.deadline(), self.autoscroll.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether any timer or task is pending.
    #[must_use]
    pub fn has_pending_tasks(&self) -> bool {
        self.gesture.has_pending_timer() || self.autoscroll.is_running()
    }

    /// Handles a pointer press. A press while a press or drag is in progress is ignored.
    pub fn on_pointer_down<H>(&mut self, event: &PointerEvent<N>, now: u64, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        if self.container.is_none() {
            tracing::trace!("press before container resolved");
            return;
        }
        if self.phase != Phase::Idle {
            tracing::trace!(phase = ?self.phase, "press during active gesture ignored");
            return;
        }
        match self
            .gesture
            .on_press_start(event, now, &mut self.registry, host)
        {
            PressOutcome::Ignored => {}
            PressOutcome::Pending => self.phase = Phase::Pressed,
            PressOutcome::Promote => {
                self.phase = Phase::Pressed;
                self.begin_drag(*event, now, host);
            }
        }
    }

    /// Handles pointer movement.
    pub fn on_pointer_move<H>(&mut self, event: &PointerEvent<N>, now: u64, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        let Some(outer) = self.container else {
            return;
        };

        if transfer::try_transfer(&mut self.registry, host, event.target).is_some() {
            self.autoscroll.stop();
        }

        match self.phase {
            Phase::Idle => {}
            Phase::Pressed => {
                if self.gesture.on_press_move(event, now) {
                    self.begin_drag(*event, now, host);
                }
            }
            Phase::Dragging => {
                self.update_position(event, host);
                self.animate(host);
                if let Some(session) = self.registry.session() {
                    self.autoscroll.update(session, outer, now);
                }
                host.on_sort_move(event);
            }
        }
    }

    /// Handles pointer release: ends a drag, or drops a press that never passed its gate.
    pub fn on_pointer_up<H>(&mut self, event: &PointerEvent<N>, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        match self.phase {
            Phase::Idle => self.gesture.reset(),
            Phase::Pressed => self.cancel_press(host),
            Phase::Dragging => self.end_drag(Some(event), host, true),
        }
    }

    /// Runs every timer and task due at `now`.
    pub fn advance<H>(&mut self, now: u64, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        match self.gesture.fire(now) {
            Some(Fired::Cancel) if self.phase == Phase::Pressed => self.cancel_press(host),
            Some(Fired::Promote(event)) if self.phase == Phase::Pressed => {
                tracing::trace!("press delay elapsed");
                self.begin_drag(event, now, host);
            }
            _ => {}
        }

        if self.phase == Phase::Dragging
            && let Some((container, delta)) = self.autoscroll.tick(now)
        {
            host.scroll_by(container, delta);
            if let Some(session) = self.registry.session_mut() {
                session.nudge(delta);
            }
            self.animate(host);
        }
    }

    /// Tears down any press or drag without emitting [`SortableHost::on_sort_end`].
    ///
    /// The collection order is left as it was before the drag.
    pub fn abort<H>(&mut self, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        match self.phase {
            Phase::Idle => {}
            Phase::Pressed => self.cancel_press(host),
            Phase::Dragging => {
                tracing::debug!("drag aborted");
                self.end_drag(None, host, false);
            }
        }
    }

    fn cancel_press<H>(&mut self, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        self.gesture.reset();
        self.registry.release();
        self.registry.refresh_all_groups(host);
        self.phase = Phase::Idle;
        tracing::debug!("press cancelled");
    }

    pub(crate) fn begin_drag<H>(&mut self, event: PointerEvent<N>, now: u64, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        let (Some(container), Some(start)) = (self.container, self.registry.start().cloned())
        else {
            return;
        };
        self.gesture.reset();
        // A transfer while pressed only moved the marker; the drag starts home.
        self.registry
            .set_active(start.collection.clone(), start.index);

        let node = start.node;
        let axis = host.axis(Some(&start.collection));
        let outer_axes = host.axis(None).axes;
        let scroll_container = self
            .registry
            .closest_group(node, &*host)
            .and_then(|c| self.registry.group_node(&c))
            .unwrap_or(container);

        let node_rect = host.bounding_box(node);
        let container_rect = host.bounding_box(scroll_container);
        let margin = host.margin(node);
        let helper_size = start.helper_size;

        let session = DragSession {
            item: start.item,
            node,
            start_collection: start.collection.clone(),
            start_index: start.index,
            collection: start.collection.clone(),
            index: start.index,
            new_index: Some(start.index),
            helper_size,
            margin_offset: DragSession::<N, C>::margin_offset(margin),
            axes: axis.axes,
            lock_axis: axis.lock_axis,
            translate: Vec2::ZERO,
            bounds: TranslateBounds::new(node_rect, container_rect, helper_size, axis.axes),
            outer_bounds: TranslateBounds::new(
                node_rect,
                host.bounding_box(container),
                helper_size,
                outer_axes,
            ),
            scroll_container,
            container_rect,
            offset_edge: host.layout_offset(node, container),
            initial_pointer: event.position,
            initial_scroll: host.scroll_offset(scroll_container),
            initial_page_scroll: host.page_scroll(),
            hidden: SmallVec::new(),
        };

        host.create_helper(&HelperSpec::over(node, node_rect, margin, helper_size));
        self.registry.begin_session(session);
        self.phase = Phase::Dragging;
        tracing::debug!(?node, index = start.index, collection = ?start.collection, now, "drag started");

        let info = ItemInfo {
            node,
            index: start.index,
            collection: start.collection,
        };
        host.on_sort_start(&info, &event);
        self.animate(host);
    }

    fn update_position<H>(&mut self, event: &PointerEvent<N>, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        let lock = self
            .config
            .lock_to_container_edges
            .then_some(&self.config.lock_offset);
        let page_scroll = host.page_scroll();
        let Some(session) = self.registry.session_mut() else {
            return;
        };
        let translate = session.update_translate(event.position, page_scroll, lock);
        host.set_helper_transform(translate);
    }

    /// Runs a reorder pass over the active collection and pushes the result to the host.
    pub(crate) fn animate<H>(&mut self, host: &mut H)
    where
        H: SortableHost<N, C>,
    {
        let (Some(container), Some(session)) = (self.container, self.registry.session()) else {
            return;
        };
        let collection = session.collection.clone();
        let start_collection = session.start_collection.clone();
        let active_index = session.index;
        let previous = session.new_index;
        let scroll_delta = host.scroll_offset(session.scroll_container) - session.initial_scroll;
        // Edge offsets are cached against the outer container; reorder in the
        // scroll container's frame so grid wrapping sees its own edges.
        let frame = host.layout_offset(session.scroll_container, container);
        let sorting_offset = session.offset_edge + session.translate + scroll_delta - frame;
        let page_scroll_delta = host.page_scroll() - session.initial_page_scroll;
        let helper_size = session.helper_size;
        let margin_offset = session.margin_offset;
        let axes = session.axes;
        let container_size = session.container_rect.size();

        let ids = self.registry.ordered_items(&collection);
        let mut slots = Vec::with_capacity(ids.len());
        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(info) = self.registry.item(id) else {
                continue;
            };
            let Some(edge_offset) = self.registry.ensure_edge_offset(id, container, &*host) else {
                continue;
            };
            slots.push(SlotGeometry {
                index: info.index,
                size: host.bounding_box(info.node).size(),
                edge_offset: edge_offset - frame,
            });
            nodes.push(info.node);
        }

        let outcome = reorder::compute(&ReorderInput {
            slots: &slots,
            active_index,
            fallback_index: active_index,
            helper_size,
            margin_offset,
            axes,
            sorting_offset,
            page_scroll_delta,
            container_size,
        });

        let transition = self.config.transition();
        let hide = self.config.hide_sortable_ghost;
        let Some(session) = self.registry.session_mut() else {
            return;
        };
        for (i, (&node, &shift)) in nodes.iter().zip(&outcome.shifts).enumerate() {
            if outcome.placeholder == Some(i) {
                if hide && !session.hidden.contains(&node) {
                    host.set_ghost_hidden(node, true);
                    session.hidden.push(node);
                }
                continue;
            }
            host.set_item_transform(node, shift, transition);
        }
        session.new_index = Some(outcome.new_index);

        if previous != Some(outcome.new_index) {
            tracing::trace!(new_index = outcome.new_index, old_index = ?previous, "sort over");
            host.on_sort_over(&SortOver {
                new_index: outcome.new_index,
                old_index: previous,
                index: active_index,
                old_collection: start_collection,
                collection,
            });
        }
    }

    /// Ends a drag. With `commit`, the move is applied to the registry and
    /// [`SortableHost::on_sort_end`] fires.
    pub(crate) fn end_drag<H>(&mut self, event: Option<&PointerEvent<N>>, host: &mut H, commit: bool)
    where
        H: SortableHost<N, C>,
    {
        self.autoscroll.stop();
        self.gesture.reset();
        self.phase = Phase::Idle;
        let Some(session) = self.registry.take_session() else {
            self.registry.release();
            return;
        };

        host.remove_helper();
        for &node in &session.hidden {
            host.set_ghost_hidden(node, false);
        }
        for node in self.registry.nodes_in(&session.collection) {
            host.clear_item_transform(node);
        }
        self.registry.clear_edge_offsets(&session.collection);
        if session.is_transferred() {
            for node in self.registry.nodes_in(&session.start_collection) {
                host.clear_item_transform(node);
            }
            self.registry.clear_edge_offsets(&session.start_collection);
        }

        let end = SortEnd {
            old_index: session.start_index,
            new_index: session.drop_index(),
            old_collection: session.start_collection.clone(),
            new_collection: session.collection.clone(),
        };
        if commit {
            self.registry
                .apply_move(session.item, &end.new_collection, end.new_index);
        }
        self.registry.release();
        self.registry.refresh_all_groups(host);
        tracing::debug!(
            old_index = end.old_index,
            new_index = end.new_index,
            from = ?end.old_collection,
            to = ?end.new_collection,
            commit,
            "drag ended"
        );
        if commit {
            host.on_sort_end(&end, event);
        }
    }
}
