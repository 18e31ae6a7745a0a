// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press classification: decides whether a press becomes a drag.
//!
//! ## Usage
//!
//! 1) [`GestureController::on_press_start`] resolves the pressed item and arms
//!    the gate configured by [`SortableConfig::gate`].
//! 2) [`GestureController::on_press_move`] measures Manhattan displacement from
//!    the press origin. In distance mode it promotes once the distance is
//!    covered; otherwise movement past the jitter threshold schedules a
//!    cancellation for the next tick.
//! 3) [`GestureController::fire`] resolves due timers on each advance.
//! 4) [`GestureController::reset`] drops the press and both timers.
//!
//! At most one of the press timer and the cancel timer is pending.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;

use crate::config::{Gate, SortableConfig};
use crate::host::SortableHost;
use crate::registry::Registry;
use crate::timer::Timer;
use crate::types::{Button, PointerEvent};

/// What a press resolved to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PressOutcome {
    /// The press does not concern the engine.
    Ignored,
    /// An item is pressed; the gate has not been met yet.
    Pending,
    /// The press starts a drag right away.
    Promote,
}

/// A due timer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Fired<N> {
    /// The press delay elapsed; promote using the original press.
    Promote(PointerEvent<N>),
    /// The pointer jittered past the threshold; drop the press.
    Cancel,
}

#[derive(Clone, Debug)]
pub(crate) struct GestureController<N> {
    gate: Gate,
    threshold: f64,
    use_drag_handle: bool,
    touched: bool,
    origin: Point,
    press_event: Option<PointerEvent<N>>,
    press_timer: Timer,
    cancel_timer: Timer,
}

impl<N: Copy + Eq + Hash + Debug> GestureController<N> {
    pub(crate) fn new(config: &SortableConfig) -> Self {
        Self {
            gate: config.gate(),
            threshold: config.press_threshold,
            use_drag_handle: config.use_drag_handle,
            touched: false,
            origin: Point::ZERO,
            press_event: None,
            press_timer: Timer::new(),
            cancel_timer: Timer::new(),
        }
    }

    /// Resolves a press to an item and arms the gate.
    ///
    /// On anything but [`PressOutcome::Ignored`] the item has been marked
    /// active in `registry` and every group state has been pushed to `host`.
    pub(crate) fn on_press_start<C, H>(
        &mut self,
        event: &PointerEvent<N>,
        now: u64,
        registry: &mut Registry<N, C>,
        host: &mut H,
    ) -> PressOutcome
    where
        C: Clone + Eq + Hash + Debug,
        H: SortableHost<N, C>,
    {
        if event.button == Button::Secondary || host.should_cancel_start(event) {
            tracing::trace!(target = ?event.target, "press vetoed");
            return PressOutcome::Ignored;
        }
        let Some(item) = registry.closest_item(event.target, &*host) else {
            tracing::trace!(target = ?event.target, "press missed all items");
            return PressOutcome::Ignored;
        };
        if self.use_drag_handle && registry.closest_handle(event.target, &*host).is_none() {
            tracing::trace!(target = ?event.target, "press outside drag handle");
            return PressOutcome::Ignored;
        }
        let Some(info) = registry.item(item) else {
            return PressOutcome::Ignored;
        };
        let helper_size = host.helper_size(&info);
        if !registry.mark_pressed(item, helper_size) {
            return PressOutcome::Ignored;
        }
        registry.refresh_all_groups(host);

        self.touched = true;
        self.origin = event.position;
        self.press_event = Some(*event);
        tracing::debug!(node = ?info.node, index = info.index, gate = ?self.gate, "press accepted");

        match self.gate {
            Gate::Immediate => PressOutcome::Promote,
            Gate::Distance(_) => PressOutcome::Pending,
            Gate::Delay(ms) => {
                self.press_timer.schedule(now, ms);
                PressOutcome::Pending
            }
        }
    }

    /// Handles movement while a press is pending. Returns `true` when the
    /// distance gate is met.
    pub(crate) fn on_press_move(&mut self, event: &PointerEvent<N>, now: u64) -> bool {
        if !self.touched {
            return false;
        }
        let delta = self.origin - event.position;
        let moved = delta.x.abs() + delta.y.abs();
        match self.gate {
            Gate::Distance(distance) => moved >= distance,
            Gate::Delay(_) | Gate::Immediate => {
                if self.threshold <= 0.0 || moved >= self.threshold {
                    if !self.cancel_timer.is_pending() {
                        tracing::trace!(moved, "press jitter, cancelling");
                    }
                    self.press_timer.cancel();
                    self.cancel_timer.schedule(now, 0);
                }
                false
            }
        }
    }

    /// Returns the due timer, if any.
    pub(crate) fn fire(&mut self, now: u64) -> Option<Fired<N>> {
        if self.cancel_timer.fire(now) {
            return Some(Fired::Cancel);
        }
        if self.press_timer.fire(now) {
            return self.press_event.map(Fired::Promote);
        }
        None
    }

    /// Earliest pending deadline.
    pub(crate) fn deadline(&self) -> Option<u64> {
        match (self.press_timer.deadline(), self.cancel_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether either timer is pending.
    pub(crate) fn has_pending_timer(&self) -> bool {
        self.press_timer.is_pending() || self.cancel_timer.is_pending()
    }

    /// Drops the press and both timers.
    pub(crate) fn reset(&mut self) {
        self.touched = false;
        self.press_event = None;
        self.press_timer.cancel();
        self.cancel_timer.cancel();
    }
}
