// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: registration tokens, axis configuration, and pointer input.

use kurbo::Point;

/// Token for a registered sortable item.
///
/// Consists of a slot index and a generation counter, so a token that outlives
/// its item never aliases a later registration in the same slot.
///
/// ## Semantics
///
/// - On register, a fresh slot is allocated with generation `1`.
/// - On unregister, the slot is freed; any existing `ItemId` that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented.
///
/// Stale tokens are ignored by every [`Registry`](crate::Registry) operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ItemId(pub(crate) u32, pub(crate) u32);

impl ItemId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Token for a registered drag handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandleId(pub(crate) u32);

/// Token for a registered group boundary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GroupId(pub(crate) u32);

bitflags::bitflags! {
    /// Axes along which an item may move.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// Horizontal movement.
        const X = 0b0000_0001;
        /// Vertical movement.
        const Y = 0b0000_0010;
        /// Both axes; items are laid out as a grid.
        const XY = Self::X.bits() | Self::Y.bits();
    }
}

/// Axis the helper is locked to while dragging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LockAxis {
    /// Only horizontal translation is applied.
    X,
    /// Only vertical translation is applied.
    Y,
}

/// Per-collection movement configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisConfig {
    /// Axes used for reordering and translation bounds.
    pub axes: Axes,
    /// Optional lock applied to the helper translation.
    pub lock_axis: Option<LockAxis>,
}

impl AxisConfig {
    /// Creates a configuration for the given axes without a lock.
    #[must_use]
    pub const fn new(axes: Axes) -> Self {
        Self {
            axes,
            lock_axis: None,
        }
    }

    /// Locks helper translation to the given axis.
    #[must_use]
    pub const fn with_lock_axis(mut self, lock: LockAxis) -> Self {
        self.lock_axis = Some(lock);
        self
    }
}

impl Default for AxisConfig {
    /// Vertical lists, unlocked.
    fn default() -> Self {
        Self::new(Axes::Y)
    }
}

/// Pointer button that produced a press.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary button (or a touch contact).
    #[default]
    Primary,
    /// Middle button.
    Auxiliary,
    /// Secondary (context-menu) button; never starts a sort.
    Secondary,
}

/// Raw pointer input as delivered by the host adapter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent<N> {
    /// Deepest node under the pointer.
    pub target: N,
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Button that is pressed.
    pub button: Button,
    /// Whether the event came from a touch contact.
    pub is_touch: bool,
}

impl<N> PointerEvent<N> {
    /// Creates a primary-button mouse event.
    pub fn new(target: N, position: Point) -> Self {
        Self {
            target,
            position,
            button: Button::Primary,
            is_touch: false,
        }
    }

    /// Replaces the button.
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Marks the event as coming from a touch contact.
    #[must_use]
    pub fn touch(mut self) -> Self {
        self.is_touch = true;
        self
    }
}

/// Lifecycle phase of the engine.
///
/// Release runs the ending step synchronously, so a caller only ever observes
/// these three phases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No press and no drag.
    Idle,
    /// A qualifying press is waiting for its distance/delay gate.
    Pressed,
    /// A drag session is active.
    Dragging,
}
