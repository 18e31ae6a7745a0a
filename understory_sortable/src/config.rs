// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration: confirmation gates, ghost/helper options, and lock offsets.
//!
//! Options that need access to the host (per-collection axes, helper sizing,
//! the cancel-start predicate) live on [`SortableHost`](crate::SortableHost);
//! everything here is plain data.
//!
//! ```
//! use understory_sortable::{ConfigError, LockOffset, SortableConfig};
//!
//! let config = SortableConfig::default()
//!     .with_distance(8.0)
//!     .with_lock_to_container_edges(true)
//!     .with_lock_offset(LockOffset::parse_pair("0px", "25%").unwrap());
//! assert!(config.validate().is_ok());
//!
//! let bad = SortableConfig::default().with_distance(8.0).with_press_delay(200);
//! assert!(matches!(bad.validate(), Err(ConfigError::ConflictingGates { .. })));
//! ```

use alloc::string::ToString;

use kurbo::{Size, Vec2};

use crate::error::ConfigError;

/// How a press is promoted to a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Gate {
    /// The press starts a drag right away.
    Immediate,
    /// The pointer must travel this many pixels (Manhattan distance).
    Distance(f64),
    /// The press must be held for this many milliseconds.
    Delay(u64),
}

/// One side of a lock offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LockValue {
    /// Absolute offset in pixels.
    Pixels(f64),
    /// Percentage of the helper's extent on each axis.
    Percent(f64),
}

impl LockValue {
    /// Parses `"<number>px"` or `"<number>%"`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let trimmed = text.trim();
        let (number, percent) = if let Some(number) = trimmed.strip_suffix('%') {
            (number, true)
        } else if let Some(number) = trimmed.strip_suffix("px") {
            (number, false)
        } else {
            return Err(ConfigError::MalformedLockOffset(text.to_string()));
        };
        let digits = number.strip_prefix(['+', '-']).unwrap_or(number);
        let plain = digits.chars().all(|c| c.is_ascii_digit() || c == '.')
            && digits.chars().filter(|&c| c == '.').count() <= 1
            && digits.chars().any(|c| c.is_ascii_digit());
        if !plain {
            return Err(ConfigError::MalformedLockOffset(text.to_string()));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| ConfigError::MalformedLockOffset(text.to_string()))?;
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteLockOffset);
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Pixels(value)
        })
    }

    fn is_finite(self) -> bool {
        match self {
            Self::Pixels(v) | Self::Percent(v) => v.is_finite(),
        }
    }

    /// Resolves the value to pixels on both axes for a helper of the given size.
    #[must_use]
    pub fn to_pixels(self, helper: Size) -> Vec2 {
        match self {
            Self::Pixels(v) => Vec2::new(v, v),
            Self::Percent(p) => Vec2::new(p * helper.width / 100.0, p * helper.height / 100.0),
        }
    }
}

/// Minimum/maximum inset applied when the helper is locked to its container edges.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LockOffset {
    /// Offset from the leading edge.
    pub min: LockValue,
    /// Offset from the trailing edge.
    pub max: LockValue,
}

impl LockOffset {
    /// Uses the same value for both edges.
    #[must_use]
    pub const fn uniform(value: LockValue) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Builds an offset from a list holding exactly one or two values.
    pub fn from_values(values: &[LockValue]) -> Result<Self, ConfigError> {
        match *values {
            [value] => Ok(Self::uniform(value)),
            [min, max] => Ok(Self { min, max }),
            _ => Err(ConfigError::LockOffsetArity(values.len())),
        }
    }

    /// Parses a single value used for both edges.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        LockValue::parse(text).map(Self::uniform)
    }

    /// Parses distinct leading/trailing values.
    pub fn parse_pair(min: &str, max: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            min: LockValue::parse(min)?,
            max: LockValue::parse(max)?,
        })
    }

    /// Resolves both edges to pixels for a helper of the given size.
    #[must_use]
    pub fn to_pixels(&self, helper: Size) -> [Vec2; 2] {
        [self.min.to_pixels(helper), self.max.to_pixels(helper)]
    }
}

impl Default for LockOffset {
    /// Half the helper on both edges.
    fn default() -> Self {
        Self::uniform(LockValue::Percent(50.0))
    }
}

/// Plain-data configuration for [`Sortable`](crate::Sortable).
#[derive(Clone, Debug, PartialEq)]
pub struct SortableConfig {
    /// Pixel distance before a press becomes a drag; `0` disables the gate.
    pub distance: f64,
    /// Hold time in milliseconds before a press becomes a drag; `0` disables the gate.
    pub press_delay: u64,
    /// Movement tolerated while a delayed press is pending (default: 5).
    pub press_threshold: f64,
    /// Only presses on a registered handle may start a drag.
    pub use_drag_handle: bool,
    /// Hide the source node while it is being dragged (default: true).
    pub hide_sortable_ghost: bool,
    /// Clamp the helper translation to the container bounds.
    pub lock_to_container_edges: bool,
    /// Inset used when `lock_to_container_edges` is set (default: `50%`).
    pub lock_offset: LockOffset,
    /// Shift animation hint forwarded to the visual sink, in milliseconds (default: 300).
    pub transition_duration: u32,
    /// Period of the autoscroll nudge task, in milliseconds (default: 5).
    pub autoscroll_interval: u64,
    /// Scroll speed per unit of proportional overshoot (default: 10).
    pub autoscroll_acceleration: f64,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            distance: 0.0,
            press_delay: 0,
            press_threshold: 5.0,
            use_drag_handle: false,
            hide_sortable_ghost: true,
            lock_to_container_edges: false,
            lock_offset: LockOffset::default(),
            transition_duration: 300,
            autoscroll_interval: 5,
            autoscroll_acceleration: 10.0,
        }
    }
}

impl SortableConfig {
    /// Sets the distance gate.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the press-delay gate.
    #[must_use]
    pub fn with_press_delay(mut self, ms: u64) -> Self {
        self.press_delay = ms;
        self
    }

    /// Sets the jitter tolerance for delayed presses.
    #[must_use]
    pub fn with_press_threshold(mut self, threshold: f64) -> Self {
        self.press_threshold = threshold;
        self
    }

    /// Restricts press origins to registered handles.
    #[must_use]
    pub fn with_drag_handle(mut self, enabled: bool) -> Self {
        self.use_drag_handle = enabled;
        self
    }

    /// Sets whether the source node is hidden while dragging.
    #[must_use]
    pub fn with_hide_sortable_ghost(mut self, hide: bool) -> Self {
        self.hide_sortable_ghost = hide;
        self
    }

    /// Sets whether helper translation is clamped to the container.
    #[must_use]
    pub fn with_lock_to_container_edges(mut self, lock: bool) -> Self {
        self.lock_to_container_edges = lock;
        self
    }

    /// Sets the lock offset.
    #[must_use]
    pub fn with_lock_offset(mut self, offset: LockOffset) -> Self {
        self.lock_offset = offset;
        self
    }

    /// Sets the shift animation hint.
    #[must_use]
    pub fn with_transition_duration(mut self, ms: u32) -> Self {
        self.transition_duration = ms;
        self
    }

    /// Sets the autoscroll period.
    #[must_use]
    pub fn with_autoscroll_interval(mut self, ms: u64) -> Self {
        self.autoscroll_interval = ms;
        self
    }

    /// Checks the configuration for contradictions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distance > 0.0 && self.press_delay > 0 {
            return Err(ConfigError::ConflictingGates {
                distance: self.distance,
                press_delay: self.press_delay,
            });
        }
        if !self.lock_offset.min.is_finite() || !self.lock_offset.max.is_finite() {
            return Err(ConfigError::NonFiniteLockOffset);
        }
        Ok(())
    }

    /// Returns the confirmation gate selected by this configuration.
    #[must_use]
    pub fn gate(&self) -> Gate {
        if self.distance > 0.0 {
            Gate::Distance(self.distance)
        } else if self.press_delay > 0 {
            Gate::Delay(self.press_delay)
        } else {
            Gate::Immediate
        }
    }

    /// Transition hint, or `None` when shifts should not animate.
    #[must_use]
    pub fn transition(&self) -> Option<u32> {
        (self.transition_duration > 0).then_some(self.transition_duration)
    }
}
