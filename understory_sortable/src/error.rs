// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use alloc::string::String;

use thiserror::Error;

/// Error returned when a [`SortableConfig`](crate::SortableConfig) cannot be used.
///
/// Configuration errors are reported once, when the engine is constructed or
/// when a lock offset is parsed. Nothing at runtime produces them.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Both drag-confirmation gates were set.
    #[error(
        "`distance` ({distance}) and `press_delay` ({press_delay} ms) are both set; use one or the other"
    )]
    ConflictingGates {
        /// Configured distance threshold.
        distance: f64,
        /// Configured press delay.
        press_delay: u64,
    },
    /// A lock offset list did not hold exactly one or two values.
    #[error("lock offset takes a single value or exactly two values, got {0}")]
    LockOffsetArity(usize),
    /// A lock offset string was not a number followed by `px` or `%`.
    #[error("lock offset {0:?} should be a number followed by `px` or `%`")]
    MalformedLockOffset(String),
    /// A lock offset value was NaN or infinite.
    #[error("lock offset values must be finite")]
    NonFiniteLockOffset,
}
