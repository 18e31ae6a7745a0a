// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-proximity autoscroll.
//!
//! [`scroll_intent`] compares the helper translation against its bounds. A
//! bound is crossed once the translation comes within half the helper's extent
//! of it; the crossing with the largest proportional overshoot wins, and the
//! speed grows linearly with that overshoot.
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_sortable::{Span, TranslateBounds, scroll_intent};
//!
//! let bounds = TranslateBounds {
//!     x: None,
//!     y: Some(Span { min: -100.0, max: 400.0 }),
//! };
//! let helper = Size::new(200.0, 50.0);
//!
//! // Comfortably inside: nothing to do.
//! assert!(scroll_intent(Vec2::new(0.0, 100.0), &bounds, helper, 10.0).is_none());
//!
//! // 25px past the trailing threshold (375): scroll down at 10 * 25 / 50.
//! let intent = scroll_intent(Vec2::new(0.0, 400.0), &bounds, helper, 10.0).unwrap();
//! assert_eq!(intent.direction, Vec2::new(0.0, 1.0));
//! assert_eq!(intent.delta(), Vec2::new(0.0, 5.0));
//! ```

use kurbo::{Size, Vec2};

use crate::session::{DragSession, Span, TranslateBounds};
use crate::timer::Interval;

/// Direction and speed of a scroll nudge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollIntent {
    /// Unit vector along the scrolled axis.
    pub direction: Vec2,
    /// Pixels per nudge.
    pub speed: f64,
}

impl ScrollIntent {
    /// Scroll applied by one nudge.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.direction * self.speed
    }
}

/// Candidate crossings on one axis: `(direction sign, overshoot / extent)`.
fn crossings(t: f64, span: Option<Span>, extent: f64) -> [Option<(f64, f64)>; 2] {
    let Some(span) = span else {
        return [None, None];
    };
    let half = extent / 2.0;
    let ratio = |over: f64| if extent > 0.0 { over / extent } else { 0.0 };
    let forward = (t >= span.max - half).then(|| (1.0, ratio(t - (span.max - half))));
    let backward = (t <= span.min + half).then(|| (-1.0, ratio((span.min + half) - t)));
    [forward, backward]
}

/// Computes the autoscroll request for a helper at `translate`, if any.
///
/// Candidates are considered in the order down, right, up, left; a later
/// candidate only wins with a strictly larger overshoot.
#[must_use]
pub fn scroll_intent(
    translate: Vec2,
    bounds: &TranslateBounds,
    helper: Size,
    acceleration: f64,
) -> Option<ScrollIntent> {
    let [down, up] = crossings(translate.y, bounds.y, helper.height);
    let [right, left] = crossings(translate.x, bounds.x, helper.width);
    let candidates = [
        down.map(|(s, r)| (Vec2::new(0.0, s), r)),
        right.map(|(s, r)| (Vec2::new(s, 0.0), r)),
        up.map(|(s, r)| (Vec2::new(0.0, s), r)),
        left.map(|(s, r)| (Vec2::new(s, 0.0), r)),
    ];

    let mut best: Option<(Vec2, f64)> = None;
    for (direction, ratio) in candidates.into_iter().flatten() {
        if best.is_none_or(|(_, r)| ratio > r) {
            best = Some((direction, ratio));
        }
    }
    best.map(|(direction, ratio)| ScrollIntent {
        direction,
        speed: acceleration * ratio.abs(),
    })
}

/// Owner of the single repeating nudge task.
#[derive(Clone, Debug)]
pub(crate) struct AutoscrollController<N> {
    interval: Interval,
    target: Option<(N, Vec2)>,
    acceleration: f64,
}

impl<N: Copy + core::fmt::Debug> AutoscrollController<N> {
    pub(crate) fn new(period: u64, acceleration: f64) -> Self {
        Self {
            interval: Interval::new(period),
            target: None,
            acceleration,
        }
    }

    /// Re-evaluates the session against the scroll container, falling back to
    /// `outer` when the scroll container has nothing to do. Any running task is
    /// replaced.
    pub(crate) fn update<C: Clone>(&mut self, session: &DragSession<N, C>, outer: N, now: u64) {
        let was_running = self.interval.is_running();
        self.interval.stop();
        self.target = None;

        let helper = session.helper_size();
        let translate = session.translate();
        let target = scroll_intent(translate, &session.bounds(), helper, self.acceleration)
            .map(|intent| (session.scroll_container(), intent))
            .or_else(|| {
                scroll_intent(translate, &session.outer_bounds(), helper, self.acceleration)
                    .map(|intent| (outer, intent))
            });

        if let Some((container, intent)) = target {
            if !was_running {
                tracing::debug!(?container, direction = ?intent.direction, "autoscroll started");
            }
            self.target = Some((container, intent.delta()));
            self.interval.start(now);
        } else if was_running {
            tracing::debug!("autoscroll stopped");
        }
    }

    /// Returns the container and delta to scroll if a nudge is due.
    pub(crate) fn tick(&mut self, now: u64) -> Option<(N, Vec2)> {
        if self.interval.fire(now) {
            self.target
        } else {
            None
        }
    }

    pub(crate) fn stop(&mut self) {
        self.interval.stop();
        self.target = None;
    }

    pub(crate) fn deadline(&self) -> Option<u64> {
        self.interval.deadline()
    }

    pub(crate) fn is_running(&self) -> bool {
        self.interval.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: f64, max: f64) -> TranslateBounds {
        TranslateBounds {
            x: Some(Span { min, max }),
            y: Some(Span { min, max }),
        }
    }

    const HELPER: Size = Size::new(100.0, 100.0);

    #[test]
    fn direction_follows_threshold() {
        let b = bounds(-200.0, 200.0);
        // Threshold on both sides is 150 away from the bound.
        assert!(scroll_intent(Vec2::ZERO, &b, HELPER, 10.0).is_none());
        assert!(scroll_intent(Vec2::new(149.0, -149.0), &b, HELPER, 10.0).is_none());

        let fwd = scroll_intent(Vec2::new(150.0, 0.0), &b, HELPER, 10.0).unwrap();
        assert_eq!(fwd.direction, Vec2::new(1.0, 0.0));
        assert_eq!(fwd.speed, 0.0);

        let back = scroll_intent(Vec2::new(0.0, -170.0), &b, HELPER, 10.0).unwrap();
        assert_eq!(back.direction, Vec2::new(0.0, -1.0));
        assert!((back.speed - 2.0).abs() < 1e-9);
    }

    #[test]
    fn largest_overshoot_wins() {
        let b = bounds(-200.0, 200.0);
        // Down by 10, left by 40.
        let intent = scroll_intent(Vec2::new(-190.0, 160.0), &b, HELPER, 10.0).unwrap();
        assert_eq!(intent.direction, Vec2::new(-1.0, 0.0));
        assert!((intent.speed - 4.0).abs() < 1e-9);
    }

    #[test]
    fn ties_prefer_vertical_forward() {
        let b = bounds(-200.0, 200.0);
        let intent = scroll_intent(Vec2::new(170.0, 170.0), &b, HELPER, 10.0).unwrap();
        assert_eq!(intent.direction, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn axes_without_span_never_scroll() {
        let b = TranslateBounds {
            x: None,
            y: Some(Span {
                min: -200.0,
                max: 200.0,
            }),
        };
        assert!(scroll_intent(Vec2::new(10_000.0, 0.0), &b, HELPER, 10.0).is_none());
    }

    #[test]
    fn zero_extent_scrolls_without_speed() {
        let b = bounds(0.0, 0.0);
        let intent = scroll_intent(Vec2::new(0.0, 5.0), &b, Size::ZERO, 10.0).unwrap();
        assert_eq!(intent.speed, 0.0);
    }
}
