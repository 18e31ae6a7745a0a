// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Sortable: a headless engine for reordering items by dragging.
//!
//! The engine turns raw pointer input into a drag of one item, shifts its
//! siblings to open a gap where it would land, moves it between cooperating
//! collections, and scrolls containers when the helper nears their edges. It
//! owns no view tree: geometry is queried from the host and every visual effect
//! is requested through a sink.
//!
//! - **Registry** ([`Registry`]): items, drag handles, and group boundaries,
//!   registered explicitly and resolved by walking the host's parent chain.
//! - **Gesture gating** ([`SortableConfig`], [`Gate`]): immediate, distance,
//!   or press-delay confirmation, with jitter cancellation for delayed presses.
//! - **Drag session** ([`DragSession`]): geometry captured at drag start, the
//!   helper translation, and its bounds.
//! - **Reorder pass** ([`reorder::compute`]): per-item shifts and the
//!   prospective drop index for lists and grids.
//! - **Transfer**: re-homing the dragged item into another collection whose
//!   group accepts the collection the drag started in.
//! - **Autoscroll** ([`scroll_intent`]): a repeating nudge while the helper
//!   overshoots its container, falling back to the outer container.
//!
//! ## Hosts
//!
//! A host implements [`Geometry`], [`VisualSink`], and [`SortableHost`] for
//! its node handle type `N`. Collections are identified by any `C: Clone + Eq + Hash`.
//!
//! ## Time
//!
//! The engine never sleeps. Pass a monotonic millisecond clock to every call,
//! and call [`Sortable::advance`] once [`Sortable::next_deadline`] is reached.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use understory_sortable::{
//!     Geometry, HelperSpec, Phase, PointerEvent, Sortable, SortableConfig, SortableHost,
//!     VisualSink,
//! };
//!
//! /// Three 40px rows stacked in container 0.
//! struct Rows;
//!
//! impl Geometry<u32> for Rows {
//!     fn parent(&self, node: u32) -> Option<u32> {
//!         (node != 0).then_some(0)
//!     }
//!     fn bounding_box(&self, node: u32) -> Rect {
//!         match node {
//!             0 => Rect::new(0.0, 0.0, 200.0, 120.0),
//!             n => Rect::new(0.0, 40.0 * f64::from(n - 1), 200.0, 40.0 * f64::from(n)),
//!         }
//!     }
//!     fn scroll_offset(&self, _: u32) -> Vec2 {
//!         Vec2::ZERO
//!     }
//!     fn layout_offset(&self, node: u32, _: u32) -> Vec2 {
//!         Vec2::new(0.0, 40.0 * f64::from(node - 1))
//!     }
//! }
//!
//! impl VisualSink<u32> for Rows {
//!     fn set_item_transform(&mut self, _: u32, _: Vec2, _: Option<u32>) {}
//!     fn clear_item_transform(&mut self, _: u32) {}
//!     fn set_ghost_hidden(&mut self, _: u32, _: bool) {}
//!     fn create_helper(&mut self, _: &HelperSpec<u32>) {}
//!     fn set_helper_transform(&mut self, _: Vec2) {}
//!     fn remove_helper(&mut self) {}
//!     fn scroll_by(&mut self, _: u32, _: Vec2) {}
//! }
//!
//! impl SortableHost<u32, &'static str> for Rows {}
//!
//! let mut sortable: Sortable<u32, &str> = Sortable::new(SortableConfig::default()).unwrap();
//! sortable.set_container(0);
//! for (index, node) in [1, 2, 3].into_iter().enumerate() {
//!     sortable.registry_mut().register_item(node, "rows", index);
//! }
//!
//! let mut host = Rows;
//! sortable.on_pointer_down(&PointerEvent::new(1, Point::new(10.0, 20.0)), 0, &mut host);
//! assert_eq!(sortable.phase(), Phase::Dragging);
//!
//! sortable.on_pointer_move(&PointerEvent::new(3, Point::new(10.0, 70.0)), 16, &mut host);
//! assert_eq!(sortable.session().unwrap().drop_index(), 1);
//!
//! sortable.on_pointer_up(&PointerEvent::new(3, Point::new(10.0, 70.0)), &mut host);
//! let order: Vec<u32> = sortable.registry().items_in(&"rows").iter().map(|i| i.node).collect();
//! assert_eq!(order, [2, 1, 3]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. The default `std` feature forwards
//! to `kurbo`, `thiserror`, and `tracing`; enable `libm` instead for `no_std`
//! float support.

#![no_std]

extern crate alloc;

mod autoscroll;
mod config;
mod engine;
mod error;
mod gesture;
mod helper;
mod host;
mod registry;
pub mod reorder;
mod session;
mod timer;
mod transfer;
mod types;

pub use autoscroll::{ScrollIntent, scroll_intent};
pub use config::{Gate, LockOffset, LockValue, SortableConfig};
pub use engine::Sortable;
pub use error::ConfigError;
pub use helper::{FieldKind, FormField, HelperSpec, copy_field_values};
pub use host::{Geometry, GroupState, ItemInfo, SortEnd, SortOver, SortableHost, VisualSink};
pub use registry::{Active, DEFAULT_NODE_HEIGHT, GroupSpec, Registry, Start};
pub use reorder::{ReorderInput, ReorderOutcome, SlotGeometry};
pub use session::{DragSession, Span, TranslateBounds};
pub use timer::{Interval, Timer};
pub use types::{AxisConfig, Axes, Button, GroupId, HandleId, ItemId, LockAxis, Phase, PointerEvent};
