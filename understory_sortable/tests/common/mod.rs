// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted host for driving the engine in integration tests.
//!
//! Nodes are `u32`s laid out in content coordinates of the root. Bounding
//! boxes subtract the scroll offsets of every ancestor; layout offsets are
//! plain content-space differences and ignore transforms.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test uses every helper."
)]

use std::collections::{HashMap, HashSet};

use kurbo::{Insets, Point, Rect, Size, Vec2};
use understory_sortable::{
    AxisConfig, Geometry, GroupSpec, GroupState, HelperSpec, ItemInfo, PointerEvent, SortEnd,
    SortOver, Sortable, SortableConfig, SortableHost, VisualSink,
};

pub(crate) type Collection = &'static str;

/// Root of every test layout.
pub(crate) const ROOT: u32 = 0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Start(ItemInfo<u32, Collection>),
    Move,
    Over(SortOver<Collection>),
    End(SortEnd<Collection>),
    Group(GroupState<u32, Collection>),
    ScrollBy(u32, Vec2),
}

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub(crate) parents: HashMap<u32, u32>,
    pub(crate) rects: HashMap<u32, Rect>,
    pub(crate) scroll: HashMap<u32, Vec2>,
    pub(crate) page_scroll: Vec2,
    pub(crate) margins: HashMap<u32, Insets>,
    pub(crate) form_controls: HashSet<u32>,
    pub(crate) axes: HashMap<Collection, AxisConfig>,
    pub(crate) outer_axis: AxisConfig,
    pub(crate) transforms: HashMap<u32, Vec2>,
    pub(crate) transitions: HashMap<u32, Option<u32>>,
    pub(crate) hidden: HashSet<u32>,
    pub(crate) helper: Option<HelperSpec<u32>>,
    pub(crate) helper_transform: Vec2,
    pub(crate) events: Vec<Event>,
    /// Report groups closed to the drag as enabled anyway.
    pub(crate) keep_closed_groups_enabled: bool,
}

impl FakeHost {
    pub(crate) fn new(root: Rect) -> Self {
        let mut host = Self::default();
        host.rects.insert(ROOT, root);
        host
    }

    pub(crate) fn add(&mut self, node: u32, parent: u32, rect: Rect) {
        self.parents.insert(node, parent);
        self.rects.insert(node, rect);
    }

    pub(crate) fn starts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Start(_)))
            .count()
    }

    pub(crate) fn ends(&self) -> Vec<SortEnd<Collection>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::End(end) => Some(end.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn overs(&self) -> Vec<SortOver<Collection>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Over(over) => Some(over.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn scrolls(&self) -> Vec<(u32, Vec2)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::ScrollBy(node, delta) => Some((*node, *delta)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_group_state(&self, collection: Collection) -> Option<GroupState<u32, Collection>> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Group(state) if state.collection == collection => Some(state.clone()),
            _ => None,
        })
    }

    fn ancestor_scroll(&self, node: u32) -> Vec2 {
        let mut total = Vec2::ZERO;
        let mut current = self.parents.get(&node).copied();
        while let Some(n) = current {
            total += self.scroll.get(&n).copied().unwrap_or_default();
            current = self.parents.get(&n).copied();
        }
        total
    }
}

impl Geometry<u32> for FakeHost {
    fn parent(&self, node: u32) -> Option<u32> {
        self.parents.get(&node).copied()
    }

    fn bounding_box(&self, node: u32) -> Rect {
        let rect = self.rects.get(&node).copied().unwrap_or_default();
        rect - self.ancestor_scroll(node) + self.transforms.get(&node).copied().unwrap_or_default()
    }

    fn scroll_offset(&self, node: u32) -> Vec2 {
        self.scroll.get(&node).copied().unwrap_or_default()
    }

    fn layout_offset(&self, node: u32, container: u32) -> Vec2 {
        let origin = |n: u32| self.rects.get(&n).copied().unwrap_or_default().origin();
        origin(node) - origin(container)
    }

    fn margin(&self, node: u32) -> Insets {
        self.margins.get(&node).copied().unwrap_or(Insets::ZERO)
    }

    fn page_scroll(&self) -> Vec2 {
        self.page_scroll
    }

    fn is_form_control(&self, node: u32) -> bool {
        self.form_controls.contains(&node)
    }
}

impl VisualSink<u32> for FakeHost {
    fn set_item_transform(&mut self, node: u32, offset: Vec2, transition: Option<u32>) {
        self.transforms.insert(node, offset);
        self.transitions.insert(node, transition);
    }

    fn clear_item_transform(&mut self, node: u32) {
        self.transforms.remove(&node);
    }

    fn set_ghost_hidden(&mut self, node: u32, hidden: bool) {
        if hidden {
            self.hidden.insert(node);
        } else {
            self.hidden.remove(&node);
        }
    }

    fn create_helper(&mut self, helper: &HelperSpec<u32>) {
        self.helper = Some(helper.clone());
        self.helper_transform = Vec2::ZERO;
    }

    fn set_helper_transform(&mut self, offset: Vec2) {
        self.helper_transform = offset;
    }

    fn remove_helper(&mut self) {
        self.helper = None;
    }

    fn scroll_by(&mut self, container: u32, delta: Vec2) {
        *self.scroll.entry(container).or_default() += delta;
        self.events.push(Event::ScrollBy(container, delta));
    }
}

impl SortableHost<u32, Collection> for FakeHost {
    fn axis(&self, collection: Option<&Collection>) -> AxisConfig {
        collection
            .and_then(|c| self.axes.get(c).copied())
            .unwrap_or(self.outer_axis)
    }

    fn is_disabled_checker(&self, _: &Collection) -> bool {
        !self.keep_closed_groups_enabled
    }

    fn group_changed(&mut self, state: &GroupState<u32, Collection>) {
        self.events.push(Event::Group(state.clone()));
    }

    fn on_sort_start(&mut self, item: &ItemInfo<u32, Collection>, _: &PointerEvent<u32>) {
        self.events.push(Event::Start(item.clone()));
    }

    fn on_sort_move(&mut self, _: &PointerEvent<u32>) {
        self.events.push(Event::Move);
    }

    fn on_sort_over(&mut self, over: &SortOver<Collection>) {
        self.events.push(Event::Over(over.clone()));
    }

    fn on_sort_end(&mut self, end: &SortEnd<Collection>, _: Option<&PointerEvent<u32>>) {
        self.events.push(Event::End(end.clone()));
    }
}

/// Item extent used by [`column`] and [`row`].
pub(crate) const ITEM: Size = Size::new(100.0, 100.0);
/// Gap between consecutive items, modeled as a trailing margin.
pub(crate) const GAP: f64 = 10.0;

/// Lays out `count` items vertically inside `parent`, starting at `origin`.
///
/// Node ids are `first..first + count`. Each item gets a bottom margin of
/// [`GAP`], so one slot is `ITEM.height + GAP`.
pub(crate) fn column(
    host: &mut FakeHost,
    sortable: &mut Sortable<u32, Collection>,
    parent: u32,
    collection: Collection,
    first: u32,
    count: u32,
    origin: Point,
) -> Vec<u32> {
    (0..count)
        .map(|i| {
            let node = first + i;
            let y = origin.y + f64::from(i) * (ITEM.height + GAP);
            host.add(node, parent, Rect::from_origin_size((origin.x, y), ITEM));
            host.margins.insert(node, Insets::new(0.0, 0.0, 0.0, GAP));
            sortable
                .registry_mut()
                .register_item(node, collection, i as usize);
            node
        })
        .collect()
}

/// Lays out `count` items horizontally inside `parent`, starting at `origin`.
///
/// Each item gets a right margin of [`GAP`], so one slot is `ITEM.width + GAP`.
pub(crate) fn row(
    host: &mut FakeHost,
    sortable: &mut Sortable<u32, Collection>,
    parent: u32,
    collection: Collection,
    first: u32,
    count: u32,
    origin: Point,
) -> Vec<u32> {
    (0..count)
        .map(|i| {
            let node = first + i;
            let x = origin.x + f64::from(i) * (ITEM.width + GAP);
            host.add(node, parent, Rect::from_origin_size((x, origin.y), ITEM));
            host.margins.insert(node, Insets::new(0.0, 0.0, GAP, 0.0));
            sortable
                .registry_mut()
                .register_item(node, collection, i as usize);
            node
        })
        .collect()
}

/// A ready engine over a single vertical list of `count` items in a tall root.
pub(crate) fn single_list(
    config: SortableConfig,
    count: u32,
) -> (Sortable<u32, Collection>, FakeHost, Vec<u32>) {
    let mut host = FakeHost::new(Rect::new(0.0, 0.0, 400.0, 2_000.0));
    let mut sortable = Sortable::new(config).expect("valid config");
    sortable.set_container(ROOT);
    let nodes = column(&mut host, &mut sortable, ROOT, "list", 1, count, Point::ZERO);
    (sortable, host, nodes)
}

/// Registers a group boundary node covering `rect`.
pub(crate) fn group(
    host: &mut FakeHost,
    sortable: &mut Sortable<u32, Collection>,
    node: u32,
    rect: Rect,
    spec: GroupSpec<Collection>,
) {
    host.add(node, ROOT, rect);
    sortable.registry_mut().register_group(node, spec);
}

/// Center of a node's current bounding box.
pub(crate) fn center(host: &FakeHost, node: u32) -> Point {
    host.bounding_box(node).center()
}

pub(crate) fn at(target: u32, position: Point) -> PointerEvent<u32> {
    PointerEvent::new(target, position)
}

/// Current order of a collection as node ids.
pub(crate) fn order(sortable: &Sortable<u32, Collection>, collection: Collection) -> Vec<u32> {
    sortable
        .registry()
        .items_in(&collection)
        .iter()
        .map(|i| i.node)
        .collect()
}
