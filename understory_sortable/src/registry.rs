// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry: items, handles, and group boundaries, plus the single drag session.
//!
//! Nodes are registered explicitly and resolved by walking the host's parent
//! chain ([`Geometry::parent`]) until a registered node is found.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sortable::{GroupSpec, Registry};
//!
//! // Nodes are `u32`s, collections are `&str`s.
//! let mut registry = Registry::<u32, &str>::new();
//! let a = registry.register_item(10, "todo", 0);
//! let b = registry.register_item(11, "todo", 1);
//! registry.register_group(1, GroupSpec::new("todo").accepting(["done"]));
//!
//! let order: Vec<u32> = registry.items_in(&"todo").iter().map(|i| i.node).collect();
//! assert_eq!(order, [10, 11]);
//!
//! registry.unregister_item(a);
//! assert!(registry.item(a).is_none());
//! assert_eq!(registry.item(b).unwrap().index, 1);
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Size, Vec2};
use smallvec::SmallVec;

use crate::host::{Geometry, GroupState, ItemInfo, SortableHost};
use crate::session::DragSession;
use crate::types::{GroupId, HandleId, ItemId};

/// Placeholder height used when a group has no drag in progress.
pub const DEFAULT_NODE_HEIGHT: f64 = 75.0;

/// Description of a group boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSpec<C> {
    /// Collection this boundary belongs to.
    pub collection: C,
    /// Collections whose items may be dropped into this one.
    pub accepts: SmallVec<[C; 4]>,
    /// Item count hint; a foreign item entering the group is appended at this index.
    pub count: usize,
    /// Placeholder height reported while no drag is in progress.
    pub default_node_height: f64,
}

impl<C> GroupSpec<C> {
    /// A group for `collection` that accepts no foreign items.
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            accepts: SmallVec::new(),
            count: 0,
            default_node_height: DEFAULT_NODE_HEIGHT,
        }
    }

    /// Adds collections whose items may enter this group.
    #[must_use]
    pub fn accepting(mut self, sources: impl IntoIterator<Item = C>) -> Self {
        self.accepts.extend(sources);
        self
    }

    /// Sets the item count hint.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the idle placeholder height.
    #[must_use]
    pub fn with_default_node_height(mut self, height: f64) -> Self {
        self.default_node_height = height;
        self
    }
}

#[derive(Clone, Debug)]
struct ItemEntry<N, C> {
    node: N,
    collection: C,
    index: usize,
    edge_offset: Option<Vec2>,
}

#[derive(Clone, Debug)]
struct Slot<N, C> {
    generation: u32,
    entry: Option<ItemEntry<N, C>>,
}

#[derive(Clone, Debug)]
struct GroupEntry<N, C> {
    id: GroupId,
    node: N,
    spec: GroupSpec<C>,
}

/// The item under the pointer at press time, and where it currently sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Active<C> {
    /// Current collection (changes on transfer).
    pub collection: C,
    /// Working index in that collection.
    pub index: usize,
}

/// Where the current press or drag started.
#[derive(Clone, Debug, PartialEq)]
pub struct Start<N, C> {
    /// Item that was pressed.
    pub item: ItemId,
    /// Its node; re-pointed if the host remounts the item mid-drag.
    pub node: N,
    /// Start collection.
    pub collection: C,
    /// Start index.
    pub index: usize,
    /// Helper size computed at press time.
    pub helper_size: Size,
}

/// Owner of all collections, groups, and the drag session.
#[derive(Clone, Debug)]
pub struct Registry<N, C> {
    slots: Vec<Slot<N, C>>,
    free_list: Vec<u32>,
    by_node: HashMap<N, ItemId>,
    collections: HashMap<C, Vec<ItemId>>,
    handles: HashMap<N, HandleId>,
    next_handle: u32,
    groups: HashMap<C, GroupEntry<N, C>>,
    group_nodes: HashMap<N, C>,
    next_group: u32,
    active: Option<Active<C>>,
    start: Option<Start<N, C>>,
    session: Option<DragSession<N, C>>,
}

impl<N, C> Default for Registry<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> Registry<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Clone + Eq + Hash + Debug,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            by_node: HashMap::new(),
            collections: HashMap::new(),
            handles: HashMap::new(),
            next_handle: 0,
            groups: HashMap::new(),
            group_nodes: HashMap::new(),
            next_group: 0,
            active: None,
            start: None,
            session: None,
        }
    }

    // --- items ---

    /// Registers `node` as the item at `index` in `collection`.
    ///
    /// If a drag is in progress and this is the start position, the drag is
    /// re-pointed at the new node (windowed lists remount items while scrolling).
    pub fn register_item(&mut self, node: N, collection: C, index: usize) -> ItemId {
        if let Some(old) = self.by_node.get(&node).copied() {
            self.unregister_item(old);
        }
        let entry = ItemEntry {
            node,
            collection: collection.clone(),
            index,
            edge_offset: None,
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.saturating_add(1);
            slot.entry = Some(entry);
            ItemId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Item counts stay far below u32::MAX"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            ItemId::new(idx, 1)
        };
        self.by_node.insert(node, id);
        self.collections
            .entry(collection.clone())
            .or_default()
            .push(id);

        if let Some(start) = &mut self.start
            && start.collection == collection
            && start.index == index
        {
            tracing::trace!(?node, "start item remounted");
            start.node = node;
            start.item = id;
            if let Some(session) = &mut self.session {
                session.node = node;
                session.item = id;
            }
        }
        id
    }

    /// Unregisters an item. Stale tokens are ignored.
    pub fn unregister_item(&mut self, id: ItemId) {
        let Some(entry) = self.take_entry(id) else {
            tracing::debug!(?id, "unregister of stale item ignored");
            return;
        };
        self.by_node.remove(&entry.node);
        if let Some(ids) = self.collections.get_mut(&entry.collection) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.collections.remove(&entry.collection);
            }
        }
        self.free_list.push(id.0);
    }

    /// Changes an item's index (the host re-rendered the collection).
    pub fn set_item_index(&mut self, id: ItemId, index: usize) {
        if let Some(entry) = self.entry_mut(id) {
            entry.index = index;
            entry.edge_offset = None;
        }
    }

    /// Looks up an item.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<ItemInfo<N, C>> {
        self.entry(id).map(|e| ItemInfo {
            node: e.node,
            index: e.index,
            collection: e.collection.clone(),
        })
    }

    /// Looks up the item registered for `node`.
    #[must_use]
    pub fn item_for_node(&self, node: N) -> Option<ItemId> {
        self.by_node.get(&node).copied()
    }

    /// Items of `collection` in index order.
    #[must_use]
    pub fn ordered_items(&self, collection: &C) -> Vec<ItemId> {
        let mut ids = self.collections.get(collection).cloned().unwrap_or_default();
        ids.sort_by_key(|&id| self.entry(id).map_or(usize::MAX, |e| e.index));
        ids
    }

    /// Item descriptions of `collection` in index order.
    #[must_use]
    pub fn items_in(&self, collection: &C) -> Vec<ItemInfo<N, C>> {
        self.ordered_items(collection)
            .into_iter()
            .filter_map(|id| self.item(id))
            .collect()
    }

    /// Number of items registered in `collection`.
    #[must_use]
    pub fn len(&self, collection: &C) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }

    /// Item at `index` in `collection`.
    #[must_use]
    pub fn item_at(&self, collection: &C, index: usize) -> Option<ItemId> {
        self.collections.get(collection)?.iter().copied().find(|&id| {
            self.entry(id)
                .is_some_and(|e| e.index == index)
        })
    }

    /// Nearest registered item at or above `node`.
    pub fn closest_item(&self, node: N, geometry: &impl Geometry<N>) -> Option<ItemId> {
        closest(node, geometry, |n| self.by_node.get(&n).copied())
    }

    /// Cached edge offset of an item.
    #[must_use]
    pub fn edge_offset(&self, id: ItemId) -> Option<Vec2> {
        self.entry(id).and_then(|e| e.edge_offset)
    }

    /// Returns the cached edge offset, computing it against `container` on a miss.
    pub(crate) fn ensure_edge_offset(
        &mut self,
        id: ItemId,
        container: N,
        geometry: &impl Geometry<N>,
    ) -> Option<Vec2> {
        let entry = self.entry_mut(id)?;
        let node = entry.node;
        Some(
            *entry
                .edge_offset
                .get_or_insert_with(|| geometry.layout_offset(node, container)),
        )
    }

    /// Clears every cached edge offset in `collection`.
    pub fn clear_edge_offsets(&mut self, collection: &C) {
        let Some(ids) = self.collections.get(collection) else {
            return;
        };
        for &id in ids {
            if let Some(Slot {
                entry: Some(entry),
                ..
            }) = self.slots.get_mut(id.idx())
            {
                entry.edge_offset = None;
            }
        }
    }

    /// Nodes of `collection` in storage order.
    pub(crate) fn nodes_in(&self, collection: &C) -> Vec<N> {
        self.collections
            .get(collection)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.entry(id).map(|e| e.node))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Applies a finished drag: `item` moves from its current slot to `new_index`
    /// in `to`, and indices in both collections are renumbered densely.
    pub(crate) fn apply_move(&mut self, item: ItemId, to: &C, new_index: usize) {
        let Some(from) = self.entry(item).map(|e| e.collection.clone()) else {
            return;
        };
        let mut source = self.ordered_items(&from);
        source.retain(|&id| id != item);
        if from == *to {
            let at = new_index.min(source.len());
            source.insert(at, item);
            self.renumber(&from, source);
        } else {
            let mut target = self.ordered_items(to);
            let at = new_index.min(target.len());
            target.insert(at, item);
            if let Some(entry) = self.entry_mut(item) {
                entry.collection = to.clone();
            }
            self.renumber(&from, source);
            self.renumber(to, target);
        }
    }

    fn renumber(&mut self, collection: &C, ids: Vec<ItemId>) {
        for (index, &id) in ids.iter().enumerate() {
            if let Some(entry) = self.entry_mut(id) {
                entry.index = index;
                entry.edge_offset = None;
            }
        }
        if ids.is_empty() {
            self.collections.remove(collection);
        } else {
            self.collections.insert(collection.clone(), ids);
        }
    }

    // --- handles ---

    /// Registers `node` as a drag handle.
    pub fn register_handle(&mut self, node: N) -> HandleId {
        if let Some(&id) = self.handles.get(&node) {
            return id;
        }
        let id = HandleId(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.handles.insert(node, id);
        id
    }

    /// Unregisters a drag handle.
    pub fn unregister_handle(&mut self, id: HandleId) {
        self.handles.retain(|_, &mut other| other != id);
    }

    /// Nearest registered handle at or above `node`.
    pub fn closest_handle(&self, node: N, geometry: &impl Geometry<N>) -> Option<HandleId> {
        closest(node, geometry, |n| self.handles.get(&n).copied())
    }

    // --- groups ---

    /// Registers `node` as the boundary of a group. Replaces any earlier group
    /// for the same collection.
    pub fn register_group(&mut self, node: N, spec: GroupSpec<C>) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group = self.next_group.wrapping_add(1);
        if let Some(old) = self.groups.remove(&spec.collection) {
            self.group_nodes.remove(&old.node);
        }
        self.group_nodes.insert(node, spec.collection.clone());
        self.groups
            .insert(spec.collection.clone(), GroupEntry { id, node, spec });
        id
    }

    /// Unregisters a group boundary.
    pub fn unregister_group(&mut self, id: GroupId) {
        let Some(collection) = self
            .groups
            .iter()
            .find(|(_, g)| g.id == id)
            .map(|(c, _)| c.clone())
        else {
            return;
        };
        if let Some(group) = self.groups.remove(&collection) {
            self.group_nodes.remove(&group.node);
        }
    }

    /// Updates a group's item count hint.
    pub fn set_collection_count(&mut self, collection: &C, count: usize) {
        if let Some(group) = self.groups.get_mut(collection) {
            group.spec.count = count;
        }
    }

    /// The group registered for `collection`.
    #[must_use]
    pub fn group(&self, collection: &C) -> Option<&GroupSpec<C>> {
        self.groups.get(collection).map(|g| &g.spec)
    }

    /// Boundary node of the group for `collection`.
    #[must_use]
    pub fn group_node(&self, collection: &C) -> Option<N> {
        self.groups.get(collection).map(|g| g.node)
    }

    /// Collection of the nearest group boundary at or above `node`.
    pub fn closest_group(&self, node: N, geometry: &impl Geometry<N>) -> Option<C> {
        closest(node, geometry, |n| self.group_nodes.get(&n).cloned())
    }

    /// Whether items from `source` may be dropped into `target`.
    ///
    /// A collection always accepts its own items; otherwise the target's group
    /// must list `source`. A missing group accepts nothing foreign.
    #[must_use]
    pub fn accepts(&self, target: &C, source: &C) -> bool {
        target == source
            || self
                .groups
                .get(target)
                .is_some_and(|g| g.spec.accepts.contains(source))
    }

    /// Whether `collection` is closed to the current drag.
    ///
    /// Only meaningful while a press or drag is in progress; always `false` for
    /// the start collection.
    #[must_use]
    pub fn is_group_disabled(&self, collection: &C) -> bool {
        self.start
            .as_ref()
            .is_some_and(|start| !self.accepts(collection, &start.collection))
    }

    /// Render state for the group of `collection`.
    #[must_use]
    pub fn group_state(&self, collection: &C) -> Option<GroupState<N, C>> {
        let group = self.groups.get(collection)?;
        let placeholder = match (&self.active, &self.start) {
            (Some(active), Some(start))
                if active.collection == *collection && start.collection != *collection =>
            {
                Some(start.node)
            }
            _ => None,
        };
        let placeholder_size = self.start.as_ref().map_or(
            Size::new(0.0, group.spec.default_node_height),
            |s| s.helper_size,
        );
        Some(GroupState {
            collection: collection.clone(),
            disabled: self.is_group_disabled(collection),
            placeholder,
            placeholder_size,
        })
    }

    /// Pushes every group's render state to the host.
    pub fn refresh_all_groups<H>(&self, host: &mut H)
    where
        H: SortableHost<N, C> + ?Sized,
    {
        for collection in self.groups.keys() {
            self.refresh_group(collection, host);
        }
    }

    /// Pushes one group's render state to the host.
    ///
    /// A group closed to the drag is only reported disabled when
    /// [`SortableHost::is_disabled_checker`] agrees for the start collection.
    pub fn refresh_group<H>(&self, collection: &C, host: &mut H)
    where
        H: SortableHost<N, C> + ?Sized,
    {
        if let Some(mut state) = self.group_state(collection) {
            if let Some(start) = &self.start {
                state.disabled &= host.is_disabled_checker(&start.collection);
            }
            host.group_changed(&state);
        }
    }

    // --- press / drag state ---

    /// The active item, while a press or drag is in progress.
    #[must_use]
    pub fn active(&self) -> Option<&Active<C>> {
        self.active.as_ref()
    }

    /// Where the current press or drag started.
    #[must_use]
    pub fn start(&self) -> Option<&Start<N, C>> {
        self.start.as_ref()
    }

    /// The drag session, while dragging.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<N, C>> {
        self.session.as_ref()
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut DragSession<N, C>> {
        self.session.as_mut()
    }

    pub(crate) fn mark_pressed(&mut self, item: ItemId, helper_size: Size) -> bool {
        let Some(entry) = self.entry(item) else {
            return false;
        };
        let (node, collection, index) = (entry.node, entry.collection.clone(), entry.index);
        self.active = Some(Active {
            collection: collection.clone(),
            index,
        });
        self.start = Some(Start {
            item,
            node,
            collection,
            index,
            helper_size,
        });
        true
    }

    pub(crate) fn set_active(&mut self, collection: C, index: usize) {
        self.active = Some(Active { collection, index });
    }

    pub(crate) fn begin_session(&mut self, session: DragSession<N, C>) {
        debug_assert!(self.session.is_none(), "only one drag session may exist");
        self.session = Some(session);
    }

    pub(crate) fn take_session(&mut self) -> Option<DragSession<N, C>> {
        self.session.take()
    }

    /// Drops the active/start markers.
    pub(crate) fn release(&mut self) {
        self.active = None;
        self.start = None;
    }

    // --- slots ---

    fn entry(&self, id: ItemId) -> Option<&ItemEntry<N, C>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: ItemId) -> Option<&mut ItemEntry<N, C>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_mut()
    }

    fn take_entry(&mut self, id: ItemId) -> Option<ItemEntry<N, C>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.take()
    }
}

/// Walks from `node` up the parent chain, returning the first hit of `lookup`.
fn closest<N: Copy, T>(
    node: N,
    geometry: &impl Geometry<N>,
    lookup: impl Fn(N) -> Option<T>,
) -> Option<T> {
    let mut current = Some(node);
    while let Some(n) = current {
        if let Some(found) = lookup(n) {
            return Some(found);
        }
        current = geometry.parent(n);
    }
    None
}
