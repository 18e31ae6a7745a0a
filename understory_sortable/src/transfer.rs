// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-collection transfer.
//!
//! A move over the boundary of another group re-homes the active item there,
//! provided that group accepts the collection the drag started in.

use core::fmt::Debug;
use core::hash::Hash;

use crate::host::SortableHost;
use crate::registry::Registry;

/// Re-homes the active item if `target` lies inside a foreign group that
/// accepts the start collection. Returns the new collection on success.
///
/// Without a drag session only the active marker moves.
pub(crate) fn try_transfer<N, C, H>(
    registry: &mut Registry<N, C>,
    host: &mut H,
    target: N,
) -> Option<C>
where
    N: Copy + Eq + Hash + Debug,
    C: Clone + Eq + Hash + Debug,
    H: SortableHost<N, C>,
{
    let active = registry.active()?.collection.clone();
    let to = registry.closest_group(target, &*host)?;
    if to == active {
        return None;
    }
    let start = registry.start()?;
    let (start_collection, start_index) = (start.collection.clone(), start.index);
    if !registry.accepts(&to, &start_collection) {
        tracing::trace!(?to, from = ?start_collection, "transfer refused");
        return None;
    }

    for node in registry.nodes_in(&active) {
        host.clear_item_transform(node);
    }
    registry.clear_edge_offsets(&active);

    let index = if to == start_collection {
        start_index
    } else {
        // The count hint may lag behind registration.
        registry
            .group(&to)
            .map_or(0, |g| g.count)
            .max(registry.len(&to))
    };

    if let Some(container) = registry.group_node(&to)
        && let Some(session) = registry.session_mut()
    {
        let new_scroll = host.scroll_offset(container);
        let rect = host.bounding_box(container);
        session.rehome(to.clone(), index, container, rect, new_scroll);
    }
    registry.set_active(to.clone(), index);

    registry.refresh_group(&active, host);
    registry.refresh_group(&to, host);
    tracing::debug!(from = ?active, ?to, index, "item transferred");
    Some(to)
}
