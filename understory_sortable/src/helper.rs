// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The helper: a stand-in that follows the pointer while the source stays in place.

use alloc::string::String;

use kurbo::{Insets, Point, Rect, Size};

/// Where and from what the helper should be created.
#[derive(Clone, Debug, PartialEq)]
pub struct HelperSpec<N> {
    /// Node to clone.
    pub source: N,
    /// Initial rect of the helper in viewport coordinates.
    pub rect: Rect,
}

impl<N> HelperSpec<N> {
    /// Places a helper of `size` over the source's bounding box, shifted by its leading margins.
    pub fn over(source: N, bounds: Rect, margin: Insets, size: Size) -> Self {
        let origin = Point::new(bounds.x0 - margin.x0, bounds.y0 - margin.y0);
        Self {
            source,
            rect: Rect::from_origin_size(origin, size),
        }
    }
}

/// Kind of a form field inside a cloned node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-line input.
    Input,
    /// Multi-line text.
    TextArea,
    /// Choice list.
    Select,
    /// File picker; its value is never copied.
    File,
}

/// A form field's kind and current value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    /// Field kind.
    pub kind: FieldKind,
    /// Current value.
    pub value: String,
}

/// Copies live field values from `source` into a freshly cloned field list.
///
/// Fields are matched by position. File fields, and clone fields without a
/// source counterpart, are left untouched. Returns the number of copied values.
///
/// ```
/// use understory_sortable::{FieldKind, FormField, copy_field_values};
///
/// let live = [
///     FormField { kind: FieldKind::Input, value: "typed".into() },
///     FormField { kind: FieldKind::File, value: "a.png".into() },
/// ];
/// let mut clone = [
///     FormField { kind: FieldKind::Input, value: String::new() },
///     FormField { kind: FieldKind::File, value: String::new() },
/// ];
/// assert_eq!(copy_field_values(&live, &mut clone), 1);
/// assert_eq!(clone[0].value, "typed");
/// assert!(clone[1].value.is_empty());
/// ```
pub fn copy_field_values(source: &[FormField], clone: &mut [FormField]) -> usize {
    let mut copied = 0;
    for (target, live) in clone.iter_mut().zip(source) {
        if target.kind == FieldKind::File {
            continue;
        }
        target.value.clone_from(&live.value);
        copied += 1;
    }
    copied
}
