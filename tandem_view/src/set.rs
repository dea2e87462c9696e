// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::axis::AxisRange;
use crate::viewport::{Viewport, ViewportId};

/// Ordered collection of viewports sharing linked horizontal navigation.
///
/// Order is layout order; it only matters for [`ViewportSet::hit_test`],
/// where the first viewport containing the position wins.
///
/// Viewport ids are only unique within one set. Code that outlives a call
/// and must not act on a different set holds a [`SetHandle`].
#[derive(Debug, Default)]
pub struct ViewportSet {
    viewports: Vec<Viewport>,
    next_id: u32,
    token: Arc<()>,
}

/// Weak reference to the identity of a [`ViewportSet`].
///
/// A handle never keeps the set alive. It reports whether that set still
/// exists and whether a given set is the one it was taken from.
#[derive(Clone, Debug)]
pub struct SetHandle(Weak<()>);

impl SetHandle {
    /// Returns `true` while the set this handle was taken from exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Returns `true` if `set` is the live set this handle was taken from.
    #[must_use]
    pub fn refers_to(&self, set: &ViewportSet) -> bool {
        // The weak count keeps the allocation, so the address is never reused.
        self.is_alive() && core::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&set.token))
    }
}

impl PartialEq for SetHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Clone for ViewportSet {
    /// Copies the viewports into a set with its own identity.
    fn clone(&self) -> Self {
        Self {
            viewports: self.viewports.clone(),
            next_id: self.next_id,
            token: Arc::new(()),
        }
    }
}

impl ViewportSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to this set's identity.
    #[must_use]
    pub fn handle(&self) -> SetHandle {
        SetHandle(Arc::downgrade(&self.token))
    }

    /// Appends a viewport and returns its identifier.
    ///
    /// Ranges that are not valid are repaired with
    /// [`AxisRange::sanitized`], so the new viewport always maps finitely.
    pub fn add(&mut self, bounds: Rect, horizontal: AxisRange, vertical: AxisRange) -> ViewportId {
        let id = ViewportId(self.next_id);
        self.next_id += 1;
        self.viewports
            .push(Viewport::new(id, bounds, horizontal, vertical));
        id
    }

    /// Removes a viewport, returning it if it was present.
    pub fn remove(&mut self, id: ViewportId) -> Option<Viewport> {
        let idx = self.viewports.iter().position(|vp| vp.id() == id)?;
        Some(self.viewports.remove(idx))
    }

    /// Returns the viewport with the given identifier.
    #[must_use]
    pub fn get(&self, id: ViewportId) -> Option<&Viewport> {
        self.viewports.iter().find(|vp| vp.id() == id)
    }

    /// Returns the viewport with the given identifier for mutation.
    pub fn get_mut(&mut self, id: ViewportId) -> Option<&mut Viewport> {
        self.viewports.iter_mut().find(|vp| vp.id() == id)
    }

    /// Iterates viewports in layout order.
    pub fn iter(&self) -> impl Iterator<Item = &Viewport> {
        self.viewports.iter()
    }

    /// Iterates viewports mutably in layout order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Viewport> {
        self.viewports.iter_mut()
    }

    /// Returns the number of viewports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    /// Returns `true` if the set holds no viewports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }

    /// Resolves the viewport under a device pixel position.
    #[must_use]
    pub fn hit_test(&self, pos: Point) -> Option<ViewportId> {
        self.viewports
            .iter()
            .find(|vp| vp.contains(pos))
            .map(Viewport::id)
    }

    /// Applies `range` as the horizontal range of every viewport.
    ///
    /// Returns `true` if at least one viewport changed. Invalid ranges
    /// change nothing.
    pub fn set_horizontal_range(&mut self, range: AxisRange) -> bool {
        let mut changed = false;
        for vp in &mut self.viewports {
            changed |= vp.horizontal_mut().set_range(range);
        }
        changed
    }

    /// Returns the union of all viewport bounds, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.viewports
            .iter()
            .map(Viewport::bounds)
            .reduce(|a, b| a.union(b))
    }
}
