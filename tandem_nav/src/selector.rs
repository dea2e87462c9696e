// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-select a horizontal range.
//!
//! ## Usage
//!
//! 1) On secondary button down, call [`RangeSelector::begin`]. The viewport
//!    under the pointer becomes the gesture's target and two guide markers
//!    appear at the pointer.
//! 2) On each move, call [`RangeSelector::update`] to drag the end marker.
//! 3) On release, call [`RangeSelector::end`]. The markers' horizontal
//!    coordinates, read through the target's mapping, become the horizontal
//!    range of every viewport in the set.
//!
//! Markers live inside [`SelectionGesture::Selecting`], so leaving that state
//! by any path (`end`, [`RangeSelector::cancel`], or dropping the selector)
//! releases them. The gesture also records which [`ViewportSet`] it was
//! started on: once that set is dropped the markers are gone, and a release
//! over any other set aborts instead of applying a range.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use tandem_nav::RangeSelector;
//! use tandem_view::{AxisRange, ViewportSet};
//!
//! let mut set = ViewportSet::new();
//! set.add(
//!     Rect::new(0.0, 0.0, 400.0, 100.0),
//!     AxisRange::new(-1.0, 1.0),
//!     AxisRange::new(0.0, 1.0),
//! );
//!
//! let mut selector = RangeSelector::new();
//! let _ = selector.begin(&set, Point::new(300.0, 50.0));
//! let _ = selector.update(Point::new(200.0, 50.0));
//! assert_eq!(selector.guides().count(), 2);
//!
//! let _ = selector.end(&mut set, Point::new(100.0, 50.0));
//! assert_eq!(selector.guides().count(), 0);
//! assert_eq!(set.iter().next().unwrap().horizontal_range(), AxisRange::new(-0.5, 0.5));
//! ```

use kurbo::Point;
use tandem_view::{AxisRange, SetHandle, ViewportId, ViewportSet};

use crate::event::Outcome;
use crate::marker::GuideMarker;

/// State of a selection gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SelectionGesture {
    /// No gesture in progress; no markers exist.
    #[default]
    Idle,
    /// A drag is in progress over `target`.
    Selecting {
        /// Set the gesture was started on.
        owner: SetHandle,
        /// Viewport whose mapping interprets the markers.
        target: ViewportId,
        /// Marker fixed at the press position.
        start: GuideMarker,
        /// Marker following the pointer.
        end: GuideMarker,
    },
}

/// Drag-to-select state machine: `Idle` → `Selecting` → `Idle`.
#[derive(Clone, Debug, Default)]
pub struct RangeSelector {
    gesture: SelectionGesture,
}

impl RangeSelector {
    /// Creates an idle selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current gesture state.
    #[must_use]
    pub fn gesture(&self) -> &SelectionGesture {
        &self.gesture
    }

    /// Returns `true` while a gesture is in progress on a set that still
    /// exists.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.live().is_some()
    }

    /// Returns the target viewport of the gesture in progress.
    #[must_use]
    pub fn target(&self) -> Option<ViewportId> {
        self.live().map(|(target, _, _)| target)
    }

    /// Iterates the live guide markers.
    ///
    /// Empty while idle and once the set the gesture was started on has
    /// been dropped.
    pub fn guides(&self) -> impl Iterator<Item = &GuideMarker> {
        self.live()
            .map(|(_, start, end)| [start, end])
            .into_iter()
            .flatten()
    }

    fn live(&self) -> Option<(ViewportId, &GuideMarker, &GuideMarker)> {
        match &self.gesture {
            SelectionGesture::Selecting {
                owner,
                target,
                start,
                end,
            } if owner.is_alive() => Some((*target, start, end)),
            _ => None,
        }
    }

    /// Starts a gesture at `pos` over the viewport under it.
    ///
    /// Does nothing if a gesture is already in progress or no viewport is
    /// under `pos`. A gesture left behind by a dropped set is replaced.
    pub fn begin(&mut self, set: &ViewportSet, pos: Point) -> Outcome {
        if self.is_selecting() {
            return Outcome::Ignored;
        }
        let Some(viewport) = set.hit_test(pos).and_then(|id| set.get(id)) else {
            log::trace!("selection not started: no viewport under {pos:?}");
            return Outcome::Ignored;
        };
        let target = viewport.id();
        let clip = viewport.bounds();
        log::debug!("selection started over {target:?} at {pos:?}");
        self.gesture = SelectionGesture::Selecting {
            owner: set.handle(),
            target,
            start: GuideMarker::new(target, pos, clip),
            end: GuideMarker::new(target, pos, clip),
        };
        Outcome::Changed
    }

    /// Moves the end marker to `pos`.
    ///
    /// A gesture whose set has been dropped is abandoned instead.
    pub fn update(&mut self, pos: Point) -> Outcome {
        if let SelectionGesture::Selecting { owner, .. } = &self.gesture
            && !owner.is_alive()
        {
            log::debug!("selection aborted: its viewport set was dropped");
            self.gesture = SelectionGesture::Idle;
            return Outcome::Changed;
        }
        match &mut self.gesture {
            SelectionGesture::Idle => Outcome::Ignored,
            SelectionGesture::Selecting { end, .. } => {
                if end.anchor() == pos {
                    return Outcome::Ignored;
                }
                end.set_anchor(pos);
                Outcome::Changed
            }
        }
    }

    /// Finishes the gesture at `pos` and applies the selected range.
    ///
    /// Both marker coordinates are read through the target viewport's
    /// horizontal mapping and normalized, so dragging left or right selects
    /// the same range. The range is applied to every viewport in `set`.
    /// Equal coordinates cancel the gesture without touching any range. If
    /// `set` is not the set the gesture was started on, or the target
    /// viewport is gone, the gesture is dropped.
    pub fn end(&mut self, set: &mut ViewportSet, pos: Point) -> Outcome {
        let SelectionGesture::Selecting {
            owner,
            target,
            start,
            mut end,
        } = core::mem::take(&mut self.gesture)
        else {
            return Outcome::Ignored;
        };
        if !owner.refers_to(set) {
            log::debug!("selection aborted: released over a different viewport set");
            return Outcome::Changed;
        }
        end.set_anchor(pos);

        let Some(viewport) = set.get(target) else {
            log::debug!("selection aborted: {target:?} no longer exists");
            return Outcome::Changed;
        };
        let axis = viewport.horizontal();
        let a = axis.pixel_to_coord(start.anchor().x);
        let b = axis.pixel_to_coord(end.anchor().x);
        if a == b {
            log::debug!("selection cancelled: zero-width range at {a}");
            return Outcome::Changed;
        }

        let range = AxisRange::new(a, b);
        log::debug!("selection applied: [{}, {}]", range.min, range.max);
        set.set_horizontal_range(range);
        Outcome::Changed
    }

    /// Abandons any gesture in progress, releasing its markers.
    pub fn cancel(&mut self) -> Outcome {
        if matches!(self.gesture, SelectionGesture::Idle) {
            return Outcome::Ignored;
        }
        log::debug!("selection cancelled");
        self.gesture = SelectionGesture::Idle;
        Outcome::Changed
    }

    /// Cancels the gesture if it targets `id`.
    ///
    /// Call this when a viewport is removed from the set.
    pub fn viewport_removed(&mut self, id: ViewportId) -> Outcome {
        if self.target() == Some(id) {
            return self.cancel();
        }
        Outcome::Ignored
    }
}
