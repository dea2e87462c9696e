// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point, Rect};
use tandem_view::ViewportId;

/// A vertical guide line marking one end of a pending range selection.
///
/// Markers are plain values owned by the selection gesture. They exist only
/// while a gesture is in progress; renderers read them through
/// [`crate::RangeSelector::guides`].
#[derive(Clone, Debug, PartialEq)]
pub struct GuideMarker {
    target: ViewportId,
    anchor: Point,
    clip: Rect,
}

impl GuideMarker {
    pub(crate) fn new(target: ViewportId, anchor: Point, clip: Rect) -> Self {
        Self {
            target,
            anchor,
            clip,
        }
    }

    /// Returns the viewport this marker is attached to.
    #[must_use]
    pub fn target(&self) -> ViewportId {
        self.target
    }

    /// Returns the pixel position the marker is anchored at.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the clip rectangle: the target viewport's draw bounds.
    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub(crate) fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// Returns the guide as a vertical line spanning the clip height.
    #[must_use]
    pub fn line(&self) -> Line {
        Line::new(
            (self.anchor.x, self.clip.y0),
            (self.anchor.x, self.clip.y1),
        )
    }
}
