// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::axis::{Axis, AxisDirection, AxisRange};

/// Default per-wheel-step zoom base used by new viewports.
///
/// A positive wheel step multiplies both ranges by this factor, so values
/// below `1.0` zoom in when scrolling forward.
pub const DEFAULT_ZOOM_BASE: f64 = 0.85;

/// Stable identifier for a [`Viewport`] inside a [`crate::ViewportSet`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportId(pub u32);

/// One plotting region with independent horizontal and vertical ranges.
///
/// The viewport owns its draw bounds in device pixels. The horizontal axis
/// maps onto the bounds' X extent and the vertical axis onto its Y extent,
/// reversed so that larger coordinates are drawn higher up.
#[derive(Clone, Debug)]
pub struct Viewport {
    id: ViewportId,
    bounds: Rect,
    horizontal: Axis,
    vertical: Axis,
    zoom_base: f64,
}

impl Viewport {
    pub(crate) fn new(
        id: ViewportId,
        bounds: Rect,
        horizontal: AxisRange,
        vertical: AxisRange,
    ) -> Self {
        Self {
            id,
            bounds,
            horizontal: Axis::new(horizontal, bounds.x0..bounds.x1, AxisDirection::Forward),
            vertical: Axis::new(vertical, bounds.y0..bounds.y1, AxisDirection::Reversed),
            zoom_base: DEFAULT_ZOOM_BASE,
        }
    }

    /// Returns the identifier assigned by the owning set.
    #[must_use]
    pub fn id(&self) -> ViewportId {
        self.id
    }

    /// Returns the draw bounds in device pixels.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Moves or resizes the draw bounds, keeping both coordinate ranges.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.horizontal.set_pixel_span(bounds.x0..bounds.x1);
        self.vertical.set_pixel_span(bounds.y0..bounds.y1);
    }

    /// Returns `true` if `pos` lies inside the draw bounds.
    #[must_use]
    pub fn contains(&self, pos: Point) -> bool {
        self.bounds.contains(pos)
    }

    /// Returns the horizontal axis mapping.
    #[must_use]
    pub fn horizontal(&self) -> &Axis {
        &self.horizontal
    }

    /// Returns the horizontal axis mapping for mutation.
    pub fn horizontal_mut(&mut self) -> &mut Axis {
        &mut self.horizontal
    }

    /// Returns the vertical axis mapping.
    #[must_use]
    pub fn vertical(&self) -> &Axis {
        &self.vertical
    }

    /// Returns the vertical axis mapping for mutation.
    pub fn vertical_mut(&mut self) -> &mut Axis {
        &mut self.vertical
    }

    /// Returns the current horizontal range.
    #[must_use]
    pub fn horizontal_range(&self) -> AxisRange {
        self.horizontal.range()
    }

    /// Returns the current vertical range.
    #[must_use]
    pub fn vertical_range(&self) -> AxisRange {
        self.vertical.range()
    }

    /// Returns the per-wheel-step zoom base.
    #[must_use]
    pub fn zoom_base(&self) -> f64 {
        self.zoom_base
    }

    /// Sets the per-wheel-step zoom base. Non-positive values are ignored.
    pub fn set_zoom_base(&mut self, base: f64) {
        if base > 0.0 && base.is_finite() {
            self.zoom_base = base;
        }
    }

    /// Converts a device pixel position into plot coordinates.
    #[must_use]
    pub fn pixel_to_coords(&self, pos: Point) -> Point {
        Point::new(
            self.horizontal.pixel_to_coord(pos.x),
            self.vertical.pixel_to_coord(pos.y),
        )
    }

    /// Converts plot coordinates into a device pixel position.
    #[must_use]
    pub fn coords_to_pixel(&self, coords: Point) -> Point {
        Point::new(
            self.horizontal.coord_to_pixel(coords.x),
            self.vertical.coord_to_pixel(coords.y),
        )
    }

    /// Fits both ranges to the given data points.
    ///
    /// A flat extent on either axis is widened by one unit on each side so
    /// the range stays valid. Returns `true` if any range changed.
    pub fn rescale_to_data(&mut self, points: &[Point]) -> bool {
        let Some(h) = AxisRange::enclosing(points.iter().map(|p| p.x)) else {
            return false;
        };
        let Some(v) = AxisRange::enclosing(points.iter().map(|p| p.y)) else {
            return false;
        };
        let h_changed = self.horizontal.set_range(h.sanitized());
        let v_changed = self.vertical.set_range(v.sanitized());
        h_changed || v_changed
    }
}
