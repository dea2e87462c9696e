// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Range given to axes whose requested range is unusable.
pub const DEFAULT_RANGE: AxisRange = AxisRange { min: 0.0, max: 1.0 };

/// A coordinate interval on one plot axis.
///
/// A valid range is finite with `min < max`. [`AxisRange::new`] accepts the
/// bounds in either order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    /// Lower bound in world coordinates.
    pub min: f64,
    /// Upper bound in world coordinates.
    pub max: f64,
}

impl AxisRange {
    /// Creates a range from two bounds given in any order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns the midpoint of the range.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Returns `true` if both bounds are finite and `min < max`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    /// Returns `true` if `value` lies inside the closed range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns this range shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Returns this range scaled by `factor` about `anchor`.
    ///
    /// `anchor` keeps its relative position inside the range, so a factor
    /// below `1.0` zooms in towards it.
    #[must_use]
    pub fn scaled_about(&self, factor: f64, anchor: f64) -> Self {
        Self::new(
            anchor + (self.min - anchor) * factor,
            anchor + (self.max - anchor) * factor,
        )
    }

    /// Returns a valid range close to this one.
    ///
    /// A valid range is returned unchanged. A finite but flat range is
    /// widened by one unit on each side. Anything else becomes
    /// [`DEFAULT_RANGE`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        if self.is_valid() {
            self
        } else if self.min.is_finite() && self.max.is_finite() {
            Self::new(self.min - 1.0, self.max + 1.0)
        } else {
            DEFAULT_RANGE
        }
    }

    /// Returns the smallest range covering every value, or `None` for an
    /// empty or non-finite input.
    #[must_use]
    pub fn enclosing(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut out: Option<Self> = None;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            out = Some(match out {
                None => Self { min: v, max: v },
                Some(r) => Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                },
            });
        }
        out
    }
}

/// Which way pixel positions grow relative to coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AxisDirection {
    /// Coordinates grow with pixel position (a bottom axis).
    #[default]
    Forward,
    /// Coordinates grow against pixel position (a left axis, since device
    /// Y grows downward).
    Reversed,
}

/// Linear mapping between one axis' coordinate range and a pixel span.
///
/// The horizontal and vertical axes of a [`crate::Viewport`] are both
/// `Axis` values; the vertical one uses [`AxisDirection::Reversed`].
#[derive(Clone, Debug)]
pub struct Axis {
    range: AxisRange,
    pixel_span: Range<f64>,
    direction: AxisDirection,
}

impl Axis {
    /// Creates an axis mapping `range` onto `pixel_span`.
    ///
    /// An invalid `range` is replaced by [`AxisRange::sanitized`].
    #[must_use]
    pub fn new(range: AxisRange, pixel_span: Range<f64>, direction: AxisDirection) -> Self {
        Self {
            range: range.sanitized(),
            pixel_span,
            direction,
        }
    }

    /// Returns the current coordinate range.
    #[must_use]
    pub fn range(&self) -> AxisRange {
        self.range
    }

    /// Replaces the coordinate range.
    ///
    /// Invalid ranges (non-finite, or `min >= max`) are rejected. Returns
    /// `true` if the stored range changed.
    pub fn set_range(&mut self, range: AxisRange) -> bool {
        if !range.is_valid() || range == self.range {
            return false;
        }
        self.range = range;
        true
    }

    /// Returns the pixel span the range is drawn into.
    #[must_use]
    pub fn pixel_span(&self) -> Range<f64> {
        self.pixel_span.clone()
    }

    /// Sets the pixel span, typically after a layout change.
    pub fn set_pixel_span(&mut self, span: Range<f64>) {
        self.pixel_span = span;
    }

    /// Returns the mapping direction.
    #[must_use]
    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    fn pixel_len(&self) -> f64 {
        self.pixel_span.end - self.pixel_span.start
    }

    /// Converts a coordinate into a pixel position.
    #[must_use]
    pub fn coord_to_pixel(&self, value: f64) -> f64 {
        let t = (value - self.range.min) / self.range.span();
        match self.direction {
            AxisDirection::Forward => self.pixel_span.start + t * self.pixel_len(),
            AxisDirection::Reversed => self.pixel_span.end - t * self.pixel_len(),
        }
    }

    /// Converts a pixel position into a coordinate.
    ///
    /// A zero-length pixel span maps every pixel to `range.min`.
    #[must_use]
    pub fn pixel_to_coord(&self, pixel: f64) -> f64 {
        let len = self.pixel_len();
        if len == 0.0 {
            return self.range.min;
        }
        let t = match self.direction {
            AxisDirection::Forward => (pixel - self.pixel_span.start) / len,
            AxisDirection::Reversed => (self.pixel_span.end - pixel) / len,
        };
        self.range.min + t * self.range.span()
    }

    /// Returns the coordinate distance covered by one pixel.
    #[must_use]
    pub fn units_per_pixel(&self) -> f64 {
        let len = self.pixel_len();
        if len == 0.0 {
            return 0.0;
        }
        self.range.span() / len
    }

    /// Shifts the range by `diff` coordinate units.
    ///
    /// Returns `true` if the range changed.
    pub fn move_range(&mut self, diff: f64) -> bool {
        if diff == 0.0 || !diff.is_finite() {
            return false;
        }
        self.set_range(self.range.translated(diff))
    }

    /// Scales the range by `factor` about the coordinate `anchor`.
    ///
    /// Non-positive or non-finite factors are ignored. Returns `true` if the
    /// range changed.
    pub fn scale_range(&mut self, factor: f64, anchor: f64) -> bool {
        if factor <= 0.0 || !factor.is_finite() || factor == 1.0 {
            return false;
        }
        self.set_range(self.range.scaled_about(factor, anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisDirection, AxisRange, DEFAULT_RANGE};

    fn forward() -> Axis {
        Axis::new(AxisRange::new(-1.0, 1.0), 0.0..200.0, AxisDirection::Forward)
    }

    #[test]
    fn new_normalizes_order() {
        let r = AxisRange::new(3.0, -2.0);
        assert_eq!(r, AxisRange { min: -2.0, max: 3.0 });
        assert!((r.span() - 5.0).abs() < 1e-12);
        assert!((r.center() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn forward_roundtrip() {
        let axis = forward();
        assert!((axis.coord_to_pixel(-1.0) - 0.0).abs() < 1e-9);
        assert!((axis.coord_to_pixel(1.0) - 200.0).abs() < 1e-9);
        let px = axis.coord_to_pixel(0.37);
        assert!((axis.pixel_to_coord(px) - 0.37).abs() < 1e-9);
    }

    #[test]
    fn reversed_axis_grows_upward() {
        let axis = Axis::new(AxisRange::new(0.0, 10.0), 50.0..150.0, AxisDirection::Reversed);
        assert!((axis.pixel_to_coord(150.0) - 0.0).abs() < 1e-9);
        assert!((axis.pixel_to_coord(50.0) - 10.0).abs() < 1e-9);
        assert!((axis.coord_to_pixel(2.5) - 125.0).abs() < 1e-9);
    }

    #[test]
    fn set_range_rejects_degenerate() {
        let mut axis = forward();
        assert!(!axis.set_range(AxisRange { min: 1.0, max: 1.0 }));
        assert!(!axis.set_range(AxisRange {
            min: f64::NAN,
            max: 1.0
        }));
        assert_eq!(axis.range(), AxisRange::new(-1.0, 1.0));
    }

    #[test]
    fn scale_about_anchor_keeps_anchor_pixel() {
        let mut axis = forward();
        let pixel = 150.0;
        let anchor = axis.pixel_to_coord(pixel);
        assert!(axis.scale_range(0.5, anchor));
        assert!((axis.coord_to_pixel(anchor) - pixel).abs() < 1e-9);
        assert!((axis.range().span() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn identity_scale_and_zero_move_are_noops() {
        let mut axis = forward();
        assert!(!axis.scale_range(1.0, 0.0));
        assert!(!axis.scale_range(-2.0, 0.0));
        assert!(!axis.move_range(0.0));
    }

    #[test]
    fn sanitized_repairs_invalid_ranges() {
        let ok = AxisRange::new(-1.0, 2.0);
        assert_eq!(ok.sanitized(), ok);
        assert_eq!(
            AxisRange { min: 4.0, max: 4.0 }.sanitized(),
            AxisRange::new(3.0, 5.0)
        );
        assert_eq!(
            AxisRange {
                min: f64::NEG_INFINITY,
                max: 0.0
            }
            .sanitized(),
            DEFAULT_RANGE
        );

        let axis = Axis::new(AxisRange { min: 1.0, max: 1.0 }, 0.0..100.0, AxisDirection::Forward);
        assert!(axis.range().is_valid());
        assert!((axis.coord_to_pixel(1.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn enclosing_skips_non_finite() {
        let r = AxisRange::enclosing([2.0, f64::NAN, -4.0, 1.0]).unwrap();
        assert_eq!(r, AxisRange { min: -4.0, max: 2.0 });
        assert!(AxisRange::enclosing(core::iter::empty()).is_none());
    }
}
