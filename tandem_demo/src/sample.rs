// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample data for the demo plots.

use kurbo::Point;

/// Number of samples in [`quadratic`] by default.
pub(crate) const SAMPLE_COUNT: u32 = 1000;

/// Samples `y = x²` at `count` evenly spaced `x` in `[-1, 1)`.
pub(crate) fn quadratic(count: u32) -> Vec<Point> {
    let half = f64::from(count) / 2.0;
    (0..count)
        .map(|i| {
            let x = f64::from(i) / half - 1.0;
            Point::new(x, x * x)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SAMPLE_COUNT, quadratic};

    #[test]
    fn covers_half_open_unit_interval() {
        let points = quadratic(SAMPLE_COUNT);
        assert_eq!(points.len(), 1000);
        assert_eq!(points[0].x, -1.0);
        assert_eq!(points[0].y, 1.0);
        assert_eq!(points[500].x, 0.0);
        assert!(points.last().unwrap().x < 1.0);
    }

    #[test]
    fn empty_when_count_is_zero() {
        assert!(quadratic(0).is_empty());
    }
}
