// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::pointer::Modifiers;

/// Wheel delta that counts as one zoom step.
pub const DEFAULT_WHEEL_STEP_UNIT: f64 = 120.0;

/// Where wheel zoom is anchored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoomAnchor {
    /// The coordinate under the cursor stays under the cursor.
    #[default]
    Cursor,
    /// Ranges scale about their own center.
    Midpoint,
}

/// Navigation tuning shared by every viewport a controller drives.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Wheel delta per zoom step. Non-positive values disable wheel zoom.
    pub wheel_step_unit: f64,
    /// Zoom anchor.
    pub zoom_anchor: ZoomAnchor,
    /// Modifiers that, when all held, keep wheel zoom off the horizontal axes.
    ///
    /// An empty set disables the lock.
    pub horizontal_lock: Modifiers,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            wheel_step_unit: DEFAULT_WHEEL_STEP_UNIT,
            zoom_anchor: ZoomAnchor::Cursor,
            horizontal_lock: Modifiers::CONTROL,
        }
    }
}

impl NavConfig {
    /// Sets the wheel step unit.
    #[must_use]
    pub fn with_wheel_step_unit(mut self, unit: f64) -> Self {
        self.wheel_step_unit = unit;
        self
    }

    /// Sets the zoom anchor.
    #[must_use]
    pub fn with_zoom_anchor(mut self, anchor: ZoomAnchor) -> Self {
        self.zoom_anchor = anchor;
        self
    }

    /// Sets the horizontal lock modifiers.
    #[must_use]
    pub fn with_horizontal_lock(mut self, lock: Modifiers) -> Self {
        self.horizontal_lock = lock;
        self
    }

    /// Returns `true` if `held` activates the horizontal lock.
    #[must_use]
    pub fn locks_horizontal(&self, held: Modifiers) -> bool {
        !self.horizontal_lock.is_empty() && held.contains(self.horizontal_lock)
    }
}
