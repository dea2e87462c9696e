// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events, handler outcomes, and the redraw trigger.

use core::ops::{BitOr, BitOrAssign};

use kurbo::Point;

use crate::pointer::{Modifiers, PointerButton, PointerButtons};

/// Raw input delivered by the host's dispatch loop.
///
/// Positions are device pixels in the same space as the viewport bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A button went down.
    PointerDown {
        /// Button pressed.
        button: PointerButton,
        /// Pointer position.
        pos: Point,
    },
    /// The pointer moved.
    PointerMove {
        /// Buttons held during the move.
        buttons: PointerButtons,
        /// Pointer position.
        pos: Point,
    },
    /// A button went up.
    PointerUp {
        /// Button released.
        button: PointerButton,
        /// Pointer position.
        pos: Point,
    },
    /// The pointer left the surface, or the host lost pointer capture.
    PointerLeave,
    /// A wheel turned.
    Scroll {
        /// Wheel delta; one notch is usually `120.0`, positive away from the user.
        delta: f64,
        /// Pointer position.
        pos: Point,
    },
    /// The keyboard modifier state changed.
    Modifiers(Modifiers),
}

/// Result of handling one event.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A range or a guide marker changed; the scene needs a redraw.
    Changed,
    /// Nothing visible changed.
    #[default]
    Ignored,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Changed`].
    #[must_use]
    pub fn is_changed(self) -> bool {
        self == Self::Changed
    }

    /// `Changed` if `changed` is true, `Ignored` otherwise.
    pub fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Ignored }
    }
}

impl BitOr for Outcome {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_changed(self.is_changed() || rhs.is_changed())
    }
}

impl BitOrAssign for Outcome {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Receives redraw requests.
///
/// The navigation layer never renders; it asks the host to repaint after
/// each handled event that changed something. Any `FnMut()` closure is a
/// sink.
pub trait RedrawSink {
    /// Schedule one repaint of the viewports.
    fn request_redraw(&mut self);
}

impl<F: FnMut()> RedrawSink for F {
    fn request_redraw(&mut self) {
        self();
    }
}
