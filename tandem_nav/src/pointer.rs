// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer buttons, keyboard modifiers, and the last known pointer state.

use kurbo::Point;

/// A single pointer button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button. Pans.
    Primary,
    /// Usually the right mouse button. Selects a horizontal range.
    Secondary,
    /// Usually the middle mouse button. Unused by navigation.
    Auxiliary,
}

impl PointerButton {
    /// Returns the button as a single-bit set.
    #[must_use]
    pub fn mask(self) -> PointerButtons {
        match self {
            Self::Primary => PointerButtons::PRIMARY,
            Self::Secondary => PointerButtons::SECONDARY,
            Self::Auxiliary => PointerButtons::AUXILIARY,
        }
    }
}

bitflags::bitflags! {
    /// Set of currently held pointer buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary button held.
        const PRIMARY   = 0b0000_0001;
        /// Secondary button held.
        const SECONDARY = 0b0000_0010;
        /// Auxiliary button held.
        const AUXILIARY = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Keyboard modifier keys.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt / Option key.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Super key.
        const META    = 0b0000_1000;
    }
}

/// Last known pointer position and held buttons.
///
/// Overwritten by every pointer event the controller sees. The position is
/// the pan baseline: a move with the primary button held pans by the
/// distance from `last_pos` to the new position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Last pointer position in device pixels, if any event has been seen.
    pub last_pos: Option<Point>,
    /// Buttons currently held.
    pub buttons: PointerButtons,
}

impl PointerState {
    /// Records a button press at `pos`.
    pub fn press(&mut self, button: PointerButton, pos: Point) {
        self.buttons.insert(button.mask());
        self.last_pos = Some(pos);
    }

    /// Records a button release at `pos`.
    pub fn release(&mut self, button: PointerButton, pos: Point) {
        self.buttons.remove(button.mask());
        self.last_pos = Some(pos);
    }

    /// Records a move to `pos`, returning the previous position.
    pub fn move_to(&mut self, buttons: PointerButtons, pos: Point) -> Option<Point> {
        self.buttons = buttons;
        self.last_pos.replace(pos)
    }

    /// Returns `true` if `button` is held.
    #[must_use]
    pub fn is_held(&self, button: PointerButton) -> bool {
        self.buttons.contains(button.mask())
    }

    /// Forgets the position and all held buttons.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{PointerButton, PointerButtons, PointerState};

    #[test]
    fn press_and_release_track_buttons() {
        let mut state = PointerState::default();
        state.press(PointerButton::Primary, Point::new(1.0, 2.0));
        state.press(PointerButton::Secondary, Point::new(3.0, 4.0));
        assert!(state.is_held(PointerButton::Primary));
        assert!(state.is_held(PointerButton::Secondary));
        assert_eq!(state.last_pos, Some(Point::new(3.0, 4.0)));

        state.release(PointerButton::Primary, Point::new(5.0, 6.0));
        assert_eq!(state.buttons, PointerButtons::SECONDARY);
    }

    #[test]
    fn move_returns_previous_position() {
        let mut state = PointerState::default();
        assert_eq!(state.move_to(PointerButtons::empty(), Point::new(1.0, 1.0)), None);
        assert_eq!(
            state.move_to(PointerButtons::PRIMARY, Point::new(2.0, 2.0)),
            Some(Point::new(1.0, 1.0))
        );
        assert!(state.is_held(PointerButton::Primary));

        state.reset();
        assert_eq!(state, PointerState::default());
    }
}
