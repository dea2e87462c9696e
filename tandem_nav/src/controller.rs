// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use tandem_view::{Axis, ViewportId, ViewportSet};

use crate::config::{NavConfig, ZoomAnchor};
use crate::event::{InputEvent, Outcome, RedrawSink};
use crate::marker::GuideMarker;
use crate::pointer::{Modifiers, PointerButton, PointerButtons, PointerState};
use crate::selector::RangeSelector;

/// Turns pointer and wheel input into range changes on a [`ViewportSet`].
///
/// - Primary drag pans. Every viewport pans horizontally through its own
///   mapping; only the viewport under the pointer pans vertically.
/// - Wheel zooms. Every viewport zooms horizontally (unless the configured
///   lock modifiers are held); only the viewport under the pointer zooms
///   vertically.
/// - Secondary drag selects a horizontal range (see [`RangeSelector`]).
///
/// The controller owns all transient state; the viewport set is passed in
/// on every call.
#[derive(Clone, Debug, Default)]
pub struct NavigationController {
    config: NavConfig,
    pointer: PointerState,
    modifiers: Modifiers,
    selector: RangeSelector,
}

impl NavigationController {
    /// Creates a controller with the given configuration.
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
    }

    /// Returns the last known pointer state.
    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Returns the held keyboard modifiers.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Updates the held keyboard modifiers.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Returns the range selector.
    #[must_use]
    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    /// Iterates the live selection guide markers.
    pub fn guides(&self) -> impl Iterator<Item = &GuideMarker> {
        self.selector.guides()
    }

    /// Dispatches one event and requests a redraw if it changed anything.
    pub fn handle(
        &mut self,
        set: &mut ViewportSet,
        event: InputEvent,
        sink: &mut dyn RedrawSink,
    ) -> Outcome {
        let outcome = match event {
            InputEvent::PointerDown { button, pos } => self.on_pointer_down(set, button, pos),
            InputEvent::PointerMove { buttons, pos } => self.on_pointer_move(set, buttons, pos),
            InputEvent::PointerUp { button, pos } => self.on_pointer_up(set, button, pos),
            InputEvent::PointerLeave => self.abort(),
            InputEvent::Scroll { delta, pos } => self.on_scroll(set, delta, pos),
            InputEvent::Modifiers(modifiers) => {
                self.set_modifiers(modifiers);
                Outcome::Ignored
            }
        };
        if outcome.is_changed() {
            sink.request_redraw();
        }
        outcome
    }

    /// Handles a button press.
    ///
    /// Primary records the pan baseline. Secondary starts a selection when
    /// none is in progress.
    pub fn on_pointer_down(
        &mut self,
        set: &mut ViewportSet,
        button: PointerButton,
        pos: Point,
    ) -> Outcome {
        log::trace!("pointer down {button:?} at {pos:?}");
        self.pointer.press(button, pos);
        match button {
            PointerButton::Secondary => self.selector.begin(set, pos),
            PointerButton::Primary | PointerButton::Auxiliary => Outcome::Ignored,
        }
    }

    /// Handles a pointer move with `buttons` held.
    pub fn on_pointer_move(
        &mut self,
        set: &mut ViewportSet,
        buttons: PointerButtons,
        pos: Point,
    ) -> Outcome {
        let last = self.pointer.move_to(buttons, pos);
        let mut outcome = Outcome::Ignored;
        if buttons.contains(PointerButtons::PRIMARY)
            && let Some(last) = last
        {
            outcome |= pan(set, last, pos);
        }
        if buttons.contains(PointerButtons::SECONDARY) {
            outcome |= self.selector.update(pos);
        }
        outcome
    }

    /// Handles a button release.
    ///
    /// Releasing secondary finishes the selection in progress.
    pub fn on_pointer_up(
        &mut self,
        set: &mut ViewportSet,
        button: PointerButton,
        pos: Point,
    ) -> Outcome {
        log::trace!("pointer up {button:?} at {pos:?}");
        self.pointer.release(button, pos);
        match button {
            PointerButton::Secondary => self.selector.end(set, pos),
            PointerButton::Primary | PointerButton::Auxiliary => Outcome::Ignored,
        }
    }

    /// Handles a wheel turn of `delta` at `pos`.
    ///
    /// `delta / wheel_step_unit` steps are applied; each viewport scales by
    /// its own `zoom_base` raised to that power.
    pub fn on_scroll(&mut self, set: &mut ViewportSet, delta: f64, pos: Point) -> Outcome {
        let unit = self.config.wheel_step_unit;
        if delta == 0.0 || !delta.is_finite() || unit <= 0.0 {
            return Outcome::Ignored;
        }
        let steps = delta / unit;
        let lock_horizontal = self.config.locks_horizontal(self.modifiers);
        let target = set.hit_test(pos);
        log::trace!("scroll {steps} steps at {pos:?}, target {target:?}");

        let anchor = self.config.zoom_anchor;
        let mut changed = false;
        for vp in set.iter_mut() {
            let factor = vp.zoom_base().powf(steps);
            if !lock_horizontal {
                let h = vp.horizontal_mut();
                let at = zoom_anchor(h, anchor, pos.x);
                changed |= h.scale_range(factor, at);
            }
            if Some(vp.id()) == target {
                let v = vp.vertical_mut();
                let at = zoom_anchor(v, anchor, pos.y);
                changed |= v.scale_range(factor, at);
            }
        }
        Outcome::from_changed(changed)
    }

    /// Drops any selection in progress and forgets held buttons.
    ///
    /// Use when the pointer leaves the surface or capture is lost.
    pub fn abort(&mut self) -> Outcome {
        self.pointer.reset();
        self.selector.cancel()
    }

    /// Cancels a selection targeting a viewport that is being removed.
    pub fn viewport_removed(&mut self, id: ViewportId) -> Outcome {
        self.selector.viewport_removed(id)
    }
}

fn zoom_anchor(axis: &Axis, anchor: ZoomAnchor, pixel: f64) -> f64 {
    match anchor {
        ZoomAnchor::Cursor => axis.pixel_to_coord(pixel),
        ZoomAnchor::Midpoint => axis.range().center(),
    }
}

/// Pans every viewport horizontally by the coordinate distance between
/// `from` and `to`, and the viewport under `to` vertically as well.
fn pan(set: &mut ViewportSet, from: Point, to: Point) -> Outcome {
    let target = set.hit_test(to);
    let mut changed = false;
    for vp in set.iter_mut() {
        let h = vp.horizontal_mut();
        let dx = h.pixel_to_coord(from.x) - h.pixel_to_coord(to.x);
        changed |= h.move_range(dx);
        if Some(vp.id()) == target {
            let v = vp.vertical_mut();
            let dy = v.pixel_to_coord(from.y) - v.pixel_to_coord(to.y);
            changed |= v.move_range(dy);
        }
    }
    Outcome::from_changed(changed)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use tandem_view::{AxisRange, ViewportId, ViewportSet};

    use super::NavigationController;
    use crate::config::{NavConfig, ZoomAnchor};
    use crate::event::{InputEvent, Outcome};
    use crate::pointer::{Modifiers, PointerButton, PointerButtons};

    fn stacked() -> (ViewportSet, ViewportId, ViewportId) {
        let mut set = ViewportSet::new();
        let top = set.add(
            Rect::new(0.0, 0.0, 400.0, 100.0),
            AxisRange::new(-1.0, 1.0),
            AxisRange::new(0.0, 1.0),
        );
        let bottom = set.add(
            Rect::new(0.0, 100.0, 400.0, 200.0),
            AxisRange::new(-1.0, 1.0),
            AxisRange::new(0.0, 1.0),
        );
        (set, top, bottom)
    }

    fn close(a: AxisRange, b: AxisRange) -> bool {
        (a.min - b.min).abs() < 1e-9 && (a.max - b.max).abs() < 1e-9
    }

    #[test]
    fn primary_drag_pans_linked_horizontal_and_target_vertical() {
        let (mut set, top, bottom) = stacked();
        let mut nav = NavigationController::default();
        let _ = nav.on_pointer_down(&mut set, PointerButton::Primary, Point::new(200.0, 50.0));
        let out = nav.on_pointer_move(&mut set, PointerButtons::PRIMARY, Point::new(100.0, 40.0));
        assert!(out.is_changed());

        // 100 px left over a 2-unit / 400 px axis moves the range right by 0.5.
        for vp in set.iter() {
            assert!(close(vp.horizontal_range(), AxisRange::new(-0.5, 1.5)));
        }
        // 10 px up over a 1-unit / 100 px reversed axis moves the range down by 0.1.
        assert!(close(
            set.get(top).unwrap().vertical_range(),
            AxisRange::new(-0.1, 0.9)
        ));
        assert_eq!(
            set.get(bottom).unwrap().vertical_range(),
            AxisRange::new(0.0, 1.0)
        );
    }

    #[test]
    fn move_without_buttons_changes_nothing() {
        let (mut set, _, _) = stacked();
        let mut nav = NavigationController::default();
        let _ = nav.on_pointer_move(&mut set, PointerButtons::empty(), Point::new(10.0, 10.0));
        let out = nav.on_pointer_move(&mut set, PointerButtons::empty(), Point::new(90.0, 10.0));
        assert_eq!(out, Outcome::Ignored);
    }

    #[test]
    fn wheel_zoom_keeps_cursor_coordinate() {
        let (mut set, top, _) = stacked();
        let mut nav = NavigationController::default();
        let pos = Point::new(300.0, 25.0);
        let before = set.get(top).unwrap().pixel_to_coords(pos);

        assert!(nav.on_scroll(&mut set, 240.0, pos).is_changed());
        let after = set.get(top).unwrap().pixel_to_coords(pos);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);

        let span = set.get(top).unwrap().horizontal_range().span();
        assert!((span - 2.0 * 0.85_f64.powi(2)).abs() < 1e-9);
    }

    #[test]
    fn midpoint_anchor_scales_about_center() {
        let (mut set, top, _) = stacked();
        let mut nav =
            NavigationController::new(NavConfig::default().with_zoom_anchor(ZoomAnchor::Midpoint));
        let _ = nav.on_scroll(&mut set, 120.0, Point::new(380.0, 10.0));
        assert!(close(
            set.get(top).unwrap().horizontal_range(),
            AxisRange::new(-0.85, 0.85)
        ));
    }

    #[test]
    fn horizontal_lock_keeps_horizontal_ranges() {
        let (mut set, top, bottom) = stacked();
        let mut nav = NavigationController::default();
        nav.set_modifiers(Modifiers::CONTROL);
        assert!(nav.on_scroll(&mut set, 120.0, Point::new(100.0, 50.0)).is_changed());

        for vp in set.iter() {
            assert_eq!(vp.horizontal_range(), AxisRange::new(-1.0, 1.0));
        }
        assert_ne!(
            set.get(top).unwrap().vertical_range(),
            AxisRange::new(0.0, 1.0)
        );
        assert_eq!(
            set.get(bottom).unwrap().vertical_range(),
            AxisRange::new(0.0, 1.0)
        );
    }

    #[test]
    fn scroll_outside_viewports_still_zooms_horizontally() {
        let (mut set, _, _) = stacked();
        let mut nav = NavigationController::default();
        assert!(nav.on_scroll(&mut set, 120.0, Point::new(200.0, 500.0)).is_changed());
        for vp in set.iter() {
            assert!((vp.horizontal_range().span() - 1.7).abs() < 1e-9);
            assert_eq!(vp.vertical_range(), AxisRange::new(0.0, 1.0));
        }
    }

    #[test]
    fn zero_delta_is_ignored() {
        let (mut set, _, _) = stacked();
        let mut nav = NavigationController::default();
        assert_eq!(nav.on_scroll(&mut set, 0.0, Point::new(10.0, 10.0)), Outcome::Ignored);
    }

    #[test]
    fn handle_requests_one_redraw_per_change() {
        let (mut set, _, _) = stacked();
        let mut nav = NavigationController::default();
        let mut redraws = 0;
        let mut sink = || redraws += 1;

        let events = [
            InputEvent::Modifiers(Modifiers::SHIFT),
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos: Point::new(100.0, 50.0),
            },
            InputEvent::PointerMove {
                buttons: PointerButtons::PRIMARY,
                pos: Point::new(150.0, 50.0),
            },
            InputEvent::PointerMove {
                buttons: PointerButtons::PRIMARY,
                pos: Point::new(150.0, 50.0),
            },
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                pos: Point::new(150.0, 50.0),
            },
            InputEvent::Scroll {
                delta: -120.0,
                pos: Point::new(150.0, 50.0),
            },
        ];
        let changed = events
            .into_iter()
            .filter(|event| nav.handle(&mut set, *event, &mut sink).is_changed())
            .count();

        assert_eq!(changed, 2);
        assert_eq!(redraws, 2);
        assert_eq!(nav.modifiers(), Modifiers::SHIFT);
    }

    #[test]
    fn pointer_leave_aborts_selection() {
        let (mut set, _, _) = stacked();
        let mut nav = NavigationController::default();
        let mut sink = || {};
        let _ = nav.handle(
            &mut set,
            InputEvent::PointerDown {
                button: PointerButton::Secondary,
                pos: Point::new(100.0, 50.0),
            },
            &mut sink,
        );
        assert_eq!(nav.guides().count(), 2);

        assert!(nav.handle(&mut set, InputEvent::PointerLeave, &mut sink).is_changed());
        assert_eq!(nav.guides().count(), 0);
        assert!(nav.pointer().last_pos.is_none());
    }
}
