// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end navigation tests for the `tandem_nav` crate.
//!
//! These drive a [`NavigationController`] with event sequences over two
//! stacked viewports and check how pan, zoom, and selection interact with
//! the linked horizontal ranges.

use kurbo::{Point, Rect};
use tandem_nav::{
    InputEvent, NavigationController, Outcome, PointerButton, PointerButtons, RangeSelector,
};
use tandem_view::{AxisRange, ViewportId, ViewportSet};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two linked viewports, each 400 px wide showing `[-1, 1]`.
fn linked_pair() -> (ViewportSet, ViewportId, ViewportId) {
    let mut set = ViewportSet::new();
    let v1 = set.add(
        Rect::new(0.0, 0.0, 400.0, 200.0),
        AxisRange::new(-1.0, 1.0),
        AxisRange::new(0.0, 1.0),
    );
    let v2 = set.add(
        Rect::new(0.0, 200.0, 400.0, 400.0),
        AxisRange::new(-1.0, 1.0),
        AxisRange::new(-5.0, 5.0),
    );
    (set, v1, v2)
}

fn assert_range_close(actual: AxisRange, expected: AxisRange) {
    assert!(
        (actual.min - expected.min).abs() < 1e-9 && (actual.max - expected.max).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

fn drag(
    nav: &mut NavigationController,
    set: &mut ViewportSet,
    button: PointerButton,
    path: &[Point],
) {
    let mut sink = || {};
    let (first, rest) = path.split_first().expect("drag path must not be empty");
    let _ = nav.handle(set, InputEvent::PointerDown { button, pos: *first }, &mut sink);
    for pos in rest {
        let _ = nav.handle(
            set,
            InputEvent::PointerMove {
                buttons: button.mask(),
                pos: *pos,
            },
            &mut sink,
        );
    }
    let last = *path.last().expect("drag path must not be empty");
    let _ = nav.handle(set, InputEvent::PointerUp { button, pos: last }, &mut sink);
}

#[test]
fn pan_through_intermediate_points_equals_direct_pan() {
    init_logging();
    let a = Point::new(50.0, 60.0);
    let b = Point::new(310.0, 20.0);

    let (mut stepped, v1, _) = linked_pair();
    let mut nav = NavigationController::default();
    drag(
        &mut nav,
        &mut stepped,
        PointerButton::Primary,
        &[
            a,
            Point::new(120.0, 90.0),
            Point::new(20.0, 10.0),
            Point::new(390.0, 70.0),
            b,
        ],
    );

    let (mut direct, _, _) = linked_pair();
    let mut nav = NavigationController::default();
    drag(&mut nav, &mut direct, PointerButton::Primary, &[a, b]);

    for (s, d) in stepped.iter().zip(direct.iter()) {
        assert_range_close(s.horizontal_range(), d.horizontal_range());
    }
    assert_range_close(
        stepped.get(v1).unwrap().vertical_range(),
        direct.get(v1).unwrap().vertical_range(),
    );
    assert_range_close(
        direct.get(v1).unwrap().horizontal_range(),
        AxisRange::new(-2.3, -0.3),
    );
}

#[test]
fn consecutive_zooms_compose_and_keep_cursor_coordinate() {
    init_logging();
    let pos = Point::new(137.0, 61.0);
    let (mut twice, v1, _) = linked_pair();
    let before = twice.get(v1).unwrap().pixel_to_coords(pos);

    let mut nav = NavigationController::default();
    let _ = nav.on_scroll(&mut twice, 120.0, pos);
    let _ = nav.on_scroll(&mut twice, -60.0, pos);
    let after = twice.get(v1).unwrap().pixel_to_coords(pos);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);

    // 0.85^1 * 0.85^-0.5 = 0.85^0.5
    let (mut once, _, _) = linked_pair();
    let _ = nav.on_scroll(&mut once, 60.0, pos);
    for (t, o) in twice.iter().zip(once.iter()) {
        assert_range_close(t.horizontal_range(), o.horizontal_range());
        assert_range_close(t.vertical_range(), o.vertical_range());
    }
}

#[test]
fn wheel_over_first_viewport_zooms_both_horizontally() {
    init_logging();
    let (mut set, v1, v2) = linked_pair();
    let mut nav = NavigationController::default();
    let pos = Point::new(300.0, 100.0);
    let anchor = set.get(v1).unwrap().pixel_to_coords(pos).x;
    assert!((anchor - 0.5).abs() < 1e-12);

    let mut redraws = 0;
    let out = nav.handle(
        &mut set,
        InputEvent::Scroll { delta: 120.0, pos },
        &mut || redraws += 1,
    );
    assert_eq!(out, Outcome::Changed);
    assert_eq!(redraws, 1);

    let expected = AxisRange::new(0.5 + (-1.0 - 0.5) * 0.85, 0.5 + (1.0 - 0.5) * 0.85);
    assert_range_close(set.get(v1).unwrap().horizontal_range(), expected);
    assert_range_close(set.get(v2).unwrap().horizontal_range(), expected);
    assert_ne!(set.get(v1).unwrap().vertical_range(), AxisRange::new(0.0, 1.0));
    assert_eq!(set.get(v2).unwrap().vertical_range(), AxisRange::new(-5.0, 5.0));
}

#[test]
fn secondary_drag_selects_range_on_every_viewport() {
    init_logging();
    let (mut set, v1, _) = linked_pair();
    assert!((set.get(v1).unwrap().horizontal().pixel_to_coord(100.0) + 0.5).abs() < 1e-12);
    assert!((set.get(v1).unwrap().horizontal().pixel_to_coord(300.0) - 0.5).abs() < 1e-12);

    let mut nav = NavigationController::default();
    drag(
        &mut nav,
        &mut set,
        PointerButton::Secondary,
        &[Point::new(100.0, 50.0), Point::new(200.0, 50.0), Point::new(300.0, 50.0)],
    );

    for vp in set.iter() {
        assert_range_close(vp.horizontal_range(), AxisRange::new(-0.5, 0.5));
    }
    assert_eq!(nav.guides().count(), 0);
}

#[test]
fn reversed_and_forward_drags_select_the_same_range() {
    init_logging();
    let (mut forward, _, _) = linked_pair();
    let (mut reversed, _, _) = linked_pair();
    let mut nav = NavigationController::default();

    drag(
        &mut nav,
        &mut forward,
        PointerButton::Secondary,
        &[Point::new(40.0, 50.0), Point::new(330.0, 80.0)],
    );
    drag(
        &mut nav,
        &mut reversed,
        PointerButton::Secondary,
        &[Point::new(330.0, 80.0), Point::new(40.0, 50.0)],
    );

    for (f, r) in forward.iter().zip(reversed.iter()) {
        assert_eq!(f.horizontal_range(), r.horizontal_range());
    }
}

#[test]
fn zero_width_selection_never_changes_ranges() {
    init_logging();
    let (mut set, _, _) = linked_pair();
    let mut nav = NavigationController::default();
    drag(
        &mut nav,
        &mut set,
        PointerButton::Secondary,
        &[
            Point::new(150.0, 50.0),
            Point::new(250.0, 80.0),
            Point::new(150.0, 120.0),
        ],
    );

    for vp in set.iter() {
        assert_eq!(vp.horizontal_range(), AxisRange::new(-1.0, 1.0));
    }
    assert_eq!(nav.guides().count(), 0);
}

#[test]
fn markers_are_released_on_every_exit_path() {
    init_logging();
    let (mut set, v1, _) = linked_pair();
    let mut sink = || {};
    let press = InputEvent::PointerDown {
        button: PointerButton::Secondary,
        pos: Point::new(100.0, 50.0),
    };
    let drag_to = InputEvent::PointerMove {
        buttons: PointerButtons::SECONDARY,
        pos: Point::new(200.0, 50.0),
    };

    // Pointer leaves mid-gesture.
    let mut nav = NavigationController::default();
    let _ = nav.handle(&mut set, press, &mut sink);
    let _ = nav.handle(&mut set, drag_to, &mut sink);
    assert_eq!(nav.guides().count(), 2);
    let _ = nav.handle(&mut set, InputEvent::PointerLeave, &mut sink);
    assert_eq!(nav.guides().count(), 0);

    // Target viewport removed mid-gesture.
    let _ = nav.handle(&mut set, press, &mut sink);
    assert!(set.remove(v1).is_some());
    let _ = nav.viewport_removed(v1);
    assert_eq!(nav.guides().count(), 0);

    // A selector going out of scope mid-gesture takes its markers with it.
    let (set, _, _) = linked_pair();
    {
        let mut selector = RangeSelector::new();
        let _ = selector.begin(&set, Point::new(10.0, 10.0));
        assert_eq!(selector.guides().count(), 2);
    }
    assert!(set.iter().all(|vp| vp.horizontal_range() == AxisRange::new(-1.0, 1.0)));
}

#[test]
fn pointer_outside_viewports_only_applies_linked_operations() {
    init_logging();
    let (mut set, v1, v2) = linked_pair();
    let mut nav = NavigationController::default();
    let mut sink = || {};

    // Selection cannot start without a target.
    let out = nav.handle(
        &mut set,
        InputEvent::PointerDown {
            button: PointerButton::Secondary,
            pos: Point::new(500.0, 50.0),
        },
        &mut sink,
    );
    assert_eq!(out, Outcome::Ignored);
    assert_eq!(nav.guides().count(), 0);

    // Pan ending outside still moves every horizontal range.
    drag(
        &mut nav,
        &mut set,
        PointerButton::Primary,
        &[Point::new(200.0, 50.0), Point::new(600.0, 50.0)],
    );
    assert_range_close(set.get(v1).unwrap().horizontal_range(), AxisRange::new(-3.0, -1.0));
    assert_range_close(set.get(v2).unwrap().horizontal_range(), AxisRange::new(-3.0, -1.0));
    assert_eq!(set.get(v1).unwrap().vertical_range(), AxisRange::new(0.0, 1.0));
}

#[test]
fn selection_does_not_outlive_its_set() {
    init_logging();
    let mut nav = NavigationController::default();
    let (mut first, _, _) = linked_pair();
    let mut sink = || {};
    let _ = nav.handle(
        &mut first,
        InputEvent::PointerDown {
            button: PointerButton::Secondary,
            pos: Point::new(300.0, 100.0),
        },
        &mut sink,
    );
    assert_eq!(nav.guides().count(), 2);
    drop(first);
    assert_eq!(nav.guides().count(), 0);

    let (mut second, _, _) = linked_pair();
    let _ = nav.handle(
        &mut second,
        InputEvent::PointerUp {
            button: PointerButton::Secondary,
            pos: Point::new(100.0, 100.0),
        },
        &mut sink,
    );
    for vp in second.iter() {
        assert_eq!(vp.horizontal_range(), AxisRange::new(-1.0, 1.0));
    }
    assert_eq!(nav.guides().count(), 0);

    drag(
        &mut nav,
        &mut second,
        PointerButton::Secondary,
        &[Point::new(300.0, 100.0), Point::new(100.0, 100.0)],
    );
    for vp in second.iter() {
        assert_range_close(vp.horizontal_range(), AxisRange::new(-0.5, 0.5));
    }
}
