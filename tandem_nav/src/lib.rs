// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tandem Nav: pointer and wheel navigation for linked viewports.
//!
//! This crate turns raw input into range changes on a
//! [`tandem_view::ViewportSet`]:
//!
//! - [`NavigationController`]: primary-drag pan and wheel zoom, linked
//!   horizontally across every viewport, with vertical changes limited to
//!   the viewport under the pointer.
//! - [`RangeSelector`]: a secondary-drag gesture that selects a horizontal
//!   range using two [`GuideMarker`]s and applies it to every viewport.
//! - [`NavConfig`]: wheel step, zoom anchor, and horizontal lock modifiers.
//!
//! Handlers return an [`Outcome`]. [`NavigationController::handle`] forwards
//! each `Changed` outcome to a [`RedrawSink`] exactly once; nothing is
//! requested for events that change nothing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tandem_nav::{InputEvent, NavigationController};
//! use tandem_view::{AxisRange, ViewportSet};
//!
//! let mut set = ViewportSet::new();
//! let top = set.add(
//!     Rect::new(0.0, 0.0, 400.0, 100.0),
//!     AxisRange::new(-1.0, 1.0),
//!     AxisRange::new(0.0, 1.0),
//! );
//! set.add(
//!     Rect::new(0.0, 100.0, 400.0, 200.0),
//!     AxisRange::new(-1.0, 1.0),
//!     AxisRange::new(0.0, 1.0),
//! );
//!
//! let mut nav = NavigationController::default();
//! let mut redraws = 0;
//! let event = InputEvent::Scroll { delta: 120.0, pos: Point::new(200.0, 50.0) };
//! let _ = nav.handle(&mut set, event, &mut || redraws += 1);
//! assert_eq!(redraws, 1);
//!
//! // Both viewports zoomed horizontally; only the top one vertically.
//! assert!(set.iter().all(|vp| (vp.horizontal_range().span() - 1.7).abs() < 1e-9));
//! assert!((set.get(top).unwrap().vertical_range().span() - 0.85).abs() < 1e-9);
//! ```

mod config;
mod controller;
mod event;
mod marker;
mod pointer;
pub mod selector;

pub use config::{DEFAULT_WHEEL_STEP_UNIT, NavConfig, ZoomAnchor};
pub use controller::NavigationController;
pub use event::{InputEvent, Outcome, RedrawSink};
pub use marker::GuideMarker;
pub use pointer::{Modifiers, PointerButton, PointerButtons, PointerState};
pub use selector::{RangeSelector, SelectionGesture};
