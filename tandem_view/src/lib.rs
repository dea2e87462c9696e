// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tandem View: linked plot viewports.
//!
//! This crate provides a small, headless model of plotting regions whose
//! ranges are navigated together. It focuses on:
//! - Per-axis coordinate ranges ([`AxisRange`]) and their linear mapping to
//!   device pixels ([`Axis`]).
//! - Viewports ([`Viewport`]) with a horizontal and a vertical axis, draw
//!   bounds, and a per-viewport wheel zoom base.
//! - An ordered set of viewports ([`ViewportSet`]) with hit testing and a
//!   linked horizontal range setter.
//!
//! It does **not** interpret input events or render anything. Callers are
//! expected to:
//! - Feed pointer and wheel events through a controller (see
//!   `tandem_nav`), or mutate ranges directly.
//! - Draw the viewports using the mapping helpers on [`Viewport`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tandem_view::{AxisRange, ViewportSet};
//!
//! let mut set = ViewportSet::new();
//! let top = set.add(
//!     Rect::new(0.0, 0.0, 800.0, 300.0),
//!     AxisRange::new(-1.0, 1.0),
//!     AxisRange::new(0.0, 1.0),
//! );
//!
//! // Resolve the viewport under the pointer, then read the plot coordinate.
//! let pos = Point::new(400.0, 150.0);
//! let hit = set.hit_test(pos).unwrap();
//! assert_eq!(hit, top);
//! let coords = set.get(hit).unwrap().pixel_to_coords(pos);
//! assert!(coords.x.abs() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod axis;
mod set;
mod viewport;

pub use axis::{Axis, AxisDirection, AxisRange, DEFAULT_RANGE};
pub use set::{SetHandle, ViewportSet};
pub use viewport::{DEFAULT_ZOOM_BASE, Viewport, ViewportId};
