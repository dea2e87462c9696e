// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tandem Picture: immutable vector pictures and the canvas they are painted on.
//!
//! This crate defines a small paint intermediate representation and a
//! [`Canvas`] trait for anything that consumes it: a live renderer, the
//! [`Recorder`] that captures a [`Picture`], or the [`svg`] writer.
//!
//! # Core concepts
//!
//! - **Paint operations**: [`StateOp`] (mutate state) and [`DrawOp`]
//!   (produce marks), combined into [`PaintOp`] for recording.
//! - **Canvases**: [`Canvas`] accepts paint operations; [`CanvasExt`] adds
//!   scoped helpers that keep clip pushes and pops balanced.
//! - **Pictures**: [`Picture`] is a recorded, self-contained program plus
//!   its native size. Unlike a display list that references backend
//!   resources by handle, a picture carries its geometry and brushes
//!   inline, so it can be cloned, stored, and replayed anywhere.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use peniko::{Brush, Color};
//! use tandem_picture::{Canvas, CanvasExt, DrawOp, Recorder, StateOp};
//!
//! let mut recorder = Recorder::new(Size::new(100.0, 50.0));
//! recorder.with_clip(Rect::new(0.0, 0.0, 100.0, 50.0), |c| {
//!     c.state(StateOp::SetBrush(Brush::Solid(Color::WHITE)));
//!     c.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 100.0, 50.0)));
//! });
//! let picture = recorder.finish();
//! assert_eq!(picture.size(), Size::new(100.0, 50.0));
//! assert_eq!(picture.ops().len(), 4);
//! ```

#![no_std]

extern crate alloc;

mod recorder;
pub mod svg;

use alloc::sync::Arc;

use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};
use peniko::Brush;

pub use recorder::Recorder;

/// State operations that mutate the current paint state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Set the current transform matrix.
    ///
    /// Transforms are absolute within the program being painted; a nested
    /// [`DrawOp::Picture`] composes its own transforms with the one it is
    /// drawn under.
    SetTransform(Affine),
    /// Restrict subsequent drawing to a rectangle under the current transform.
    ///
    /// Clips nest and must be balanced by [`StateOp::PopClip`].
    PushClip(Rect),
    /// Remove the most recently pushed clip.
    PopClip,
    /// Set the brush used for fills, strokes, and text.
    SetBrush(Brush),
    /// Set the stroke style used by stroking operations.
    SetStroke(Stroke),
}

/// Draw operations that produce marks given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle with the current brush.
    FillRect(Rect),
    /// Stroke an axis-aligned rectangle with the current stroke and brush.
    StrokeRect(Rect),
    /// Fill a path with the current brush.
    FillPath(BezPath),
    /// Stroke a path with the current stroke and brush.
    StrokePath(BezPath),
    /// Draw a run of text with its baseline starting at `origin`.
    Text {
        /// Baseline origin.
        origin: Point,
        /// Text content.
        text: Arc<str>,
        /// Font size in user units.
        size: f64,
    },
    /// Draw a nested picture under an additional transform.
    Picture {
        /// Picture to draw.
        picture: Picture,
        /// Transform from picture space into the current space.
        transform: Affine,
    },
}

/// Unified paint operation used by recordings.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// Anything that accepts paint operations.
///
/// Implementations apply operations in order. Callers keep
/// [`StateOp::PushClip`] / [`StateOp::PopClip`] balanced, which
/// [`CanvasExt::with_clip`] does for them.
pub trait Canvas {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Push a rectangular clip.
    ///
    /// This is equivalent to `self.state(StateOp::PushClip(rect))`.
    #[inline]
    fn clip_push(&mut self, rect: Rect) {
        self.state(StateOp::PushClip(rect));
    }

    /// Pop the most recently pushed clip.
    ///
    /// This is equivalent to `self.state(StateOp::PopClip)`.
    #[inline]
    fn clip_pop(&mut self) {
        self.state(StateOp::PopClip);
    }
}

/// Scoped helpers for [`Canvas`] implementations and callers.
///
/// This is separate from [`Canvas`] so that methods can accept closures
/// without complicating trait object usage (`&mut dyn Canvas`).
pub trait CanvasExt: Canvas {
    /// Run `f` inside a rectangular clip, popping it afterwards.
    ///
    /// Note: if `f` panics, the clip will not be popped.
    #[inline]
    fn with_clip<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        self.clip_push(rect);
        let out = f(self);
        self.clip_pop();
        out
    }

    /// Run `f` with `transform` as the current transform, restoring
    /// `restore` afterwards.
    #[inline]
    fn with_transform<R>(
        &mut self,
        transform: Affine,
        restore: Affine,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.state(StateOp::SetTransform(transform));
        let out = f(self);
        self.state(StateOp::SetTransform(restore));
        out
    }
}

impl<C: Canvas + ?Sized> CanvasExt for C {}

/// An immutable recorded vector image.
///
/// A picture is a shared, read-only sequence of [`PaintOp`]s together with
/// the native size it was captured at. Cloning is cheap and never copies
/// the operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Picture {
    ops: Arc<[PaintOp]>,
    size: Size,
}

impl Picture {
    /// Creates a picture from recorded operations and its native size.
    pub fn new(ops: impl Into<Arc<[PaintOp]>>, size: Size) -> Self {
        Self {
            ops: ops.into(),
            size,
        }
    }

    /// Returns the native bounding size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the native bounding rectangle, anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Returns `true` if the picture has no usable content.
    ///
    /// A picture with a non-positive or non-finite size cannot be measured
    /// or scaled and is treated as empty even if it recorded operations.
    #[must_use]
    pub fn is_null(&self) -> bool {
        let Size { width, height } = self.size;
        !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
    }

    /// Replays the recorded operations onto `canvas` under `transform`.
    ///
    /// Every recorded transform is pre-multiplied by `transform`, and any
    /// clips left open by the recording are closed. The canvas transform
    /// is left at `transform` when this returns.
    pub fn replay(&self, canvas: &mut dyn Canvas, transform: Affine) {
        canvas.state(StateOp::SetTransform(transform));
        let mut depth = 0_usize;
        for op in self.ops.iter() {
            match op {
                PaintOp::State(StateOp::SetTransform(t)) => {
                    canvas.state(StateOp::SetTransform(transform * *t));
                }
                PaintOp::State(StateOp::PushClip(rect)) => {
                    depth += 1;
                    canvas.state(StateOp::PushClip(*rect));
                }
                PaintOp::State(StateOp::PopClip) => {
                    if depth == 0 {
                        continue;
                    }
                    depth -= 1;
                    canvas.state(StateOp::PopClip);
                }
                PaintOp::State(other) => canvas.state(other.clone()),
                PaintOp::Draw(op) => canvas.draw(op.clone()),
            }
        }
        for _ in 0..depth {
            canvas.state(StateOp::PopClip);
        }
        canvas.state(StateOp::SetTransform(transform));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Affine, Rect, Size};
    use peniko::{Brush, Color};

    use super::{Canvas, CanvasExt, DrawOp, PaintOp, Picture, Recorder, StateOp};

    #[test]
    fn null_picture_detection() {
        assert!(Picture::new(Vec::<PaintOp>::new(), Size::ZERO).is_null());
        assert!(Picture::new(Vec::<PaintOp>::new(), Size::new(f64::NAN, 3.0)).is_null());
        assert!(!Picture::new(Vec::<PaintOp>::new(), Size::new(4.0, 3.0)).is_null());
    }

    #[test]
    fn clones_share_ops() {
        let picture = Picture::new(
            vec![PaintOp::Draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)))],
            Size::new(1.0, 1.0),
        );
        let copy = picture.clone();
        assert!(core::ptr::eq(picture.ops(), copy.ops()));
        assert_eq!(picture, copy);
    }

    #[test]
    fn replay_composes_transforms_and_balances_clips() {
        let picture = Picture::new(
            vec![
                PaintOp::State(StateOp::SetTransform(Affine::translate((5.0, 0.0)))),
                PaintOp::State(StateOp::PushClip(Rect::new(0.0, 0.0, 2.0, 2.0))),
                PaintOp::State(StateOp::SetBrush(Brush::Solid(Color::BLACK))),
                PaintOp::Draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0))),
            ],
            Size::new(10.0, 10.0),
        );
        let mut target = Recorder::new(Size::new(20.0, 20.0));
        picture.replay(&mut target, Affine::scale(2.0));
        let ops = target.ops();

        assert_eq!(
            ops[1],
            PaintOp::State(StateOp::SetTransform(
                Affine::scale(2.0) * Affine::translate((5.0, 0.0))
            ))
        );
        let pushes = ops
            .iter()
            .filter(|op| matches!(op, PaintOp::State(StateOp::PushClip(_))))
            .count();
        let pops = ops
            .iter()
            .filter(|op| matches!(op, PaintOp::State(StateOp::PopClip)))
            .count();
        assert_eq!(pushes, pops);
        assert_eq!(
            ops.last(),
            Some(&PaintOp::State(StateOp::SetTransform(Affine::scale(2.0))))
        );
    }

    #[test]
    fn with_clip_pops_after_closure() {
        let mut recorder = Recorder::new(Size::new(10.0, 10.0));
        let value = recorder.with_clip(Rect::new(0.0, 0.0, 5.0, 5.0), |c| {
            c.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));
            7
        });
        assert_eq!(value, 7);
        assert_eq!(recorder.clip_depth(), 0);
        assert_eq!(recorder.ops().len(), 3);
    }
}
