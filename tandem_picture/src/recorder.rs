// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Size;

use crate::{Canvas, DrawOp, PaintOp, Picture, StateOp};

/// A canvas that captures paint operations into a [`Picture`].
///
/// This is the render-to-buffer target used for snapshots: paint the
/// current visual state into a `Recorder` of the wanted pixel size, then
/// call [`Recorder::finish`].
///
/// The recorder tracks clip depth so that the finished picture is always
/// balanced; stray pops are dropped and open clips are closed.
#[derive(Debug)]
pub struct Recorder {
    size: Size,
    ops: Vec<PaintOp>,
    clip_depth: usize,
}

impl Recorder {
    /// Creates a recorder for a picture of the given native size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
            clip_depth: 0,
        }
    }

    /// Returns the native size the picture will carry.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the operations recorded so far.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Returns the number of currently open clips.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Closes any open clips and returns the recorded picture.
    #[must_use]
    pub fn finish(mut self) -> Picture {
        while self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.ops.push(PaintOp::State(StateOp::PopClip));
        }
        Picture::new(self.ops, self.size)
    }
}

impl Canvas for Recorder {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::PushClip(_) => self.clip_depth += 1,
            StateOp::PopClip => {
                if self.clip_depth == 0 {
                    return;
                }
                self.clip_depth -= 1;
            }
            _ => {}
        }
        self.ops.push(PaintOp::State(op));
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(PaintOp::Draw(op));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::Recorder;
    use crate::{Canvas, DrawOp, PaintOp, StateOp};

    #[test]
    fn finish_closes_open_clips() {
        let mut recorder = Recorder::new(Size::new(8.0, 8.0));
        recorder.clip_push(Rect::new(0.0, 0.0, 4.0, 4.0));
        recorder.clip_push(Rect::new(0.0, 0.0, 2.0, 2.0));
        recorder.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let picture = recorder.finish();

        assert_eq!(picture.ops().len(), 5);
        assert_eq!(picture.ops()[4], PaintOp::State(StateOp::PopClip));
        assert_eq!(picture.size(), Size::new(8.0, 8.0));
    }

    #[test]
    fn stray_pop_is_dropped() {
        let mut recorder = Recorder::new(Size::new(8.0, 8.0));
        recorder.clip_pop();
        assert!(recorder.ops().is_empty());
        assert_eq!(recorder.clip_depth(), 0);
    }

    #[test]
    fn empty_recording_is_valid() {
        let picture = Recorder::new(Size::new(3.0, 2.0)).finish();
        assert!(picture.ops().is_empty());
        assert!(!picture.is_null());
    }
}
