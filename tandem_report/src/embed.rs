// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedding plot snapshots in documents.
//!
//! A [`Document`] stores object nodes as an [`ObjectFormat`]: a type tag plus
//! an optional [`Picture`] payload. The layout engine does not know how to
//! size or paint them; it asks the [`ObjectHandler`] registered for the tag
//! on that document. [`DocumentEmbedder`] is the handler for plot snapshots.
//!
//! ```
//! use std::sync::Arc;
//!
//! use kurbo::Size;
//! use tandem_picture::Recorder;
//! use tandem_report::{Cursor, Document, DocumentEmbedder, ObjectFormat, PLOT_OBJECT_TYPE};
//!
//! let mut doc = Document::new();
//! let snapshot = ObjectFormat::plot(Recorder::new(Size::new(400.0, 300.0)).finish());
//!
//! // Not registered yet: the document refuses the node.
//! assert!(doc.insert_object(&mut Cursor::start(), snapshot.clone()).is_err());
//!
//! doc.register_handler(PLOT_OBJECT_TYPE, Arc::new(DocumentEmbedder));
//! doc.insert_object(&mut Cursor::start(), snapshot).unwrap();
//! ```

use kurbo::{Affine, Rect, Size};
use tandem_picture::{Canvas, CanvasExt, DrawOp, Picture};

use crate::document::Document;

/// First object type available to applications.
pub const USER_OBJECT: u32 = 0x2f00;

/// Tag identifying the kind of an object node.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectType(pub u32);

impl ObjectType {
    /// Returns the application object type `offset` past [`USER_OBJECT`].
    #[must_use]
    pub const fn user(offset: u32) -> Self {
        Self(USER_OBJECT + offset)
    }
}

/// Tag under which plot snapshots are embedded.
pub const PLOT_OBJECT_TYPE: ObjectType = ObjectType::user(3902);

/// Size reported for a missing or unusable payload.
pub const FALLBACK_SIZE: Size = Size::new(10.0, 10.0);

/// Properties of an object node.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectFormat {
    /// Handler tag.
    pub object_type: ObjectType,
    /// Snapshot payload, if any.
    pub picture: Option<Picture>,
}

impl ObjectFormat {
    /// Creates a format for `object_type` with an optional payload.
    #[must_use]
    pub fn new(object_type: ObjectType, picture: Option<Picture>) -> Self {
        Self {
            object_type,
            picture,
        }
    }

    /// Creates a plot snapshot format tagged [`PLOT_OBJECT_TYPE`].
    #[must_use]
    pub fn plot(picture: Picture) -> Self {
        Self::new(PLOT_OBJECT_TYPE, Some(picture))
    }
}

/// Sizes and paints object nodes of one type.
///
/// Both methods are called by the layout engine. They must not fail:
/// a payload that cannot be used degrades to a placeholder.
pub trait ObjectHandler: Send + Sync {
    /// Returns the size the object occupies in the flow.
    fn intrinsic_size(&self, doc: &Document, position: usize, format: &ObjectFormat) -> Size;

    /// Paints the object into `dest`.
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        dest: Rect,
        doc: &Document,
        position: usize,
        format: &ObjectFormat,
    );
}

/// Object handler for plot snapshots.
///
/// The payload keeps its native size in the flow and is painted scaled to
/// fit the destination with its aspect ratio preserved.
#[derive(Copy, Clone, Debug, Default)]
pub struct DocumentEmbedder;

impl DocumentEmbedder {
    /// Returns the payload's native size, or [`FALLBACK_SIZE`] if it is
    /// missing or null.
    #[must_use]
    pub fn measure(payload: Option<&Picture>) -> Size {
        match payload {
            Some(picture) if !picture.is_null() => picture.size(),
            _ => {
                log::debug!("plot object is empty, using fallback size");
                FALLBACK_SIZE
            }
        }
    }

    /// Returns the uniform scale that fits `native` inside `dest`.
    #[must_use]
    pub fn fit_scale(native: Size, dest: Size) -> f64 {
        (dest.width / native.width).min(dest.height / native.height)
    }

    /// Paints the payload into `dest`, clipped to it.
    ///
    /// The picture is anchored at `dest`'s origin and scaled uniformly so
    /// that it fits. A missing or null payload paints nothing.
    pub fn render(canvas: &mut dyn Canvas, dest: Rect, payload: Option<&Picture>) {
        let Some(picture) = payload.filter(|p| !p.is_null()) else {
            return;
        };
        let dest = dest.abs();
        let scale = Self::fit_scale(picture.size(), dest.size());
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        let transform = Affine::translate(dest.origin().to_vec2()) * Affine::scale(scale);
        canvas.with_clip(dest, |c| {
            c.draw(DrawOp::Picture {
                picture: picture.clone(),
                transform,
            });
        });
    }
}

impl ObjectHandler for DocumentEmbedder {
    fn intrinsic_size(&self, _doc: &Document, _position: usize, format: &ObjectFormat) -> Size {
        Self::measure(format.picture.as_ref())
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        dest: Rect,
        _doc: &Document,
        _position: usize,
        format: &ObjectFormat,
    ) {
        Self::render(canvas, dest, format.picture.as_ref());
    }
}
