// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tandem Report: rich-text reports with embedded plot snapshots.
//!
//! The pieces, in the order a report is produced:
//!
//! - [`ScenePainter`] / [`capture`]: paint the current plot state into a
//!   [`tandem_picture::Recorder`] at a chosen pixel size, producing an
//!   immutable [`tandem_picture::Picture`]. [`ViewportPainter`] paints a
//!   [`tandem_view::ViewportSet`].
//! - [`Document`]: ordered text runs and object nodes, edited through a
//!   [`Cursor`] in undoable edit blocks, with a per-document registry of
//!   [`ObjectHandler`]s keyed by [`ObjectType`].
//! - [`DocumentEmbedder`]: the handler for plot snapshots. It measures a
//!   snapshot at its native size and paints it scaled to fit with its
//!   aspect ratio kept.
//! - [`ReportBuilder`]: inserts a heading and paragraph, one snapshot, and
//!   trailing text as three edit blocks.
//! - [`PageLayout`] and [`export`]: lay a document out on fixed pages and
//!   write pages or snapshots as SVG.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::{Rect, Size};
//! use tandem_report::{
//!     Cursor, Document, DocumentEmbedder, PLOT_OBJECT_TYPE, PageLayout, ReportBuilder,
//!     ViewportPainter,
//! };
//! use tandem_view::{AxisRange, ViewportSet};
//!
//! let mut set = ViewportSet::new();
//! set.add(
//!     Rect::new(0.0, 0.0, 800.0, 300.0),
//!     AxisRange::new(-1.0, 1.0),
//!     AxisRange::new(0.0, 1.0),
//! );
//!
//! let mut doc = Document::new();
//! doc.register_handler(PLOT_OBJECT_TYPE, Arc::new(DocumentEmbedder));
//!
//! let painter = ViewportPainter::new(&set, &[]);
//! ReportBuilder::new()
//!     .build(&mut doc, Cursor::start(), &painter, Size::new(400.0, 400.0))
//!     .unwrap();
//! assert_eq!(doc.edit_count(), 3);
//!
//! let pages = PageLayout::new().paginate(&doc);
//! assert_eq!(pages.len(), 1);
//! ```

mod builder;
mod capture;
mod document;
mod embed;
mod error;
pub mod export;
mod layout;

pub use builder::{ReportBuilder, ReportText};
pub use capture::{PlotStyle, ScenePainter, Series, ViewportPainter, capture};
pub use document::{
    Cursor, DEFAULT_HISTORY_LIMIT, Document, Node, OBJECT_REPLACEMENT, TextRun, TextStyle,
};
pub use embed::{
    DocumentEmbedder, FALLBACK_SIZE, ObjectFormat, ObjectHandler, ObjectType, PLOT_OBJECT_TYPE,
    USER_OBJECT,
};
pub use error::{ExportError, ReportError};
pub use layout::{A4, PageLayout};
