// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::PathBuf;

use crate::embed::ObjectType;

/// Errors raised while editing a [`crate::Document`].
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// An object was inserted whose type has no handler on the document.
    #[error("object type {0:?} has no handler registered on this document")]
    UnregisteredObjectType(ObjectType),
    /// A cursor points past the end of the document.
    #[error("cursor position {position} is past the end of the document ({len} nodes)")]
    CursorOutOfRange {
        /// Requested node position.
        position: usize,
        /// Number of nodes in the document.
        len: usize,
    },
    /// `begin_edit_block` was called while a block was already open.
    #[error("an edit block is already open")]
    EditBlockOpen,
    /// `end_edit_block` was called with no open block.
    #[error("no edit block is open")]
    NoEditBlock,
}

/// Errors raised while writing pictures or pages to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The target could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The picture has no usable size.
    #[error("picture is empty and cannot be exported")]
    EmptyPicture,
    /// There were no pages to write.
    #[error("no pages to export")]
    NoPages,
}
