// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing snapshots and laid-out pages to disk as SVG.

use std::fs;
use std::path::{Path, PathBuf};

use tandem_picture::{Picture, svg};

use crate::error::ExportError;

/// Writes `picture` to `path` as a standalone SVG document.
///
/// Nothing is written for a null picture.
pub fn export_svg(path: impl AsRef<Path>, picture: &Picture) -> Result<(), ExportError> {
    let path = path.as_ref();
    if picture.is_null() {
        return Err(ExportError::EmptyPicture);
    }
    write(path, &svg::to_svg(picture))?;
    log::info!("wrote snapshot to {}", path.display());
    Ok(())
}

/// Writes each page to `dir` as `{stem}-{n}.svg`, numbering from 1, and
/// returns the written paths.
///
/// `dir` is created if missing.
pub fn export_pages_svg(
    dir: impl AsRef<Path>,
    stem: &str,
    pages: &[Picture],
) -> Result<Vec<PathBuf>, ExportError> {
    let dir = dir.as_ref();
    if pages.is_empty() {
        return Err(ExportError::NoPages);
    }
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        let path = dir.join(format!("{stem}-{}.svg", i + 1));
        write(&path, &svg::to_svg(page))?;
        written.push(path);
    }
    log::info!("wrote {} pages to {}", written.len(), dir.display());
    Ok(written)
}

fn write(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
