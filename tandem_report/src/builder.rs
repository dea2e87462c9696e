// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::capture::{ScenePainter, capture};
use crate::document::{Cursor, Document, TextStyle};
use crate::embed::{ObjectFormat, ObjectType, PLOT_OBJECT_TYPE};
use crate::error::ReportError;

/// Text placed around the plot snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportText {
    /// Heading and introduction, in the HTML subset accepted by
    /// [`Document::insert_html`].
    pub intro_html: String,
    /// Plain text inserted after the snapshot.
    pub trailing: String,
}

impl Default for ReportText {
    fn default() -> Self {
        Self {
            intro_html: "<h1>Document Title1</h1>\
                         Some simple text to test the reporting</br>\
                         Second line of this awesome report"
                .to_owned(),
            trailing: "\nJust a text at the end of the report".to_owned(),
        }
    }
}

/// Composes a report: introduction, one plot snapshot, trailing text.
///
/// Each of the three parts is inserted as one edit block, so the document
/// history gains one entry per non-empty part (three with the default
/// texts) and a failing part leaves nothing of itself behind.
#[derive(Clone, Debug)]
pub struct ReportBuilder {
    text: ReportText,
    object_type: ObjectType,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            text: ReportText::default(),
            object_type: PLOT_OBJECT_TYPE,
        }
    }
}

impl ReportBuilder {
    /// Creates a builder with the default texts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the report texts.
    #[must_use]
    pub fn with_text(mut self, text: ReportText) -> Self {
        self.text = text;
        self
    }

    /// Tags the snapshot with a different object type.
    #[must_use]
    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    /// Returns the report texts.
    #[must_use]
    pub fn text(&self) -> &ReportText {
        &self.text
    }

    /// Builds the report into `document` at `cursor`, capturing `painter`
    /// at `capture_size` for the snapshot.
    ///
    /// The document must already have a handler for the snapshot's object
    /// type; otherwise nothing is inserted and
    /// [`ReportError::UnregisteredObjectType`] is returned.
    ///
    /// Returns the cursor after the inserted content.
    pub fn build(
        &self,
        document: &mut Document,
        cursor: Cursor,
        painter: &dyn ScenePainter,
        capture_size: Size,
    ) -> Result<Cursor, ReportError> {
        if document.handler(self.object_type).is_none() {
            return Err(ReportError::UnregisteredObjectType(self.object_type));
        }
        let mut cursor = cursor;

        document.edit(|doc| doc.insert_html(&mut cursor, &self.text.intro_html))?;

        let picture = capture(painter, capture_size);
        let format = ObjectFormat::new(self.object_type, Some(picture));
        document.edit(|doc| doc.insert_object(&mut cursor, format))?;

        document.edit(|doc| doc.insert_text(&mut cursor, &self.text.trailing, TextStyle::Body))?;

        log::debug!(
            "report built: {} nodes, {} edits",
            document.len(),
            document.edit_count()
        );
        Ok(cursor)
    }
}
