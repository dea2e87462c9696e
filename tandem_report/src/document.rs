// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal rich-text document: text runs and embedded objects.
//!
//! Content is an ordered list of [`Node`]s. Edits go through a [`Cursor`]
//! (a node position) and are grouped into edit blocks; each non-empty
//! block is one entry in the undo history. Inserts made outside a block
//! form a block of their own.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::embed::{ObjectFormat, ObjectHandler, ObjectType};
use crate::error::ReportError;

/// Object replacement character, used for objects in plain text.
pub const OBJECT_REPLACEMENT: char = '\u{fffc}';

/// Number of edits a new document keeps for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Paragraph style of a text run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// A heading; laid out as its own block in a larger font.
    Heading,
    /// Body text. `'\n'` inside a body run starts a new line.
    #[default]
    Body,
}

/// A run of text with one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Paragraph style.
    pub style: TextStyle,
}

impl TextRun {
    /// Creates a run.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One content node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Styled text.
    Text(TextRun),
    /// An embedded object, sized and painted by its type's handler.
    Object(ObjectFormat),
}

/// An insertion point: the index of the node that the next insert goes
/// before. Inserting advances the cursor past the new content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    /// Node index.
    pub position: usize,
}

impl Cursor {
    /// Cursor at the start of a document.
    #[must_use]
    pub fn start() -> Self {
        Self::default()
    }

    /// Cursor at the end of `doc`.
    #[must_use]
    pub fn end(doc: &Document) -> Self {
        Self {
            position: doc.len(),
        }
    }
}

/// Ordered text and object content with a per-document handler registry
/// and undo history.
///
/// The history keeps at most [`history_limit`](Self::history_limit) edits;
/// older ones are forgotten and can no longer be undone.
#[derive(Clone)]
pub struct Document {
    nodes: Vec<Node>,
    handlers: HashMap<ObjectType, Arc<dyn ObjectHandler>>,
    history: VecDeque<Vec<Node>>,
    history_limit: usize,
    open_block: Option<Vec<Node>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            handlers: HashMap::new(),
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            open_block: None,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<_> = self.handlers.keys().collect();
        handlers.sort();
        f.debug_struct("Document")
            .field("nodes", &self.nodes)
            .field("handlers", &handlers)
            .field("history", &self.history.len())
            .field("history_limit", &self.history_limit)
            .field("open_block", &self.open_block.is_some())
            .finish()
    }
}

impl Document {
    /// Creates an empty document with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Builder-style variant of [`set_history_limit`](Self::set_history_limit).
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.set_history_limit(limit);
        self
    }

    /// Returns how many edits are kept for undo.
    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Sets how many edits are kept for undo, dropping the oldest ones
    /// beyond it. A limit of zero disables undo.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit;
        self.trim_history();
    }

    fn trim_history(&mut self) {
        let excess = self.history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            log::trace!("forgetting {excess} oldest edits");
            self.history.drain(..excess);
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the document has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registers `handler` for objects tagged `object_type` on this document,
    /// returning the handler it replaces.
    pub fn register_handler(
        &mut self,
        object_type: ObjectType,
        handler: Arc<dyn ObjectHandler>,
    ) -> Option<Arc<dyn ObjectHandler>> {
        log::debug!("registering object handler for {object_type:?}");
        self.handlers.insert(object_type, handler)
    }

    /// Returns the handler registered for `object_type`.
    #[must_use]
    pub fn handler(&self, object_type: ObjectType) -> Option<&Arc<dyn ObjectHandler>> {
        self.handlers.get(&object_type)
    }

    /// Opens an edit block. Blocks do not nest.
    pub fn begin_edit_block(&mut self) -> Result<(), ReportError> {
        if self.open_block.is_some() {
            return Err(ReportError::EditBlockOpen);
        }
        self.open_block = Some(self.nodes.clone());
        Ok(())
    }

    /// Closes the open edit block, recording it in the history if it
    /// changed anything.
    pub fn end_edit_block(&mut self) -> Result<(), ReportError> {
        let before = self.open_block.take().ok_or(ReportError::NoEditBlock)?;
        if before != self.nodes {
            self.history.push_back(before);
            self.trim_history();
        }
        Ok(())
    }

    /// Discards the open edit block, restoring the content it started from.
    ///
    /// Returns `false` if no block was open.
    pub fn abort_edit_block(&mut self) -> bool {
        match self.open_block.take() {
            Some(before) => {
                self.nodes = before;
                true
            }
            None => false,
        }
    }

    /// Returns `true` while an edit block is open.
    #[must_use]
    pub fn in_edit_block(&self) -> bool {
        self.open_block.is_some()
    }

    /// Runs `f` inside one edit block.
    ///
    /// If `f` fails, everything it changed is rolled back and the error is
    /// returned.
    pub fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, ReportError>,
    ) -> Result<R, ReportError> {
        self.begin_edit_block()?;
        match f(self) {
            Ok(out) => {
                self.end_edit_block()?;
                Ok(out)
            }
            Err(err) => {
                self.abort_edit_block();
                Err(err)
            }
        }
    }

    /// Returns the number of recorded edits.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.history.len()
    }

    /// Reverts the most recent edit. Returns `false` if there is none, or
    /// if an edit block is open.
    pub fn undo(&mut self) -> bool {
        if self.open_block.is_some() {
            return false;
        }
        match self.history.pop_back() {
            Some(before) => {
                self.nodes = before;
                true
            }
            None => false,
        }
    }

    /// Inserts a text run at the cursor.
    ///
    /// Empty text inserts nothing.
    pub fn insert_text(
        &mut self,
        cursor: &mut Cursor,
        text: &str,
        style: TextStyle,
    ) -> Result<(), ReportError> {
        self.check_cursor(cursor)?;
        if text.is_empty() {
            return Ok(());
        }
        self.insert_nodes(cursor, vec![Node::Text(TextRun::new(text, style))])
    }

    /// Parses a small HTML subset and inserts the resulting runs.
    ///
    /// Supported: `<h1>`..`<h6>` (heading runs), `<br>` in any of its
    /// spellings including the non-standard `</br>`, `<p>` (line breaks),
    /// and the `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&nbsp;` entities. Other
    /// tags are dropped and their content kept as body text.
    pub fn insert_html(&mut self, cursor: &mut Cursor, html: &str) -> Result<(), ReportError> {
        self.check_cursor(cursor)?;
        let runs = parse_html(html);
        if runs.is_empty() {
            return Ok(());
        }
        self.insert_nodes(cursor, runs.into_iter().map(Node::Text).collect())
    }

    /// Inserts an object node at the cursor.
    ///
    /// Fails with [`ReportError::UnregisteredObjectType`] unless a handler
    /// for the object's type is registered on this document.
    pub fn insert_object(
        &mut self,
        cursor: &mut Cursor,
        format: ObjectFormat,
    ) -> Result<(), ReportError> {
        self.check_cursor(cursor)?;
        if !self.handlers.contains_key(&format.object_type) {
            return Err(ReportError::UnregisteredObjectType(format.object_type));
        }
        self.insert_nodes(cursor, vec![Node::Object(format)])
    }

    /// Returns the content as plain text, with objects as
    /// [`OBJECT_REPLACEMENT`] and headings on their own line.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(TextRun {
                    text,
                    style: TextStyle::Heading,
                }) => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str(text);
                    out.push('\n');
                }
                Node::Text(run) => out.push_str(&run.text),
                Node::Object(_) => out.push(OBJECT_REPLACEMENT),
            }
        }
        out
    }

    fn check_cursor(&self, cursor: &Cursor) -> Result<(), ReportError> {
        if cursor.position > self.nodes.len() {
            return Err(ReportError::CursorOutOfRange {
                position: cursor.position,
                len: self.nodes.len(),
            });
        }
        Ok(())
    }

    fn insert_nodes(&mut self, cursor: &mut Cursor, nodes: Vec<Node>) -> Result<(), ReportError> {
        let implicit = self.open_block.is_none();
        if implicit {
            self.begin_edit_block()?;
        }
        let count = nodes.len();
        let at = cursor.position;
        self.nodes.splice(at..at, nodes);
        cursor.position += count;
        if implicit {
            self.end_edit_block()?;
        }
        Ok(())
    }
}

fn parse_html(html: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut text = String::new();
    let mut style = TextStyle::Body;
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        push_text(&mut text, &rest[..lt]);
        let after = &rest[lt + 1..];
        let Some(gt) = after.find('>') else {
            push_text(&mut text, &rest[lt..]);
            rest = "";
            break;
        };
        let tag = after[..gt].trim();
        rest = &after[gt + 1..];

        let closing = tag.starts_with('/');
        let name = tag
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match name.as_str() {
            "br" => text.push('\n'),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                flush_run(&mut runs, &mut text, style);
                style = if closing {
                    TextStyle::Body
                } else {
                    TextStyle::Heading
                };
            }
            "p" => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }
    push_text(&mut text, rest);
    flush_run(&mut runs, &mut text, style);
    runs
}

fn flush_run(runs: &mut Vec<TextRun>, text: &mut String, style: TextStyle) {
    if text.is_empty() {
        return;
    }
    runs.push(TextRun::new(std::mem::take(text), style));
}

/// Appends HTML character data: source line breaks collapse to spaces and
/// the common entities are decoded.
fn push_text(out: &mut String, raw: &str) {
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        push_collapsed(out, &rest[..amp]);
        let tail = &rest[amp..];
        let entity = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&nbsp;", '\u{a0}'),
        ]
        .into_iter()
        .find(|(name, _)| tail.starts_with(name));
        match entity {
            Some((name, ch)) => {
                out.push(ch);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    push_collapsed(out, rest);
}

fn push_collapsed(out: &mut String, raw: &str) {
    out.extend(raw.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
}
