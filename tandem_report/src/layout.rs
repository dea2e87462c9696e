// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-page layout of a [`Document`].
//!
//! This is a deliberately simple engine:
//! - Text is wrapped greedily on whitespace using an estimated glyph
//!   advance of [`PageLayout::glyph_width_ratio`] times the font size.
//! - Headings and objects each occupy their own block.
//! - Objects are sized by their registered [`ObjectHandler`] and shrunk to
//!   the content box if they do not fit, then painted by that handler.
//!
//! Each page is recorded into a [`Picture`] of the page size.

use std::sync::Arc;

use kurbo::{Point, Rect, Size};
use peniko::{Brush, Color};
use tandem_picture::{Canvas, DrawOp, Picture, Recorder, StateOp};

use crate::document::{Document, Node, TextStyle};
use crate::embed::{ObjectFormat, ObjectHandler};

/// A4 at 96 dots per inch.
pub const A4: Size = Size::new(794.0, 1123.0);

/// Page geometry and type sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    page_size: Size,
    margin: f64,
    body_size: f64,
    heading_size: f64,
    line_spacing: f64,
    glyph_width_ratio: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_size: A4,
            margin: 72.0,
            body_size: 12.0,
            heading_size: 24.0,
            line_spacing: 1.4,
            glyph_width_ratio: 0.5,
        }
    }
}

enum Block<'a> {
    Line {
        text: String,
        style: TextStyle,
    },
    Object {
        position: usize,
        format: &'a ObjectFormat,
        handler: Arc<dyn ObjectHandler>,
        size: Size,
    },
}

struct PageWriter {
    layout: PageLayout,
    pages: Vec<Picture>,
    current: Recorder,
    y: f64,
}

impl PageLayout {
    /// Creates the default layout: A4 with one-inch margins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, size: Size) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the margin on all four sides.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Sets the body and heading font sizes.
    #[must_use]
    pub fn with_font_sizes(mut self, body: f64, heading: f64) -> Self {
        self.body_size = body;
        self.heading_size = heading;
        self
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Returns the margin.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the estimated glyph advance as a fraction of the font size.
    #[must_use]
    pub fn glyph_width_ratio(&self) -> f64 {
        self.glyph_width_ratio
    }

    /// Returns the area inside the margins.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.page_size.to_rect().inset(-self.margin)
    }

    fn font_size(&self, style: TextStyle) -> f64 {
        match style {
            TextStyle::Heading => self.heading_size,
            TextStyle::Body => self.body_size,
        }
    }

    fn line_height(&self, style: TextStyle) -> f64 {
        self.font_size(style) * self.line_spacing
    }

    /// Lays `doc` out and records one picture per page.
    ///
    /// An empty document still yields one blank page. Object nodes without
    /// a registered handler are skipped.
    #[must_use]
    pub fn paginate(&self, doc: &Document) -> Vec<Picture> {
        let mut writer = PageWriter::new(self.clone());
        for block in self.blocks(doc) {
            match block {
                Block::Line { text, style } => writer.line(&text, style),
                Block::Object {
                    position,
                    format,
                    handler,
                    size,
                } => writer.object(doc, position, format, handler.as_ref(), size),
            }
        }
        let pages = writer.finish();
        log::debug!("laid out {} nodes on {} pages", doc.len(), pages.len());
        pages
    }

    fn blocks<'a>(&self, doc: &'a Document) -> Vec<Block<'a>> {
        let mut blocks = Vec::new();
        let mut line = String::new();
        // Set right after a block ends; a newline there ends nothing.
        let mut after_block = false;

        for (position, node) in doc.nodes().iter().enumerate() {
            match node {
                Node::Text(run) if run.style == TextStyle::Heading => {
                    self.flush(&mut blocks, &mut line, false);
                    self.push_wrapped(&mut blocks, &run.text, TextStyle::Heading);
                    after_block = true;
                }
                Node::Text(run) => {
                    for (i, part) in run.text.split('\n').enumerate() {
                        if i > 0 {
                            if after_block && line.is_empty() {
                                after_block = false;
                            } else {
                                self.flush(&mut blocks, &mut line, true);
                            }
                        }
                        if !part.is_empty() {
                            line.push_str(part);
                            after_block = false;
                        }
                    }
                }
                Node::Object(format) => {
                    self.flush(&mut blocks, &mut line, false);
                    let Some(handler) = doc.handler(format.object_type) else {
                        log::warn!(
                            "skipping object at {position}: no handler for {:?}",
                            format.object_type
                        );
                        continue;
                    };
                    let size = handler.intrinsic_size(doc, position, format);
                    blocks.push(Block::Object {
                        position,
                        format,
                        handler: Arc::clone(handler),
                        size: self.fit_content(size),
                    });
                    after_block = true;
                }
            }
        }
        self.flush(&mut blocks, &mut line, false);
        blocks
    }

    fn flush(&self, blocks: &mut Vec<Block<'_>>, line: &mut String, keep_empty: bool) {
        if line.is_empty() && !keep_empty {
            return;
        }
        let text = std::mem::take(line);
        self.push_wrapped(blocks, &text, TextStyle::Body);
    }

    fn push_wrapped(&self, blocks: &mut Vec<Block<'_>>, text: &str, style: TextStyle) {
        let advance = self.font_size(style) * self.glyph_width_ratio;
        let width = self.content_rect().width();
        let max_chars = if advance > 0.0 {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a character count per line; saturating is fine"
            )]
            let chars = (width / advance).floor() as usize;
            chars.max(1)
        } else {
            usize::MAX
        };
        for text in wrap(text, max_chars) {
            blocks.push(Block::Line { text, style });
        }
    }

    fn fit_content(&self, size: Size) -> Size {
        let content = self.content_rect().size();
        if size.width <= content.width && size.height <= content.height {
            return size;
        }
        let scale = (content.width / size.width).min(content.height / size.height);
        size * scale
    }
}

impl PageWriter {
    fn new(layout: PageLayout) -> Self {
        let current = Self::blank(&layout);
        let y = layout.margin;
        Self {
            layout,
            pages: Vec::new(),
            current,
            y,
        }
    }

    fn blank(layout: &PageLayout) -> Recorder {
        let mut page = Recorder::new(layout.page_size);
        page.state(StateOp::SetBrush(Brush::Solid(Color::WHITE)));
        page.draw(DrawOp::FillRect(layout.page_size.to_rect()));
        page
    }

    /// Starts a new page if `height` does not fit below the pen, unless the
    /// page is still empty.
    fn reserve(&mut self, height: f64) {
        let bottom = self.layout.page_size.height - self.layout.margin;
        if self.y + height > bottom && self.y > self.layout.margin {
            let next = Self::blank(&self.layout);
            let page = std::mem::replace(&mut self.current, next);
            self.pages.push(page.finish());
            self.y = self.layout.margin;
        }
    }

    fn line(&mut self, text: &str, style: TextStyle) {
        let height = self.layout.line_height(style);
        self.reserve(height);
        if !text.is_empty() {
            let size = self.layout.font_size(style);
            self.current
                .state(StateOp::SetBrush(Brush::Solid(Color::BLACK)));
            self.current.draw(DrawOp::Text {
                origin: Point::new(self.layout.margin, self.y + size),
                text: Arc::from(text),
                size,
            });
        }
        self.y += height;
    }

    fn object(
        &mut self,
        doc: &Document,
        position: usize,
        format: &ObjectFormat,
        handler: &dyn ObjectHandler,
        size: Size,
    ) {
        self.reserve(size.height);
        let dest = Rect::from_origin_size((self.layout.margin, self.y), size);
        handler.draw(&mut self.current, dest, doc, position, format);
        self.y += size.height;
    }

    fn finish(mut self) -> Vec<Picture> {
        self.pages.push(self.current.finish());
        self.pages
    }
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Words longer than a line are split. An empty input yields one empty
/// line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        if len > 0 && len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        while word.len() > max_chars {
            if len > 0 {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        len += word.len();
        line.extend(word);
    }
    if len > 0 || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kurbo::{Rect, Size};
    use tandem_picture::{DrawOp, PaintOp, Picture, Recorder};

    use super::{PageLayout, wrap};
    use crate::document::{Cursor, Document, TextStyle};
    use crate::embed::{DocumentEmbedder, ObjectFormat, PLOT_OBJECT_TYPE};

    fn texts(page: &Picture) -> Vec<String> {
        page.ops()
            .iter()
            .filter_map(|op| match op {
                PaintOp::Draw(DrawOp::Text { text, .. }) => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    fn nested_pictures(page: &Picture) -> Vec<(Picture, kurbo::Affine)> {
        page.ops()
            .iter()
            .filter_map(|op| match op {
                PaintOp::Draw(DrawOp::Picture { picture, transform }) => {
                    Some((picture.clone(), *transform))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn wrap_splits_on_whitespace_and_long_words() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(wrap("x abcdefg", 3), vec!["x", "abc", "def", "g"]);
        assert_eq!(wrap("", 3), vec![""]);
    }

    #[test]
    fn empty_document_is_one_blank_page() {
        let pages = PageLayout::new().paginate(&Document::new());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].size(), super::A4);
        assert!(texts(&pages[0]).is_empty());
    }

    #[test]
    fn newline_after_object_does_not_add_blank_line() {
        let mut doc = Document::new();
        doc.register_handler(PLOT_OBJECT_TYPE, Arc::new(DocumentEmbedder));
        let mut cursor = Cursor::start();
        doc.insert_html(&mut cursor, "<h1>Title</h1>first</br>second")
            .unwrap();
        doc.insert_object(
            &mut cursor,
            ObjectFormat::plot(Recorder::new(Size::new(100.0, 50.0)).finish()),
        )
        .unwrap();
        doc.insert_text(&mut cursor, "\nlast", TextStyle::Body)
            .unwrap();

        let pages = PageLayout::new().paginate(&doc);
        assert_eq!(pages.len(), 1);
        assert_eq!(texts(&pages[0]), vec!["Title", "first", "second", "last"]);
        let nested = nested_pictures(&pages[0]);
        assert_eq!(nested.len(), 1);
        let placed = nested[0].1.transform_rect_bbox(nested[0].0.bounds());
        assert!((placed.width() - 100.0).abs() < 1e-9);
        assert!((placed.height() - 50.0).abs() < 1e-9);
        assert_eq!(placed.x0, 72.0);
    }

    #[test]
    fn oversized_object_shrinks_to_content_keeping_aspect() {
        let mut doc = Document::new();
        doc.register_handler(PLOT_OBJECT_TYPE, Arc::new(DocumentEmbedder));
        doc.insert_object(
            &mut Cursor::start(),
            ObjectFormat::plot(Recorder::new(Size::new(2000.0, 1000.0)).finish()),
        )
        .unwrap();

        let layout = PageLayout::new()
            .with_page_size(Size::new(600.0, 800.0))
            .with_margin(50.0);
        let pages = layout.paginate(&doc);
        let nested = nested_pictures(&pages[0]);
        let placed = nested[0].1.transform_rect_bbox(nested[0].0.bounds());
        assert!((placed.width() - 500.0).abs() < 1e-9);
        assert!((placed.height() - 250.0).abs() < 1e-9);
        assert_eq!(layout.content_rect(), Rect::new(50.0, 50.0, 550.0, 750.0));
    }

    #[test]
    fn long_text_flows_onto_more_pages() {
        let mut doc = Document::new();
        let body = vec!["line"; 200].join("\n");
        doc.insert_text(&mut Cursor::start(), &body, TextStyle::Body)
            .unwrap();

        let layout = PageLayout::new().with_page_size(Size::new(400.0, 300.0));
        let pages = layout.paginate(&doc);
        assert!(pages.len() > 1);
        let total: usize = pages.iter().map(|p| texts(p).len()).sum();
        assert_eq!(total, 200);
        assert!(pages.iter().all(|p| p.size() == Size::new(400.0, 300.0)));
    }
}
