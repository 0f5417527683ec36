//! The fixture document model: rich text spans, typed content blocks, and the
//! immutable `Document` that ties blocks to a style sheet and page geometry.

use serde::{Deserialize, Serialize};

use crate::document::metrics::PageConfig;
use crate::document::styles::StyleSheet;

/// Style role assigned to body text blocks and spacers.
pub const BODY_ROLE: &str = "normal";

// ────────────────────────────────────────────────────────────────────────────
// Rich text
// ────────────────────────────────────────────────────────────────────────────

/// A run of text with a single emphasis setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One explicit line of a paragraph. Paragraphs keep their line breaks — a
/// bulleted list is one paragraph with one line per bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// A line consisting of a single regular-weight span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::new(text)],
        }
    }

    /// Concatenated text of all spans, without emphasis markers.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content blocks
// ────────────────────────────────────────────────────────────────────────────

/// One discrete unit of document content. Blocks render in sequence order;
/// the order is fixed once the containing `Document` is built.
///
/// Every variant references a style role by name. The reference is validated
/// when layout begins — an unknown role fails the render before any output
/// is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentBlock {
    Title { text: String, role: String },
    Heading { text: String, role: String },
    Paragraph { lines: Vec<Line>, role: String },
    /// Fixed vertical gap. Carries no text; the height is explicit rather
    /// than style-driven.
    Spacer { height_pt: f32, role: String },
}

impl ContentBlock {
    pub fn title(text: impl Into<String>, role: impl Into<String>) -> Self {
        ContentBlock::Title {
            text: text.into(),
            role: role.into(),
        }
    }

    pub fn heading(text: impl Into<String>, role: impl Into<String>) -> Self {
        ContentBlock::Heading {
            text: text.into(),
            role: role.into(),
        }
    }

    pub fn paragraph(lines: Vec<Line>, role: impl Into<String>) -> Self {
        ContentBlock::Paragraph {
            lines,
            role: role.into(),
        }
    }

    /// A single-line paragraph of regular text.
    pub fn text(text: impl Into<String>, role: impl Into<String>) -> Self {
        ContentBlock::Paragraph {
            lines: vec![Line::plain(text)],
            role: role.into(),
        }
    }

    pub fn spacer(height_pt: f32) -> Self {
        ContentBlock::Spacer {
            height_pt,
            role: BODY_ROLE.to_string(),
        }
    }

    /// The style role this block references.
    pub fn role(&self) -> &str {
        match self {
            ContentBlock::Title { role, .. }
            | ContentBlock::Heading { role, .. }
            | ContentBlock::Paragraph { role, .. }
            | ContentBlock::Spacer { role, .. } => role,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// An ordered block sequence plus the style sheet and page geometry needed to
/// lay it out. Constructed once and not mutated afterwards; rendering takes
/// the document by shared reference.
#[derive(Debug, Clone)]
pub struct Document {
    styles: StyleSheet,
    page: PageConfig,
    blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn new(styles: StyleSheet, page: PageConfig, blocks: Vec<ContentBlock>) -> Self {
        Self {
            styles,
            page,
            blocks,
        }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_concatenates_spans() {
        let line = Line::new(vec![Span::bold("Senior Engineer"), Span::new(" | Acme")]);
        assert_eq!(line.text(), "Senior Engineer | Acme");
    }

    #[test]
    fn test_block_role_accessor_covers_all_variants() {
        assert_eq!(ContentBlock::title("T", "title").role(), "title");
        assert_eq!(ContentBlock::heading("H", "section-heading").role(), "section-heading");
        assert_eq!(ContentBlock::text("body", BODY_ROLE).role(), BODY_ROLE);
        assert_eq!(ContentBlock::spacer(12.0).role(), BODY_ROLE);
    }

    #[test]
    fn test_spacer_carries_no_text() {
        let spacer = ContentBlock::spacer(20.0);
        match spacer {
            ContentBlock::Spacer { height_pt, .. } => assert_eq!(height_pt, 20.0),
            other => panic!("expected Spacer, got {other:?}"),
        }
    }
}
