//! Layout and PDF emission for fixture documents.
//!
//! # Pipeline
//! - `paginate` resolves every block's style role, word-wraps paragraph lines
//!   at the page text width using the static metric tables, and flows lines
//!   top-to-bottom onto pages, breaking at the bottom margin.
//! - `render` emits the paginated layout as a PDF through `lopdf` and writes
//!   it to the output path, creating parent directories as needed.
//!
//! Rendering is deterministic: no clocks, no randomness, integer-rounded
//! coordinates. Rendering the same document twice produces identical bytes.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, Stream, StringFormat};
use tracing::{debug, info};

use crate::document::blocks::{ContentBlock, Document, Line, Span};
use crate::document::metrics::{get_metrics, FontFace};
use crate::document::styles::Alignment;
use crate::errors::AssemblerError;

/// Baseline-to-baseline distance as a multiple of font size.
const LEADING_FACTOR: f32 = 1.2;

// ────────────────────────────────────────────────────────────────────────────
// Layout types
// ────────────────────────────────────────────────────────────────────────────

/// A maximal run of words sharing one face, spaces included.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub face: FontFace,
    pub text: String,
}

/// One laid-out line. Coordinates are in points from the page's lower-left
/// corner; `baseline` is the text baseline the runs sit on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub baseline: f32,
    pub font_size_pt: f32,
    pub runs: Vec<StyledRun>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap of one rich-text line at `max_width_pt`.
///
/// Returns the wrapped lines as face-grouped runs. Span boundaries inside a
/// word never occur (spans split on whitespace), so emphasis survives
/// wrapping intact. An all-whitespace input yields no lines.
fn wrap_spans(spans: &[Span], font_size_pt: f32, max_width_pt: f32) -> Vec<Vec<StyledRun>> {
    let mut tokens: Vec<(FontFace, &str)> = Vec::new();
    for span in spans {
        let face = if span.bold {
            FontFace::HelveticaBold
        } else {
            FontFace::Helvetica
        };
        for word in span.text.split_whitespace() {
            tokens.push((face, word));
        }
    }
    if tokens.is_empty() {
        return vec![];
    }

    let mut token_lines: Vec<Vec<(FontFace, &str)>> = Vec::new();
    let mut current: Vec<(FontFace, &str)> = Vec::new();
    let mut current_width = 0.0_f32;
    let mut first_on_line = true;

    for (face, word) in tokens {
        let metrics = get_metrics(&face);
        let word_w = metrics.measure_str(word) * font_size_pt;
        let space_w = if first_on_line {
            0.0
        } else {
            metrics.space_width * font_size_pt
        };

        if !first_on_line && current_width + space_w + word_w > max_width_pt {
            // Current line is full — emit it and start a new line with this word.
            token_lines.push(std::mem::take(&mut current));
            current.push((face, word));
            current_width = word_w;
            // first_on_line stays false: the next word on the new line gets a space
        } else {
            current.push((face, word));
            current_width += space_w + word_w;
            first_on_line = false;
        }
    }
    token_lines.push(current);

    token_lines.iter().map(|line| group_runs(line)).collect()
}

/// Groups a line of words into maximal same-face runs, re-inserting the
/// single spaces between words. The separator at a face boundary attaches to
/// the run before it, so summing run widths gives the full line width.
fn group_runs(tokens: &[(FontFace, &str)]) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    for (face, word) in tokens {
        let extends_last = runs.last().map(|r| r.face == *face).unwrap_or(false);
        if extends_last {
            if let Some(run) = runs.last_mut() {
                run.text.push(' ');
                run.text.push_str(word);
            }
        } else {
            if let Some(prev) = runs.last_mut() {
                prev.text.push(' ');
            }
            runs.push(StyledRun {
                face: *face,
                text: (*word).to_string(),
            });
        }
    }
    runs
}

fn line_width_pt(runs: &[StyledRun], font_size_pt: f32) -> f32 {
    runs.iter()
        .map(|r| get_metrics(&r.face).measure_str(&r.text) * font_size_pt)
        .sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Lays the document's blocks out onto pages.
///
/// Every style-role reference is resolved before any layout happens, so an
/// unknown role fails the whole render up front. An empty block list yields a
/// single empty page — the rendered artifact stays a valid document.
pub fn paginate(doc: &Document) -> Result<Vec<Page>, AssemblerError> {
    let page_cfg = *doc.page();

    let mut resolved = Vec::with_capacity(doc.blocks().len());
    for block in doc.blocks() {
        // Spacers resolve their role too: the reference must exist even
        // though only the explicit height drives layout.
        resolved.push((block, doc.styles().resolve(block.role())?));
    }

    let mut pages: Vec<Page> = Vec::new();
    let mut current = Page::default();
    let mut cursor_y = page_cfg.content_top_pt();

    for (block, style) in resolved {
        let lines: Vec<Line> = match block {
            ContentBlock::Spacer { height_pt, .. } => {
                cursor_y -= height_pt;
                continue;
            }
            // Titles and headings render as a single bold line.
            ContentBlock::Title { text, .. } | ContentBlock::Heading { text, .. } => {
                vec![Line::new(vec![Span::bold(text.clone())])]
            }
            ContentBlock::Paragraph { lines, .. } => lines.clone(),
        };

        cursor_y -= style.space_before_pt;
        let leading = style.font_size_pt * LEADING_FACTOR;

        for line in &lines {
            for runs in wrap_spans(&line.spans, style.font_size_pt, page_cfg.text_width_pt()) {
                if cursor_y - leading < page_cfg.content_bottom_pt() {
                    pages.push(std::mem::take(&mut current));
                    cursor_y = page_cfg.content_top_pt();
                }
                cursor_y -= leading;

                let width = line_width_pt(&runs, style.font_size_pt);
                let x = match style.alignment {
                    Alignment::Left => page_cfg.margin_pt,
                    Alignment::Center => {
                        page_cfg.margin_pt + ((page_cfg.text_width_pt() - width) / 2.0).max(0.0)
                    }
                };

                current.lines.push(PlacedLine {
                    x,
                    baseline: cursor_y,
                    font_size_pt: style.font_size_pt,
                    runs,
                });
            }
        }

        cursor_y -= style.space_after_pt;
    }

    pages.push(current);
    debug!("paginated {} block(s) onto {} page(s)", doc.blocks().len(), pages.len());
    Ok(pages)
}

// ────────────────────────────────────────────────────────────────────────────
// PDF emission
// ────────────────────────────────────────────────────────────────────────────

/// Renders the document to a PDF file at `output_path`.
///
/// Parent directories are created if absent. On a failed save the partial
/// file is removed, so a `Render` error never leaves an ambiguous artifact.
pub fn render(doc: &Document, output_path: &Path) -> Result<(), AssemblerError> {
    let pages = paginate(doc)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                AssemblerError::Render(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
    }

    let page_cfg = *doc.page();
    let mut pdf = PdfDocument::with_version("1.5");

    let pages_id = pdf.new_object_id();
    let regular_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FontFace::Helvetica.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FontFace::HelveticaBold.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular_id,
            FontFace::HelveticaBold.resource_name() => bold_id,
        },
    });

    // Resources and MediaBox go on every page directly — inheritance from the
    // Pages node trips up some strict extractors.
    let media_box = vec![
        Object::from(0_i64),
        Object::from(0_i64),
        (page_cfg.page_width_pt.round() as i64).into(),
        (page_cfg.page_height_pt.round() as i64).into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let encoded = page_content(page)
            .encode()
            .map_err(|e| AssemblerError::Render(format!("content stream encoding failed: {e}")))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    if let Err(e) = pdf.save(output_path) {
        let _ = fs::remove_file(output_path);
        return Err(AssemblerError::Render(format!(
            "failed to write {}: {e}",
            output_path.display()
        )));
    }

    info!(
        "rendered {} page(s) to {}",
        pages.len(),
        output_path.display()
    );
    Ok(())
}

/// Builds the content stream for one laid-out page.
fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    for line in &page.lines {
        let mut x = line.x;
        for run in &line.runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![
                    run.face.resource_name().into(),
                    (line.font_size_pt.round() as i64).into(),
                ],
            ));
            operations.push(Operation::new(
                "Td",
                vec![
                    (x.round() as i64).into(),
                    (line.baseline.round() as i64).into(),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(winansi_bytes(&run.text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
            x += get_metrics(&run.face).measure_str(&run.text) * line.font_size_pt;
        }
    }
    Content { operations }
}

/// Encodes text as WinAnsi bytes, matching the /Encoding declared on the
/// font dictionaries. The fixture content is ASCII apart from bullets and a
/// handful of punctuation; anything unmapped degrades to '?'.
fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
