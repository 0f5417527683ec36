//! The fixed content script for the sample PDF resume.
//!
//! `build_content_script` is a pure function: it takes no input and returns
//! the same block sequence on every call, so the rendered fixture is stable
//! across runs. Section order is part of the fixture's contract — the
//! service's parsing checks depend on identity, summary, experience,
//! education, and skills appearing in that order.

use crate::document::blocks::{ContentBlock, Line, Span, BODY_ROLE};
use crate::document::styles::{Alignment, ResolvedStyle, StyleOverrides, StyleSheet};

/// Role name for the document title.
pub const TITLE_ROLE: &str = "title";
/// Role name for section headings.
pub const SECTION_HEADING_ROLE: &str = "section-heading";

/// Builds the style sheet the sample resume renders against.
///
/// Bases mirror a conventional stylesheet (`normal`, `heading1`, `heading2`);
/// `title` and `section-heading` derive from the heading bases with the
/// fixture's spacing and alignment tweaks.
pub fn resume_style_sheet() -> StyleSheet {
    let mut sheet = StyleSheet::new();

    // Registration can only fail on duplicate names or unknown bases, and the
    // names below are fixed, so the unwraps are unreachable.
    sheet
        .define_base(
            BODY_ROLE,
            ResolvedStyle {
                font_size_pt: 10.0,
                space_before_pt: 0.0,
                space_after_pt: 2.0,
                alignment: Alignment::Left,
            },
        )
        .unwrap();
    sheet
        .define_base(
            "heading1",
            ResolvedStyle {
                font_size_pt: 18.0,
                space_before_pt: 12.0,
                space_after_pt: 6.0,
                alignment: Alignment::Left,
            },
        )
        .unwrap();
    sheet
        .define_base(
            "heading2",
            ResolvedStyle {
                font_size_pt: 14.0,
                space_before_pt: 12.0,
                space_after_pt: 6.0,
                alignment: Alignment::Left,
            },
        )
        .unwrap();

    sheet
        .derive(
            TITLE_ROLE,
            "heading1",
            StyleOverrides {
                space_before_pt: Some(0.0),
                space_after_pt: Some(30.0),
                alignment: Some(Alignment::Center),
                ..Default::default()
            },
        )
        .unwrap();
    sheet
        .derive(
            SECTION_HEADING_ROLE,
            "heading2",
            StyleOverrides {
                space_after_pt: Some(12.0),
                ..Default::default()
            },
        )
        .unwrap();

    sheet
}

/// A bulleted list rendered as one paragraph with an explicit line per bullet.
fn bullet_list(items: &[&str]) -> Vec<Line> {
    items
        .iter()
        .map(|item| Line::plain(format!("• {item}")))
        .collect()
}

/// A line opening with a bold lead-in followed by regular text.
fn bold_lead(lead: &str, rest: &str) -> Line {
    Line::new(vec![Span::bold(lead), Span::new(rest)])
}

/// Returns the ordered content blocks of the sample resume.
pub fn build_content_script() -> Vec<ContentBlock> {
    let mut blocks = Vec::new();

    // Identity
    blocks.push(ContentBlock::title("John Doe", TITLE_ROLE));
    blocks.push(ContentBlock::text("Software Engineer", BODY_ROLE));
    blocks.push(ContentBlock::text(
        "Email: john.doe@email.com | Phone: (555) 123-4567",
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::spacer(20.0));

    // Summary
    blocks.push(ContentBlock::heading(
        "PROFESSIONAL SUMMARY",
        SECTION_HEADING_ROLE,
    ));
    blocks.push(ContentBlock::text(
        "Experienced software engineer with 4 years of experience in full-stack web development. \
         Proficient in modern web technologies including React, Node.js, and Python. Passionate \
         about creating efficient, scalable solutions and collaborating with cross-functional teams.",
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::spacer(12.0));

    // Experience
    blocks.push(ContentBlock::heading(
        "PROFESSIONAL EXPERIENCE",
        SECTION_HEADING_ROLE,
    ));
    blocks.push(ContentBlock::paragraph(
        vec![bold_lead(
            "Senior Software Engineer",
            " | Tech Company | 2022-Present",
        )],
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::paragraph(
        bullet_list(&[
            "Developed and maintained web applications using React and Node.js",
            "Collaborated with cross-functional teams to deliver high-quality software",
            "Implemented RESTful APIs and database solutions using PostgreSQL",
            "Participated in code reviews and mentored junior developers",
            "Improved application performance by 25% through optimization",
        ]),
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::spacer(8.0));
    blocks.push(ContentBlock::paragraph(
        vec![bold_lead("Software Engineer", " | StartupCorp | 2020-2022")],
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::paragraph(
        bullet_list(&[
            "Built responsive web applications using JavaScript and Python",
            "Worked with PostgreSQL and MongoDB databases",
            "Deployed applications on AWS cloud platform",
            "Implemented automated testing and CI/CD pipelines",
            "Reduced bug reports by 40% through comprehensive testing",
        ]),
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::spacer(12.0));

    // Education
    blocks.push(ContentBlock::heading("EDUCATION", SECTION_HEADING_ROLE));
    blocks.push(ContentBlock::paragraph(
        vec![
            Line::new(vec![Span::bold("Bachelor of Science in Computer Science")]),
            Line::plain("University of Technology | 2020"),
            Line::plain("GPA: 3.8/4.0"),
        ],
        BODY_ROLE,
    ));
    blocks.push(ContentBlock::spacer(12.0));

    // Skills
    blocks.push(ContentBlock::heading(
        "TECHNICAL SKILLS",
        SECTION_HEADING_ROLE,
    ));
    blocks.push(ContentBlock::paragraph(
        vec![
            bold_lead(
                "Programming Languages:",
                " JavaScript, Python, Java, TypeScript",
            ),
            bold_lead("Frontend Technologies:", " React, HTML5, CSS3, Vue.js"),
            bold_lead("Backend Technologies:", " Node.js, Express, Django, Flask"),
            bold_lead("Databases:", " PostgreSQL, MongoDB, MySQL, Redis"),
            bold_lead("Cloud & DevOps:", " AWS, Docker, Kubernetes, Jenkins"),
            bold_lead("Tools:", " Git, JIRA, Slack, VS Code"),
        ],
        BODY_ROLE,
    ));

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::blocks::ContentBlock;

    #[test]
    fn test_script_is_deterministic() {
        assert_eq!(build_content_script(), build_content_script());
    }

    #[test]
    fn test_script_starts_with_title() {
        let blocks = build_content_script();
        assert!(
            matches!(&blocks[0], ContentBlock::Title { text, .. } if text == "John Doe"),
            "first block must be the title"
        );
    }

    #[test]
    fn test_every_role_resolves_against_fixture_sheet() {
        let sheet = resume_style_sheet();
        for block in build_content_script() {
            assert!(
                sheet.resolve(block.role()).is_ok(),
                "role '{}' must resolve",
                block.role()
            );
        }
    }

    #[test]
    fn test_section_headings_in_fixed_order() {
        let headings: Vec<String> = build_content_script()
            .into_iter()
            .filter_map(|b| match b {
                ContentBlock::Heading { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec![
                "PROFESSIONAL SUMMARY",
                "PROFESSIONAL EXPERIENCE",
                "EDUCATION",
                "TECHNICAL SKILLS",
            ]
        );
    }

    #[test]
    fn test_each_heading_followed_by_paragraph() {
        let blocks = build_content_script();
        for (i, block) in blocks.iter().enumerate() {
            if matches!(block, ContentBlock::Heading { .. }) {
                assert!(
                    matches!(blocks.get(i + 1), Some(ContentBlock::Paragraph { .. })),
                    "heading at index {i} must be followed by a paragraph"
                );
            }
        }
    }

    #[test]
    fn test_role_and_degree_lines_open_bold() {
        let blocks = build_content_script();
        let bold_leads: Vec<String> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Paragraph { lines, .. } => Some(lines),
                _ => None,
            })
            .flatten()
            .filter(|line| line.spans.first().is_some_and(|s| s.bold))
            .map(|line| line.spans[0].text.clone())
            .collect();

        assert!(bold_leads.iter().any(|t| t == "Senior Software Engineer"));
        assert!(bold_leads.iter().any(|t| t == "Software Engineer"));
        assert!(bold_leads
            .iter()
            .any(|t| t == "Bachelor of Science in Computer Science"));
    }

    #[test]
    fn test_title_style_centered_with_title_gap() {
        let sheet = resume_style_sheet();
        let title = sheet.resolve(TITLE_ROLE).unwrap();
        assert_eq!(title.font_size_pt, 18.0);
        assert_eq!(title.space_after_pt, 30.0);
        assert_eq!(title.alignment, Alignment::Center);

        let heading = sheet.resolve(SECTION_HEADING_ROLE).unwrap();
        assert_eq!(heading.font_size_pt, 14.0);
        assert_eq!(heading.space_before_pt, 12.0);
        assert_eq!(heading.space_after_pt, 12.0);
    }
}
