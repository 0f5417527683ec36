// Fixture document assembly: ordered content blocks with named style roles,
// laid out into a paginated PDF artifact.

pub mod blocks;
pub mod metrics;
pub mod render;
pub mod script;
pub mod styles;

// Re-export the public API consumed by the fixture binary and the tests.
pub use blocks::{ContentBlock, Document, Line, Span};
pub use metrics::{letter_page_config, PageConfig};
pub use render::render;
pub use script::{build_content_script, resume_style_sheet};
pub use styles::{Alignment, ResolvedStyle, StyleOverrides, StyleSheet};
