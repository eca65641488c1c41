//! Split markdown documents into hierarchical sections.
//!
//! [`split`] turns a document into one [`Section`] per ATX header (`#`,
//! `##`, ...), each carrying the body text up to the next header together
//! with its ancestor headers and its siblings.
//!
//! # Pipeline
//!
//! 1. [`FenceShield`] marks lines inside fenced code blocks.
//! 2. [`scan_headers`] finds header lines outside fences and the body span
//!    each one owns.
//! 3. [`build_sections`] derives parents from an ancestor stack, then
//!    siblings in a second pass.
//!
//! Only headers and code fences are interpreted. Text before the first
//! header is discarded, and a document without headers yields no sections.
//!
//! # Example
//!
//! ```
//! use mdsplit_sections::split;
//!
//! let sections = split("# A\n\n## B\n\n## C\n");
//!
//! assert_eq!(sections.len(), 3);
//! assert_eq!(sections[1].parents().get(1), Some("A"));
//! assert_eq!(sections[1].siblings(), ["C"]);
//! ```

mod fence;
mod hierarchy;
mod scanner;
mod section;

pub use fence::FenceShield;
pub use hierarchy::build_sections;
pub use scanner::{RawHeader, scan_headers};
pub use section::{Parents, Section, SectionMetadata, level_label, parse_level_label};

/// Error for input that cannot be treated as text.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

/// Split a markdown document into sections.
///
/// Never fails: malformed markdown degrades to fewer sections, and empty or
/// headerless input yields an empty list.
#[must_use]
pub fn split(text: &str) -> Vec<Section> {
    let shield = FenceShield::new(text);
    let headers = scan_headers(text, &shield);
    let sections = build_sections(text, &headers);

    tracing::debug!(
        bytes = text.len(),
        shielded_lines = shield.shielded_count(),
        sections = sections.len(),
        "Split markdown document"
    );

    sections
}

/// Split raw bytes, rejecting input that is not UTF-8 text.
///
/// # Errors
///
/// Returns [`InputError::NotUtf8`] if `bytes` is not valid UTF-8.
pub fn split_bytes(bytes: &[u8]) -> Result<Vec<Section>, InputError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(split(text))
}
