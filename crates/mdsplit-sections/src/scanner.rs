//! ATX header detection.
//!
//! Walks the document line by line, skipping lines shielded by a code fence,
//! and records every `#` header together with the byte span of the body text
//! it owns.

use std::ops::Range;

use crate::fence::FenceShield;

/// A header found by [`scan_headers`], before hierarchy metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    /// Number of leading `#` characters (1 or more, unbounded).
    pub level: usize,
    /// Header text without markup.
    pub title: String,
    /// Zero-based line number of the header line.
    pub line: usize,
    /// Byte offset where the body starts (just after the header line).
    pub start_offset: usize,
    /// Byte offset where the body ends (the next header line or end of text).
    pub end_offset: usize,
}

impl RawHeader {
    /// Body span as a byte range into the scanned text.
    #[must_use]
    pub fn body_range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}

/// Scan `text` for headers, ignoring lines the `shield` marks as fenced.
///
/// Text before the first header is not attributed to any header. Headers are
/// returned in document order, and consecutive body spans tile the document
/// from the first header to the end.
///
/// # Example
///
/// ```
/// use mdsplit_sections::{FenceShield, scan_headers};
///
/// let text = "# Intro\nHello\n## Details\n";
/// let headers = scan_headers(text, &FenceShield::new(text));
///
/// assert_eq!(headers.len(), 2);
/// assert_eq!(headers[0].title, "Intro");
/// assert_eq!(&text[headers[0].body_range()], "Hello\n");
/// ```
#[must_use]
pub fn scan_headers(text: &str, shield: &FenceShield) -> Vec<RawHeader> {
    let mut headers: Vec<RawHeader> = Vec::new();
    let mut offset = 0;

    for (line_no, line) in text.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += line.len();

        if shield.is_shielded(line_no) {
            continue;
        }

        let Some((level, title)) = parse_header_line(line) else {
            continue;
        };

        // The previous header's body stops where this header line begins.
        if let Some(prev) = headers.last_mut() {
            prev.end_offset = line_start;
        }

        headers.push(RawHeader {
            level,
            title: title.to_owned(),
            line: line_no,
            start_offset: offset,
            end_offset: text.len(),
        });
    }

    headers
}

/// Parse a single line as an ATX header.
///
/// A header is one or more `#` at column 0, at least one whitespace
/// character, then non-empty text. A closing `#` run is dropped when it is
/// separated from the title by whitespace.
///
/// Returns the level and the cleaned title.
pub(crate) fn parse_header_line(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_end_matches(['\n', '\r']);

    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 {
        return None;
    }

    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let title = strip_closing_sequence(rest.trim());
    if title.is_empty() {
        return None;
    }

    Some((level, title))
}

/// Remove an optional closing `#` sequence from an already trimmed title.
fn strip_closing_sequence(title: &str) -> &str {
    let without_hashes = title.trim_end_matches('#');
    if without_hashes.len() == title.len() {
        return title;
    }

    // A run of only `#` is a closing sequence with nothing before it.
    if without_hashes.is_empty() {
        return without_hashes;
    }

    // `C#` keeps its hash; `Title ##` loses the closing run.
    if without_hashes.ends_with(char::is_whitespace) {
        without_hashes.trim_end()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scan(text: &str) -> Vec<RawHeader> {
        scan_headers(text, &FenceShield::new(text))
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!(parse_header_line("# One"), Some((1, "One")));
        assert_eq!(parse_header_line("### Three\n"), Some((3, "Three")));
        assert_eq!(parse_header_line("######## Eight"), Some((8, "Eight")));
    }

    #[test]
    fn test_parse_requires_whitespace_after_hashes() {
        assert_eq!(parse_header_line("#hashtag"), None);
        assert_eq!(parse_header_line("##"), None);
        assert_eq!(parse_header_line("#\tTabbed"), Some((1, "Tabbed")));
    }

    #[test]
    fn test_parse_requires_non_empty_title() {
        assert_eq!(parse_header_line("#   "), None);
        assert_eq!(parse_header_line("# \n"), None);
        assert_eq!(parse_header_line("## ##"), None);
    }

    #[test]
    fn test_parse_rejects_indented_hashes() {
        assert_eq!(parse_header_line(" # Indented"), None);
        assert_eq!(parse_header_line("text # not header"), None);
    }

    #[test]
    fn test_parse_strips_closing_sequence() {
        assert_eq!(parse_header_line("## Title ##"), Some((2, "Title")));
        assert_eq!(parse_header_line("# Title #   "), Some((1, "Title")));
        assert_eq!(parse_header_line("# Learn C#"), Some((1, "Learn C#")));
    }

    #[test]
    fn test_parse_trims_title_and_crlf() {
        assert_eq!(parse_header_line("#   Spaced   \r\n"), Some((1, "Spaced")));
    }

    #[test]
    fn test_parse_non_ascii_title() {
        assert_eq!(parse_header_line("## Überblick"), Some((2, "Überblick")));
    }

    #[test]
    fn test_scan_offsets_tile_document() {
        let text = "preamble\n# A\nbody a\n## B\nbody b";
        let headers = scan(text);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].line, 1);
        assert_eq!(&text[headers[0].body_range()], "body a\n");
        assert_eq!(headers[1].line, 3);
        assert_eq!(&text[headers[1].body_range()], "body b");
        assert_eq!(headers[1].end_offset, text.len());
    }

    #[test]
    fn test_scan_header_without_trailing_newline() {
        let text = "# Last";
        let headers = scan(text);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].start_offset, text.len());
        assert_eq!(headers[0].end_offset, text.len());
    }

    #[test]
    fn test_scan_skips_fenced_lines() {
        let text = "# Real\n```\n# fake\n```\n";
        let headers = scan(text);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].title, "Real");
        assert_eq!(&text[headers[0].body_range()], "```\n# fake\n```\n");
    }

    #[test]
    fn test_scan_no_headers() {
        assert!(scan("").is_empty());
        assert!(scan("just text\n#nospace\n").is_empty());
    }

    #[test]
    fn test_scan_start_offsets_are_ordered() {
        let text = "# a\n# b\n\n# c\n";
        let headers = scan(text);

        assert!(
            headers
                .windows(2)
                .all(|w| w[0].start_offset <= w[1].start_offset)
        );
        assert!(headers.iter().all(|h| h.start_offset <= h.end_offset));
    }
}
