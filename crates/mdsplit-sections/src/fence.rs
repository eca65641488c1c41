//! Code fence shielding for header detection.
//!
//! Lines inside fenced code blocks never count as headers, so a `# comment`
//! in a shell snippet stays part of the surrounding section body.

/// Tracks code fence state during line-by-line processing.
///
/// Code fences in `CommonMark` can use backticks or tildes (three or more).
/// The closing fence must use the same character and be at least as long
/// as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Update fence state based on a line.
    ///
    /// Returns `true` if the line is a fence marker (opening or closing).
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return true;
            }
            false
        } else if let Some((ch, len)) = detect_fence(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
            true
        } else {
            false
        }
    }
}

/// Detect if a line opens a code fence.
///
/// Returns the fence character and length if found. A backtick fence's
/// info string may not contain backticks, so ```` ```x``` ```` is inline
/// code rather than an opener.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    if count < 3 || (first == '`' && trimmed[count..].contains('`')) {
        return None;
    }
    Some((first, count))
}

/// Check if a line is a valid closing fence.
///
/// The closing fence must:
/// - Use the same character as opening
/// - Be at least as long as opening
/// - Contain only fence characters (optionally followed by whitespace)
fn is_closing_fence(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected_char) {
        return false;
    }

    // Fence characters are ASCII, so the count doubles as a byte offset.
    let count = trimmed.chars().take_while(|&c| c == expected_char).count();
    if count < min_len {
        return false;
    }

    trimmed[count..].chars().all(char::is_whitespace)
}

/// Per-line shielding decision for a whole document.
///
/// Line `n` is shielded when it lies strictly between an opening fence and
/// its closing fence. Fence marker lines themselves are not shielded, but
/// they can never qualify as headers either. An unterminated fence shields
/// every remaining line.
///
/// Lines are numbered from zero and split on `\n`, matching
/// [`str::split_inclusive`].
///
/// # Example
///
/// ```
/// use mdsplit_sections::FenceShield;
///
/// let shield = FenceShield::new("# Title\n```\n# comment\n```\n");
/// assert!(!shield.is_shielded(0));
/// assert!(shield.is_shielded(2));
/// assert!(!shield.is_shielded(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceShield {
    shielded: Vec<bool>,
}

impl FenceShield {
    /// Compute the shielding decision for every line of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut tracker = FenceTracker::new();
        let shielded = text
            .split_inclusive('\n')
            .map(|line| {
                let inside = tracker.in_fence();
                let is_marker = tracker.update(line);
                // A closing marker was inside before the update, but it is
                // the fence boundary rather than fenced content.
                inside && !is_marker
            })
            .collect();

        Self { shielded }
    }

    /// Whether the zero-based line `line` is inside a fenced code block.
    ///
    /// Lines past the end of the document are reported as unshielded.
    #[must_use]
    pub fn is_shielded(&self, line: usize) -> bool {
        self.shielded.get(line).copied().unwrap_or(false)
    }

    /// Number of lines the shield covers.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.shielded.len()
    }

    /// Number of shielded lines.
    #[must_use]
    pub fn shielded_count(&self) -> usize {
        self.shielded.iter().filter(|&&s| s).count()
    }
}
