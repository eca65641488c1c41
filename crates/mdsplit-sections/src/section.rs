//! Section types produced by [`split`](crate::split).
//!
//! A [`Section`] is one header plus the body text it owns, annotated with
//! the headers above it ([`Parents`]) and the headers beside it (siblings).
//!
//! With the `serde` feature enabled, sections serialize to:
//!
//! ```json
//! {
//!   "section_header": "Getting Started",
//!   "section_text": "First steps here.",
//!   "header_level": 2,
//!   "metadata": {
//!     "parents": { "h1": "Introduction" },
//!     "siblings": ["Advanced Topics"]
//!   }
//! }
//! ```

use std::fmt;

/// Format a header level as its label (`1` → `h1`).
#[must_use]
pub fn level_label(level: usize) -> String {
    format!("h{level}")
}

/// Parse a level label (`h2` → `2`).
///
/// Returns `None` for anything that is not `h` followed by a positive
/// decimal number.
#[must_use]
pub fn parse_level_label(label: &str) -> Option<usize> {
    let digits = label.strip_prefix('h')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&level| level > 0)
}

/// Ancestor headers of a section, keyed by level.
///
/// Entries are kept in ascending level order. Levels may be sparse when the
/// document skips levels (`#` followed directly by `###`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Parents {
    entries: Vec<(usize, String)>,
}

impl Parents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the ancestor title at `level`, keeping level order.
    pub fn insert(&mut self, level: usize, title: impl Into<String>) {
        let title = title.into();
        match self.entries.binary_search_by_key(&level, |(l, _)| *l) {
            Ok(idx) => self.entries[idx].1 = title,
            Err(idx) => self.entries.insert(idx, (level, title)),
        }
    }

    /// Ancestor title at `level`, if one is open.
    #[must_use]
    pub fn get(&self, level: usize) -> Option<&str> {
        self.entries
            .binary_search_by_key(&level, |(l, _)| *l)
            .ok()
            .map(|idx| self.entries[idx].1.as_str())
    }

    /// Iterate `(level, title)` pairs from the outermost ancestor inwards.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(|(l, t)| (*l, t.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for Parents {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        let mut parents = Self::new();
        for (level, title) in iter {
            parents.insert(level, title);
        }
        parents
    }
}

/// Hierarchy metadata attached to a section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionMetadata {
    /// Open ancestor headers at the time this header appeared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parents: Parents,
    /// Titles of other headers at the same level with identical parents,
    /// in document order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub siblings: Vec<String>,
}

/// One header of the document and the body text it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Header title without `#` markup.
    pub section_header: String,
    /// Body text up to the next header, outer whitespace trimmed.
    pub section_text: String,
    /// Number of `#` characters in the header.
    pub header_level: usize,
    /// Parent and sibling relationships.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: SectionMetadata,
}

impl Section {
    #[must_use]
    pub fn parents(&self) -> &Parents {
        &self.metadata.parents
    }

    #[must_use]
    pub fn siblings(&self) -> &[String] {
        &self.metadata.siblings
    }

    /// Render the section back to markdown.
    ///
    /// ```
    /// use mdsplit_sections::split;
    ///
    /// let sections = split("## Setup\nRun it.\n");
    /// assert_eq!(sections[0].to_markdown(), "## Setup\n\nRun it.");
    /// ```
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(
            "{} {}\n\n{}",
            "#".repeat(self.header_level),
            self.section_header,
            self.section_text
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Parents, level_label, parse_level_label};

    impl Serialize for Parents {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (level, title) in self.iter() {
                map.serialize_entry(&level_label(level), title)?;
            }
            map.end()
        }
    }

    impl<'de> Deserialize<'de> for Parents {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(ParentsVisitor)
        }
    }

    struct ParentsVisitor;

    impl<'de> Visitor<'de> for ParentsVisitor {
        type Value = Parents;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of level labels (h1, h2, ...) to header titles")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Parents, A::Error> {
            let mut parents = Parents::new();
            while let Some((label, title)) = access.next_entry::<String, String>()? {
                let level = parse_level_label(&label).ok_or_else(|| {
                    de::Error::invalid_value(de::Unexpected::Str(&label), &"a level label like h1")
                })?;
                parents.insert(level, title);
            }
            Ok(parents)
        }
    }
}
