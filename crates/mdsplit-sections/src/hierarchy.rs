//! Hierarchy construction from scanned headers.
//!
//! Parents come from a stack of open headers: each new header first closes
//! every open header at its own level or deeper, and whatever remains is its
//! ancestor chain. Siblings need the parents of headers that may appear
//! later in the document, so they are computed in a second pass over the
//! finished list.

use crate::scanner::RawHeader;
use crate::section::{Parents, Section, SectionMetadata};

/// Build the final section list for `text` from its scanned `headers`.
///
/// `headers` must come from scanning the same `text`; their body spans are
/// used to slice the section bodies.
#[must_use]
pub fn build_sections(text: &str, headers: &[RawHeader]) -> Vec<Section> {
    let mut sections = assign_parents(text, headers);
    assign_siblings(&mut sections);
    sections
}

/// First pass: walk headers with the ancestor stack and emit provisional
/// sections with parents but no siblings.
fn assign_parents(text: &str, headers: &[RawHeader]) -> Vec<Section> {
    let mut stack: Vec<(usize, &str)> = Vec::new();

    headers
        .iter()
        .map(|header| {
            while stack.last().is_some_and(|&(level, _)| level >= header.level) {
                stack.pop();
            }

            let parents: Parents = stack.iter().copied().collect();
            stack.push((header.level, header.title.as_str()));

            Section {
                section_header: header.title.clone(),
                section_text: text[header.body_range()].trim().to_owned(),
                header_level: header.level,
                metadata: SectionMetadata {
                    parents,
                    siblings: Vec::new(),
                },
            }
        })
        .collect()
}

/// Second pass: a sibling shares both the level and the full parent chain.
fn assign_siblings(sections: &mut [Section]) {
    let siblings: Vec<Vec<String>> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            sections
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i
                        && other.header_level == section.header_level
                        && other.metadata.parents == section.metadata.parents
                })
                .map(|(_, other)| other.section_header.clone())
                .collect()
        })
        .collect();

    for (section, siblings) in sections.iter_mut().zip(siblings) {
        section.metadata.siblings = siblings;
    }
}
