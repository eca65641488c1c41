//! End-to-end behaviour of `split` on whole documents.

use mdsplit_sections::{Section, split};
use pretty_assertions::assert_eq;

const BASIC_MARKDOWN: &str = "# Introduction
Welcome to the guide.

## Getting Started
First steps here.

## Advanced Topics
Advanced content here.";

const NESTED_MARKDOWN: &str = "# Main
Content

## Section A
A content

### Subsection A1
A1 content

## Section B
B content";

const CODE_BLOCK_MARKDOWN: &str = "# Real Header
Some content

```python
# This is a comment, not a header
print(\"hello\")
```

More content.
";

const API_DOCS: &str = "
# API Documentation

This is the main API documentation.

## Authentication
All API requests require authentication.

### API Keys
Use API keys for authentication.

### OAuth2
OAuth2 is also supported.

## Endpoints

### Users
User management endpoints.

#### GET /users
Retrieve all users.

#### POST /users
Create a new user.

### Projects
Project management endpoints.

#### GET /projects
List all projects.

## Rate Limits
API rate limits apply.
";

fn find<'a>(sections: &'a [Section], header: &str) -> &'a Section {
    sections
        .iter()
        .find(|s| s.section_header == header)
        .unwrap_or_else(|| panic!("no section {header:?}"))
}

fn parents(section: &Section) -> Vec<(usize, &str)> {
    section.parents().iter().collect()
}

#[test]
fn test_headerless_input() {
    assert!(split("").is_empty());
    assert!(split("no headers here").is_empty());
    assert!(split("#hashtag only\n\n    # indented\n").is_empty());
}

#[test]
fn test_basic_hierarchy() {
    let sections = split("# A\n\n## B\n\n## C\n");

    assert_eq!(sections.len(), 3);
    assert!(sections[0].parents().is_empty());
    assert!(sections[0].siblings().is_empty());
    assert_eq!(parents(&sections[1]), vec![(1, "A")]);
    assert_eq!(parents(&sections[2]), vec![(1, "A")]);
    assert_eq!(sections[1].siblings(), ["C"]);
    assert_eq!(sections[2].siblings(), ["B"]);
}

#[test]
fn test_basic_document_text() {
    let sections = split(BASIC_MARKDOWN);

    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].section_header, "Introduction");
    assert_eq!(sections[0].section_text, "Welcome to the guide.");
    assert_eq!(sections[0].header_level, 1);
    assert_eq!(sections[1].section_header, "Getting Started");
    assert_eq!(sections[1].header_level, 2);
    assert_eq!(parents(&sections[1]), vec![(1, "Introduction")]);
    assert_eq!(sections[1].siblings(), ["Advanced Topics"]);
    assert_eq!(sections[2].section_text, "Advanced content here.");
}

#[test]
fn test_nested_headers() {
    let sections = split(NESTED_MARKDOWN);

    let sub = find(&sections, "Subsection A1");
    assert_eq!(sub.header_level, 3);
    assert_eq!(parents(sub), vec![(1, "Main"), (2, "Section A")]);

    let b = find(&sections, "Section B");
    assert_eq!(parents(b), vec![(1, "Main")]);
    assert_eq!(b.siblings(), ["Section A"]);
}

#[test]
fn test_level_skip_has_no_gap_key() {
    let sections = split("# A\n\n### D\n");

    assert_eq!(parents(&sections[1]), vec![(1, "A")]);
    assert_eq!(sections[1].parents().get(2), None);
}

#[test]
fn test_siblings_exclusive_across_parents() {
    let sections = split("# A\n## X\n# B\n## Y\n");

    assert!(find(&sections, "X").siblings().is_empty());
    assert!(find(&sections, "Y").siblings().is_empty());
    assert_eq!(find(&sections, "A").siblings(), ["B"]);
}

#[test]
fn test_fence_immunity() {
    let sections = split("# Real\nbody\n```\n# fake\n```\n");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section_header, "Real");
    assert_eq!(sections[0].section_text, "body\n```\n# fake\n```");
}

#[test]
fn test_code_block_content_stays_in_body() {
    let sections = split(CODE_BLOCK_MARKDOWN);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section_header, "Real Header");
    assert!(sections[0].section_text.contains("Some content"));
    assert!(sections[0].section_text.contains("# This is a comment"));
    assert!(sections[0].section_text.contains("More content."));
}

#[test]
fn test_tilde_fence_immunity() {
    let sections = split("# Real\n~~~\n# fake\n~~~\n## After\n");

    let headers: Vec<&str> = sections.iter().map(|s| s.section_header.as_str()).collect();
    assert_eq!(headers, vec!["Real", "After"]);
}

#[test]
fn test_unterminated_fence_only() {
    assert!(split("```\n# one\n## two\n").is_empty());
}

#[test]
fn test_unterminated_fence_swallows_rest() {
    let sections = split("# Before\n```\n# inside\n## also inside\n");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section_text, "```\n# inside\n## also inside");
}

#[test]
fn test_inline_triple_backticks_do_not_open_fence() {
    let sections = split("# A\n```x``` inline\n# B\nbody\n");

    let headers: Vec<&str> = sections.iter().map(|s| s.section_header.as_str()).collect();
    assert_eq!(headers, vec!["A", "B"]);
    assert_eq!(sections[0].section_text, "```x``` inline");
}

#[test]
fn test_no_preamble_leakage() {
    let sections = split("PREAMBLE line\n\n# First\nbody\n## Second\nmore\n");

    assert_eq!(sections.len(), 2);
    assert!(
        sections
            .iter()
            .all(|s| !s.section_text.contains("PREAMBLE"))
    );
}

#[test]
fn test_deterministic() {
    assert_eq!(split(API_DOCS), split(API_DOCS));
}

#[test]
fn test_api_documentation_structure() {
    let sections = split(API_DOCS);

    assert_eq!(sections.len(), 11);

    let post_users = find(&sections, "POST /users");
    assert_eq!(
        parents(post_users),
        vec![(1, "API Documentation"), (2, "Endpoints"), (3, "Users")]
    );
    assert_eq!(post_users.siblings(), ["GET /users"]);

    let get_projects = find(&sections, "GET /projects");
    assert!(get_projects.siblings().is_empty());

    let endpoints = find(&sections, "Endpoints");
    assert_eq!(endpoints.section_text, "");
    assert_eq!(endpoints.siblings(), ["Authentication", "Rate Limits"]);
}

#[test]
fn test_round_trip_preserves_structure() {
    let sections = split(API_DOCS);

    let rebuilt = sections
        .iter()
        .map(Section::to_markdown)
        .collect::<Vec<_>>()
        .join("\n\n");

    assert_eq!(split(&rebuilt), sections);
}

#[test]
fn test_crlf_document() {
    let sections = split("# A\r\nbody\r\n## B\r\nmore\r\n");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].section_header, "A");
    assert_eq!(sections[0].section_text, "body");
    assert_eq!(sections[1].section_header, "B");
}

#[test]
fn test_deep_levels_beyond_six() {
    let sections = split("###### Six\n####### Seven\n");

    assert_eq!(sections[1].header_level, 7);
    assert_eq!(parents(&sections[1]), vec![(6, "Six")]);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_output() {
    let sections = split("# A\n\n## B\n\n## C\n");

    let json = serde_json::to_value(&sections).unwrap();

    assert_eq!(
        json[1],
        serde_json::json!({
            "section_header": "B",
            "section_text": "",
            "header_level": 2,
            "metadata": {"parents": {"h1": "A"}, "siblings": ["C"]}
        })
    );
}
