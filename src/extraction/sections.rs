// src/extraction/sections.rs
//! Split a markdown resume into named raw sections

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{RawSections, SectionKey};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("heading pattern"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\d{3}\)\s*\d{3}-\d{4}|\b\d{3}[-.]\d{3}[-.]\d{4}\b").expect("phone pattern")
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)*\.\w+").expect("email pattern"));
static PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?linkedin\.com/in/[\w-]+").expect("profile pattern")
});

/// Recognized second-level headings, tried in order for each key.
const SECTION_HEADINGS: &[(SectionKey, &[&str])] = &[
    (
        SectionKey::Bio,
        &["Professional Profile", "Personal Profile", "Profile", "Bio"],
    ),
    (SectionKey::Experience, &["Professional Experience"]),
    (SectionKey::Technical, &["Technical Skills"]),
    (SectionKey::Education, &["Education"]),
    (SectionKey::Languages, &["Languages"]),
    (SectionKey::Strengths, &["Zones of Genius", "Strengths"]),
    (
        SectionKey::ProfessionalDevelopment,
        &["Professional Development", "Courses", "Training"],
    ),
];

const CONTACT_SEPARATOR: &str = " | ";

struct Heading<'a> {
    line: usize,
    level: usize,
    text: &'a str,
}

fn headings<'a>(lines: &[&'a str]) -> Vec<Heading<'a>> {
    lines
        .iter()
        .copied()
        .enumerate()
        .filter_map(|(line, text)| {
            HEADING_RE.captures(text).map(|caps| Heading {
                line,
                level: caps[1].len(),
                text: caps.get(2).map(|m| m.as_str()).unwrap_or_default(),
            })
        })
        .collect()
}

/// Body of the first level-2 heading titled `title`, up to the next heading of
/// level 1 or 2 (or the end of the document).
fn section_body<'a>(lines: &[&'a str], headings: &[Heading<'a>], title: &str) -> Option<String> {
    let position = headings
        .iter()
        .position(|h| h.level == 2 && h.text == title)?;
    let start = headings[position].line + 1;
    let end = headings[position + 1..]
        .iter()
        .find(|h| h.level <= 2)
        .map(|h| h.line)
        .unwrap_or(lines.len());

    Some(lines[start..end].join("\n").trim().to_string())
}

/// Phone, email and profile handle scanned over the whole document, in that order.
fn contact_line(document: &str) -> String {
    [&*PHONE_RE, &*EMAIL_RE, &*PROFILE_RE]
        .iter()
        .filter_map(|re| re.find(document).map(|m| m.as_str()))
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// Extract every recognizable section. Absent sections are simply missing from
/// the result; this never fails.
pub fn extract_sections(document: &str) -> RawSections {
    let lines: Vec<&str> = document.lines().collect();
    let headings = headings(&lines);
    let mut sections = RawSections::new();

    if let Some(name) = headings.iter().find(|h| h.level == 1) {
        sections.insert(SectionKey::Name, name.text.trim());
    }

    if let Some(caps) = BOLD_RE.captures(document) {
        sections.insert(SectionKey::Tagline, caps[1].trim());
    }

    sections.insert(SectionKey::Contact, contact_line(document));

    for (key, titles) in SECTION_HEADINGS {
        if let Some(body) = titles
            .iter()
            .find_map(|title| section_body(&lines, &headings, title))
            .filter(|body| !body.is_empty())
        {
            sections.insert(*key, body);
        }
    }

    debug!(
        "Extracted {} sections: {:?}",
        sections.len(),
        sections.keys().collect::<Vec<_>>()
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "# Jane Doe\n\
**Builds things.**\n\
(555) 123-4567 | jane@example.com | https://www.linkedin.com/in/jane-doe\n\
\n\
## Professional Profile\n\
Operator with a bias for automation. Ships fast.\n\
\n\
## Professional Experience\n\
### Operations Manager\n\
**Acme Corp | 2020 - Present**\n\
- Cut costs by 40%\n\
### Analyst\n\
**Beta LLC | 2018 - 2020**\n\
- Built reports\n\
\n\
## Education\n\
**BSc Economics**\n\
State University\n\
# Appendix\n\
## Languages\n\
- English (Native)\n";

    #[test]
    fn test_name_and_tagline() {
        let sections = extract_sections(RESUME);
        assert_eq!(sections.get(SectionKey::Name), Some("Jane Doe"));
        assert_eq!(sections.get(SectionKey::Tagline), Some("Builds things."));
    }

    #[test]
    fn test_contact_priority_order() {
        let document = "jane@example.com\nlinkedin.com/in/jane\n(555) 123-4567";
        let sections = extract_sections(document);
        assert_eq!(
            sections.get(SectionKey::Contact),
            Some("(555) 123-4567 | jane@example.com | linkedin.com/in/jane")
        );
    }

    #[test]
    fn test_experience_keeps_subheadings_until_next_section() {
        let sections = extract_sections(RESUME);
        let experience = sections.get(SectionKey::Experience).unwrap();
        assert!(experience.starts_with("### Operations Manager"));
        assert!(experience.contains("### Analyst"));
        assert!(!experience.contains("Education"));
    }

    #[test]
    fn test_section_stops_at_higher_level_heading() {
        let sections = extract_sections(RESUME);
        assert_eq!(
            sections.get(SectionKey::Education),
            Some("**BSc Economics**\nState University")
        );
        assert_eq!(sections.get(SectionKey::Languages), Some("- English (Native)"));
    }

    #[test]
    fn test_headings_are_case_sensitive() {
        let sections = extract_sections("## professional experience\n### Job\n- a\n");
        assert!(!sections.contains(SectionKey::Experience));
    }

    #[test]
    fn test_malformed_document_yields_empty_mapping() {
        let sections = extract_sections("just some words\nwithout structure");
        assert!(sections.is_empty());
        assert!(extract_sections("").is_empty());
    }

    #[test]
    fn test_headings_borrow_from_document_lines() {
        let document = String::from("# Jane Doe\ntext\n## Education\n### Detail");
        let lines: Vec<&str> = document.lines().collect();
        let found = headings(&lines);
        drop(lines);

        let summary: Vec<(usize, usize, &str)> =
            found.iter().map(|h| (h.line, h.level, h.text)).collect();
        assert_eq!(
            summary,
            vec![(0, 1, "Jane Doe"), (2, 2, "Education"), (3, 3, "Detail")]
        );
    }

    #[test]
    fn test_empty_section_is_absent() {
        let sections = extract_sections("## Education\n\n## Languages\n- French\n");
        assert!(!sections.contains(SectionKey::Education));
        assert!(sections.contains(SectionKey::Languages));
    }
}
