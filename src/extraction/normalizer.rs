// src/extraction/normalizer.rs
//! Turn raw section spans into clean scalar fields and record lists

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::core::{FitterConfig, LinkStyle, TaglineStyle, FALLBACK, PARAGRAPH_BREAK};
use crate::types::{
    Education, ExperienceEntry, Language, NormalizedFields, RawSections, SectionKey, Strength,
    TechnicalGroup,
};

static CONTACT_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[|•]\s*").expect("contact separator pattern"));
static BIO_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)-\s+([^:]+:)").expect("bio label pattern"));
static STRAY_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s-\s").expect("stray dash pattern"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence end pattern"));
static BOLD_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold span pattern"));
static HEADING_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)#{1,6}\s+").expect("heading marker pattern"));
static UNDERSCORE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\W)_+(\S)").expect("underscore open pattern"));
static UNDERSCORE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)_+(\W|$)").expect("underscore close pattern"));

const LIST_MARKER: &str = "- ";
const SENTENCES_PER_PARAGRAPH: usize = 2;
const MAX_BIO_PARAGRAPHS: usize = 2;
const MAX_STRENGTHS: usize = 2;
const MAX_STRENGTH_DESCRIPTION: usize = 200;
const MAX_LANGUAGES: usize = 3;
const MAX_PROFESSIONAL_DEVELOPMENT: usize = 5;

// ===== Text Helpers =====

/// Heading markers, `*` emphasis and word-edge `_` emphasis removed, whitespace
/// collapsed. Underscores inside words (`snake_case`, `first_last@`) are kept.
fn clean_markup(text: &str) -> String {
    let text = HEADING_MARKER_RE.replace_all(text, "${1}");
    let text = text.replace('*', "");
    let text = UNDERSCORE_OPEN_RE.replace_all(&text, "${1}${2}");
    let text = UNDERSCORE_CLOSE_RE.replace_all(&text, "${1}${2}");
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

fn list_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(LIST_MARKER))
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// `_text_` or `*text*` on its own line.
fn is_italic_line(line: &str) -> bool {
    let single_star = line.starts_with('*') && !line.starts_with("**") && line.ends_with('*');
    let underscore = line.starts_with('_') && line.ends_with('_');
    line.len() > 1 && (single_star || underscore)
}

fn is_bold_line(line: &str) -> bool {
    line.len() > 4 && line.starts_with("**") && line.ends_with("**")
}

fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Missing and present-but-unparseable sections both get the fallback, so no
/// region renders blank. The key is recorded in `defaulted` either way.
fn or_fallback<T: Blank>(
    key: SectionKey,
    parsed: Option<T>,
    defaulted: &mut Vec<SectionKey>,
    fallback: impl FnOnce() -> T,
) -> T {
    match parsed {
        Some(value) if !value.is_blank() => value,
        _ => {
            defaulted.push(key);
            fallback()
        }
    }
}

// ===== Normalizer =====

/// Per-section cleanup. Styles are fixed per instance so every call site of one
/// processor formats contact parts and taglines the same way.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tagline_style: TaglineStyle,
    link_style: LinkStyle,
    max_jobs: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&FitterConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &FitterConfig) -> Self {
        Self {
            tagline_style: config.tagline_style,
            link_style: config.link_style,
            max_jobs: config.max_jobs,
        }
    }

    pub fn normalize(&self, sections: &RawSections) -> NormalizedFields {
        let mut defaulted = Vec::new();
        let parse = |key: SectionKey| sections.get(key);

        let name = or_fallback(
            SectionKey::Name,
            parse(SectionKey::Name).map(|raw| self.name(raw)),
            &mut defaulted,
            || FALLBACK.name.to_string(),
        );
        let tagline = or_fallback(
            SectionKey::Tagline,
            parse(SectionKey::Tagline).map(|raw| self.tagline(raw)),
            &mut defaulted,
            || self.tagline(FALLBACK.tagline),
        );
        let contact_parts = or_fallback(
            SectionKey::Contact,
            parse(SectionKey::Contact).map(|raw| self.contact_parts(raw)),
            &mut defaulted,
            || {
                FALLBACK
                    .contact_parts
                    .iter()
                    .map(|part| self.contact_part(part))
                    .collect()
            },
        );
        let bio = or_fallback(
            SectionKey::Bio,
            parse(SectionKey::Bio).map(|raw| self.bio(raw)),
            &mut defaulted,
            || FALLBACK.bio.to_string(),
        );
        let experiences = or_fallback(
            SectionKey::Experience,
            parse(SectionKey::Experience).map(|raw| self.experiences(raw)),
            &mut defaulted,
            Vec::new,
        );
        let technical = or_fallback(
            SectionKey::Technical,
            parse(SectionKey::Technical).map(|raw| self.technical(raw)),
            &mut defaulted,
            || FALLBACK.technical(),
        );
        let education = or_fallback(
            SectionKey::Education,
            parse(SectionKey::Education).map(|raw| self.education(raw)),
            &mut defaulted,
            || FALLBACK.education(),
        );
        let languages = or_fallback(
            SectionKey::Languages,
            parse(SectionKey::Languages).map(|raw| self.languages(raw)),
            &mut defaulted,
            || FALLBACK.languages(),
        );
        let strengths = or_fallback(
            SectionKey::Strengths,
            parse(SectionKey::Strengths).map(|raw| self.strengths(raw)),
            &mut defaulted,
            || FALLBACK.strengths(),
        );
        let professional_development = or_fallback(
            SectionKey::ProfessionalDevelopment,
            parse(SectionKey::ProfessionalDevelopment)
                .map(|raw| self.professional_development(raw)),
            &mut defaulted,
            || FALLBACK.professional_development(),
        );
        defaulted.sort();

        let fields = NormalizedFields {
            name,
            tagline,
            contact_parts,
            bio,
            strengths,
            education,
            languages,
            technical,
            experiences,
            professional_development,
            defaulted,
        };

        if !fields.defaulted.is_empty() {
            info!("Applied fallback content for: {:?}", fields.defaulted);
        }
        debug!(
            "Normalized {} experiences, {} strengths, {} education entries",
            fields.experiences.len(),
            fields.strengths.len(),
            fields.education.len()
        );

        fields
    }

    pub fn name(&self, raw: &str) -> String {
        clean_markup(raw).to_uppercase()
    }

    pub fn tagline(&self, raw: &str) -> String {
        let clean = clean_markup(raw);
        match self.tagline_style {
            TaglineStyle::Bare => clean.strip_suffix('.').unwrap_or(&clean).trim_end().to_string(),
            TaglineStyle::Sentence => {
                if clean.is_empty() || clean.ends_with(['.', '!', '?']) {
                    clean
                } else {
                    format!("{}.", clean)
                }
            }
        }
    }

    pub fn contact_parts(&self, raw: &str) -> Vec<String> {
        CONTACT_SPLIT_RE
            .split(raw)
            .map(|part| self.contact_part(part.trim()))
            .filter(|part| !part.is_empty())
            .collect()
    }

    fn contact_part(&self, part: &str) -> String {
        let bare = part
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.");
        let is_link = !bare.contains('@') && bare.contains('/');

        match self.link_style {
            LinkStyle::Www if is_link => format!("www.{}", bare),
            _ => bare.to_string(),
        }
    }

    /// Sentences grouped two per paragraph, at most two paragraphs.
    pub fn bio(&self, raw: &str) -> String {
        let flat = clean_markup(raw);
        let labels = BIO_LABEL_RE.replace_all(&flat, "$1$2");
        let clean = STRAY_DASH_RE.replace_all(&labels, " ");

        let sentences: Vec<&str> = SENTENCE_END_RE
            .split(&clean)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        sentences
            .chunks(SENTENCES_PER_PARAGRAPH)
            .take(MAX_BIO_PARAGRAPHS)
            .map(|group| format!("{}.", group.join(". ")))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }

    /// Jobs in document order; blocks without a title are skipped.
    pub fn experiences(&self, raw: &str) -> Vec<ExperienceEntry> {
        let mut blocks: Vec<Vec<&str>> = Vec::new();
        for line in raw.lines() {
            let trimmed = line.trim();
            if let Some(heading) = trimmed.strip_prefix("###") {
                blocks.push(vec![heading.trim_start_matches('#').trim()]);
            } else if let Some(block) = blocks.last_mut() {
                block.push(trimmed);
            }
        }

        let total = blocks.len();
        let jobs: Vec<ExperienceEntry> = blocks
            .iter()
            .filter_map(|block| parse_job(block))
            .take(self.max_jobs)
            .collect();

        debug!("Parsed {} of {} experience blocks", jobs.len(), total);
        jobs
    }

    pub fn technical(&self, raw: &str) -> Vec<TechnicalGroup> {
        let tools: Vec<String> = list_items(raw)
            .map(|item| {
                clean_markup(item).trim_end_matches(':').trim().to_string()
            })
            .filter(|tool| !tool.is_empty())
            .collect();

        if tools.is_empty() {
            return Vec::new();
        }
        vec![TechnicalGroup {
            title: FALLBACK.technical_title.to_string(),
            skills: tools,
        }]
    }

    /// Bold degree line paired with the next plain (non-italic, non-footnote) line.
    pub fn education(&self, raw: &str) -> Vec<Education> {
        let mut entries = Vec::new();
        let mut degree: Option<String> = None;

        for line in raw.lines() {
            let line = line.trim();
            let line = line.strip_prefix(LIST_MARKER).unwrap_or(line).trim();
            if line.is_empty() {
                continue;
            }

            if is_bold_line(line) {
                if let Some(previous) = degree.take() {
                    entries.push(Education {
                        degree: previous,
                        institution: String::new(),
                    });
                }
                degree = Some(clean_markup(line));
            } else if line.starts_with('_') || line.starts_with('*') {
                continue;
            } else if let Some(current) = degree.take() {
                entries.push(Education {
                    degree: current,
                    institution: clean_markup(line),
                });
            }
        }

        if let Some(current) = degree {
            entries.push(Education {
                degree: current,
                institution: String::new(),
            });
        }
        entries
    }

    pub fn languages(&self, raw: &str) -> Vec<Language> {
        list_items(raw)
            .map(|item| {
                let item = clean_markup(item);
                match item.split_once('(') {
                    Some((name, rest)) if rest.contains(')') => Language {
                        name: name.trim().to_uppercase(),
                        level: rest.replace(')', "").trim().to_string(),
                    },
                    _ => Language {
                        name: item.trim().to_uppercase(),
                        level: String::new(),
                    },
                }
            })
            .take(MAX_LANGUAGES)
            .collect()
    }

    /// `- **Title** description` items; following plain lines extend the description.
    pub fn strengths(&self, raw: &str) -> Vec<Strength> {
        let mut strengths: Vec<Strength> = Vec::new();

        for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.starts_with("- **") {
                if let Some(caps) = BOLD_SPAN_RE.captures(line) {
                    let title = clean_markup(&caps[1]).trim_end_matches(':').trim().to_uppercase();
                    let tail = &line[caps.get(0).map(|m| m.end()).unwrap_or(line.len())..];
                    let description = tail
                        .trim()
                        .trim_start_matches([':', '-', '–'])
                        .trim()
                        .trim_end_matches(':');
                    strengths.push(Strength {
                        title,
                        description: description.to_string(),
                    });
                }
            } else if let Some(current) = strengths.last_mut() {
                current.description.push(' ');
                current.description.push_str(line);
            }
        }

        strengths
            .into_iter()
            .take(MAX_STRENGTHS)
            .map(|mut strength| {
                let clean = clean_markup(&strength.description);
                strength.description = clamp_chars(&clean, MAX_STRENGTH_DESCRIPTION);
                strength
            })
            .collect()
    }

    pub fn professional_development(&self, raw: &str) -> Vec<String> {
        list_items(raw)
            .map(clean_markup)
            .filter(|item| !item.is_empty())
            .take(MAX_PROFESSIONAL_DEVELOPMENT)
            .collect()
    }
}

/// One `###` block: title line, company/dates line, italic date line, bullets.
fn parse_job(lines: &[&str]) -> Option<ExperienceEntry> {
    let (heading, rest) = lines.split_first()?;
    let title = clean_markup(heading);
    if title.is_empty() {
        return None;
    }

    let mut company = String::new();
    let mut dates = String::new();
    let mut achievements = Vec::new();

    for line in rest.iter().copied().filter(|l| !l.is_empty()) {
        if let Some(bullet) = line.strip_prefix(LIST_MARKER) {
            let achievement = clean_markup(bullet);
            if !achievement.is_empty() {
                achievements.push(achievement);
            }
        } else if is_italic_line(line) {
            if dates.is_empty() {
                dates = clean_markup(line);
            }
        } else if company.is_empty() && (line.starts_with("**") || line.contains('|')) {
            let company_line = clean_markup(line);
            match company_line.split_once('|') {
                Some((name, when)) => {
                    company = name.trim().to_string();
                    if dates.is_empty() {
                        dates = when.trim().to_string();
                    }
                }
                None => company = company_line.trim().to_string(),
            }
        }
    }

    Some(ExperienceEntry {
        title,
        company,
        dates,
        achievements,
    })
}

/// Normalize with the canonical styles.
pub fn normalize(sections: &RawSections) -> NormalizedFields {
    Normalizer::default().normalize(sections)
}
