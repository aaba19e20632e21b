// src/types/record.rs
//! Resume data structures shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===== Raw Sections =====

/// Logical block of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Name,
    Tagline,
    Contact,
    Bio,
    Experience,
    Technical,
    Education,
    Languages,
    Strengths,
    ProfessionalDevelopment,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Name => "name",
            SectionKey::Tagline => "tagline",
            SectionKey::Contact => "contact",
            SectionKey::Bio => "bio",
            SectionKey::Experience => "experience",
            SectionKey::Technical => "technical",
            SectionKey::Education => "education",
            SectionKey::Languages => "languages",
            SectionKey::Strengths => "strengths",
            SectionKey::ProfessionalDevelopment => "professional_development",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section key to raw text span. A missing key means the document had no such section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSections {
    sections: BTreeMap<SectionKey, String>,
}

impl RawSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank spans are dropped so consumers only ever see usable text.
    pub fn insert(&mut self, key: SectionKey, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.sections.insert(key, text);
        }
    }

    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.sections.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.sections.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.sections.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ===== Normalized Records =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    /// Ordered; once ranked, position 0 is the strongest achievement.
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalGroup {
    pub title: String,
    pub skills: Vec<String>,
}

impl TechnicalGroup {
    /// Comma separated form used by renderers.
    pub fn joined(&self) -> String {
        self.skills.join(", ")
    }
}

/// Fully cleaned fields of one document, before ranking and fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFields {
    pub name: String,
    pub tagline: String,
    pub contact_parts: Vec<String>,
    pub bio: String,
    pub strengths: Vec<Strength>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub technical: Vec<TechnicalGroup>,
    pub experiences: Vec<ExperienceEntry>,
    pub professional_development: Vec<String>,
    /// Sections that were filled from the fallback content.
    pub defaulted: Vec<SectionKey>,
}

impl NormalizedFields {
    pub fn used_fallback(&self, key: SectionKey) -> bool {
        self.defaulted.contains(&key)
    }
}

// ===== Final Aggregate =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub name: String,
    pub tagline: String,
    pub contact_parts: Vec<String>,
    pub bio: String,
    pub strengths: Vec<Strength>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub technical: Vec<TechnicalGroup>,
    pub experiences: Vec<ExperienceEntry>,
    pub professional_development: Vec<String>,
    pub font_scale_factor: f64,
}

impl StructuredRecord {
    /// Assemble the record from normalized fields plus the ranked experience and
    /// technical lists. The scale factor starts at nominal until fitting.
    pub fn assemble(
        fields: NormalizedFields,
        experiences: Vec<ExperienceEntry>,
        technical: Vec<TechnicalGroup>,
    ) -> Self {
        Self {
            name: fields.name,
            tagline: fields.tagline,
            contact_parts: fields.contact_parts,
            bio: fields.bio,
            strengths: fields.strengths,
            education: fields.education,
            languages: fields.languages,
            technical,
            experiences,
            professional_development: fields.professional_development,
            font_scale_factor: 1.0,
        }
    }

    pub fn achievement_count(&self) -> usize {
        self.experiences.iter().map(|e| e.achievements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_sections_drop_blank_spans() {
        let mut sections = RawSections::new();
        sections.insert(SectionKey::Bio, "   \n ");
        sections.insert(SectionKey::Name, "Jane Doe");

        assert!(!sections.contains(SectionKey::Bio));
        assert_eq!(sections.get(SectionKey::Name), Some("Jane Doe"));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_section_key_serializes_snake_case() {
        let json = serde_json::to_string(&SectionKey::ProfessionalDevelopment).unwrap();
        assert_eq!(json, "\"professional_development\"");
        assert_eq!(SectionKey::ProfessionalDevelopment.to_string(), "professional_development");
    }

    #[test]
    fn test_achievement_count_sums_jobs() {
        let job = |n: usize| ExperienceEntry {
            title: "Analyst".to_string(),
            company: "Acme".to_string(),
            dates: String::new(),
            achievements: (0..n).map(|i| format!("item {}", i)).collect(),
        };
        let record = StructuredRecord {
            name: String::new(),
            tagline: String::new(),
            contact_parts: vec![],
            bio: String::new(),
            strengths: vec![],
            education: vec![],
            languages: vec![],
            technical: vec![],
            experiences: vec![job(3), job(2)],
            professional_development: vec![],
            font_scale_factor: 1.0,
        };
        assert_eq!(record.achievement_count(), 5);
    }
}
