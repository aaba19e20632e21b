// src/core/defaults.rs
//! Fallback content substituted for every missing section.
//!
//! Renderers may rely on these literals, so they live in one table instead of
//! being scattered through the normalizer.

use crate::types::{Education, Language, Strength, TechnicalGroup};

/// Separator placed between bio paragraphs.
pub const PARAGRAPH_BREAK: &str = "\n\n";

pub struct FallbackContent {
    pub name: &'static str,
    pub tagline: &'static str,
    pub contact_parts: &'static [&'static str],
    pub bio: &'static str,
    pub strengths: &'static [(&'static str, &'static str)],
    pub education: &'static [(&'static str, &'static str)],
    pub languages: &'static [(&'static str, &'static str)],
    pub technical_title: &'static str,
    pub tools: &'static [&'static str],
    pub professional_development: &'static [&'static str],
}

pub const FALLBACK: FallbackContent = FallbackContent {
    name: "YOUR NAME",
    tagline: "On a mission to unleash business profitability through automation and AI innovation",
    contact_parts: &[
        "(555) 010-0100",
        "name@example.com",
        "linkedin.com/in/your-profile",
    ],
    bio: "Finance and sales professional with eight years of experience in small to enterprise companies. \
Strong understanding of marketing funnels, what-if analyses and automation tools.\n\n\
Outside of work, grew social channels to hundreds of thousands of subscribers on top of a busy day job. \
Learned video editing, SEO and engagement strategy from scratch.",
    strengths: &[
        (
            "PUZZLES, NOT PROBLEMS",
            "Problem-solving has been an integral aspect of my career to date, whether it be understanding a particular legal issue, collaborating with stakeholders to adapt marketing material, or developing innovative ways to generate an ideal outcome.",
        ),
        (
            "CONNECTING THE DOTS",
            "I am skilled at understanding complex ideas and filtering key points from large amounts of information, understanding my audience, and delivering my message clearly and concisely.",
        ),
    ],
    education: &[("Bachelor of Science", "State University")],
    languages: &[("ENGLISH", "Native"), ("SPANISH", "Beginner")],
    technical_title: "TOOLS",
    tools: &[
        "Make.com Automation",
        "Python",
        "SQL",
        "Linux",
        "Google Analytics Certification",
        "Google Ads Search Certification",
        "Scrum Master Certified",
        "Six Sigma Certified",
    ],
    professional_development: &[
        "Next-Level Prompt Engineering with AI",
        "Advanced Excel Functions in Office 365",
        "Tag Manager and Pixel Custom Event Mastery",
        "Certified Six Sigma",
    ],
};

impl FallbackContent {
    pub fn contact_parts(&self) -> Vec<String> {
        self.contact_parts.iter().map(|s| s.to_string()).collect()
    }

    pub fn strengths(&self) -> Vec<Strength> {
        self.strengths
            .iter()
            .map(|(title, description)| Strength {
                title: title.to_string(),
                description: description.to_string(),
            })
            .collect()
    }

    pub fn education(&self) -> Vec<Education> {
        self.education
            .iter()
            .map(|(degree, institution)| Education {
                degree: degree.to_string(),
                institution: institution.to_string(),
            })
            .collect()
    }

    pub fn languages(&self) -> Vec<Language> {
        self.languages
            .iter()
            .map(|(name, level)| Language {
                name: name.to_string(),
                level: level.to_string(),
            })
            .collect()
    }

    pub fn technical(&self) -> Vec<TechnicalGroup> {
        vec![TechnicalGroup {
            title: self.technical_title.to_string(),
            skills: self.tools.iter().map(|s| s.to_string()).collect(),
        }]
    }

    pub fn professional_development(&self) -> Vec<String> {
        self.professional_development
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
