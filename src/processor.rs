// src/processor.rs
//! Sequential pipeline: extract, normalize, analyze, rank, fit

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::core::FitterConfig;
use crate::extraction::{extract_sections, Normalizer};
use crate::fitting::CapacityFitter;
use crate::job_analysis::JobAnalyzer;
use crate::scoring::{score_and_rank, RelevanceScorer};
use crate::types::{NormalizedFields, QueryProfile, StructuredRecord};

/// One row of the achievement ranking report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub job: String,
    pub score: i32,
    pub achievement: String,
}

pub struct CvProcessor {
    normalizer: Normalizer,
    analyzer: JobAnalyzer,
    fitter: CapacityFitter,
}

impl CvProcessor {
    pub fn new(config: FitterConfig) -> Result<Self> {
        let normalizer = Normalizer::new(&config);
        let fitter = CapacityFitter::new(config)?;

        Ok(Self {
            normalizer,
            analyzer: JobAnalyzer::new(),
            fitter,
        })
    }

    pub fn normalize(&self, document: &str) -> NormalizedFields {
        let sections = extract_sections(document);
        self.normalizer.normalize(&sections)
    }

    /// Blank query text counts as no query.
    pub fn analyze(&self, query: Option<&str>) -> Option<QueryProfile> {
        query
            .filter(|text| !text.trim().is_empty())
            .map(|text| self.analyzer.analyze(text))
    }

    /// Run the whole pipeline. Never fails on document content: missing or
    /// unparseable sections fall back to the default content.
    pub fn process(&self, document: &str, query: Option<&str>) -> StructuredRecord {
        let mut fields = self.normalize(document);
        let profile = self.analyze(query);

        let experiences = score_and_rank(std::mem::take(&mut fields.experiences), profile.as_ref());
        let technical = RelevanceScorer::new(profile.as_ref())
            .rank_technical(std::mem::take(&mut fields.technical));

        let record = self
            .fitter
            .fit(StructuredRecord::assemble(fields, experiences, technical));

        info!(
            "Processed resume: {} jobs, {} achievements, scale {}",
            record.experiences.len(),
            record.achievement_count(),
            record.font_scale_factor
        );
        record
    }

    /// Every parsed achievement with its score, per job, in document order.
    pub fn ranking_report(&self, document: &str, query: Option<&str>) -> Vec<ScoreRow> {
        let fields = self.normalize(document);
        let profile = self.analyze(query);
        let scorer = RelevanceScorer::new(profile.as_ref());

        fields
            .experiences
            .iter()
            .flat_map(|entry| {
                scorer.score_units(entry).into_iter().map(|unit| ScoreRow {
                    job: entry.title.clone(),
                    score: unit.score,
                    achievement: unit.content,
                })
            })
            .collect()
    }
}

/// Convenience function for a one-shot run with default styles.
pub fn process_cv(document: &str, query: Option<&str>, budget: usize) -> Result<StructuredRecord> {
    let processor = CvProcessor::new(FitterConfig::default().with_budget(budget))?;
    Ok(processor.process(document, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FALLBACK;
    use crate::fitting::content_estimate;
    use crate::types::{SectionKey, Segment};

    const JANE: &str = "# Jane Doe

**Builds things.**

555-123-4567 | jane@example.com | linkedin.com/in/janedoe

## Professional Experience

### Operations Lead
**Acme Corp** | 2019 - Present
- Kept the shared drive tidy
- Cut fulfillment costs by 40%
- Answered vendor questions
- Closed $2M in new contracts
- Wrote onboarding notes
";

    #[test]
    fn test_metric_achievements_survive_a_tight_budget() {
        let roomy = process_cv(JANE, None, 100_000).unwrap();
        let budget = content_estimate(&roomy) - 1;

        let record = process_cv(JANE, None, budget).unwrap();
        let achievements = &record.experiences[0].achievements;

        assert!(achievements.len() <= 4);
        assert_eq!(achievements[0], "Cut fulfillment costs by 40%");
        assert_eq!(achievements[1], "Closed $2M in new contracts");
        assert!(content_estimate(&record) <= budget);
    }

    #[test]
    fn test_header_fields_from_document() {
        let record = process_cv(JANE, None, 100_000).unwrap();
        assert_eq!(record.name, "JANE DOE");
        assert_eq!(record.tagline, "Builds things");
        assert_eq!(
            record.contact_parts,
            vec!["555-123-4567", "jane@example.com", "linkedin.com/in/janedoe"]
        );
        assert_eq!(record.experiences[0].company, "Acme Corp");
        assert_eq!(record.experiences[0].dates, "2019 - Present");
        assert_eq!(record.font_scale_factor, 1.0);
    }

    #[test]
    fn test_benefits_query_profile() {
        let processor = CvProcessor::new(FitterConfig::default()).unwrap();
        let profile = processor
            .analyze(Some(
                "Own enrollment planning with our carriers. Salesforce experience required.",
            ))
            .unwrap();

        assert_eq!(profile.primary_segment, Segment::Benefits);
        assert!(profile.must_have_skills.contains("Salesforce"));
        assert!(processor.analyze(Some("   ")).is_none());
    }

    #[test]
    fn test_missing_education_uses_default_record() {
        let processor = CvProcessor::new(FitterConfig::default()).unwrap();
        let fields = processor.normalize(JANE);

        assert_eq!(fields.education, FALLBACK.education());
        assert!(fields.used_fallback(SectionKey::Education));
        assert_eq!(processor.process(JANE, None).education, FALLBACK.education());
    }

    #[test]
    fn test_empty_document_yields_default_record() {
        let record = process_cv("", None, 100_000).unwrap();
        assert_eq!(record.name, FALLBACK.name);
        assert_eq!(record.education, FALLBACK.education());
        assert_eq!(record.languages, FALLBACK.languages());
        assert_eq!(record.strengths, FALLBACK.strengths());
        assert_eq!(record.professional_development, FALLBACK.professional_development());
        assert!(record.experiences.is_empty());
    }

    #[test]
    fn test_only_three_jobs_kept_in_document_order() {
        let document = "# Sam Roe

## Professional Experience

### First Role
- a
### Second Role
- b
### Third Role
- c
### Fourth Role
- d
";
        let record = process_cv(document, None, 100_000).unwrap();
        let titles: Vec<&str> = record.experiences.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First Role", "Second Role", "Third Role"]);
    }

    #[test]
    fn test_query_rewrites_generic_titles() {
        let document = JANE.replace("### Operations Lead", "### Business Analyst");
        let record = process_cv(
            &document,
            Some("Benefits enrollment with carriers and brokers."),
            100_000,
        )
        .unwrap();
        assert_eq!(record.experiences[0].title, "Benefits Analyst");
    }

    #[test]
    fn test_ranking_report_lists_every_achievement() {
        let processor = CvProcessor::new(FitterConfig::default()).unwrap();
        let rows = processor.ranking_report(JANE, None);

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.job == "Operations Lead"));
        assert_eq!(rows[1].score, 100);
        assert_eq!(rows[0].score, 0);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(process_cv(JANE, None, 0).is_err());

        let mut config = FitterConfig::default();
        config.achievement_caps.clear();
        assert!(CvProcessor::new(config).is_err());
    }
}
