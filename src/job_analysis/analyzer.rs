// src/job_analysis/analyzer.rs
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::core::vocabulary::{display_case, is_role_word, matched_names, CompiledTerm};
use crate::core::VOCABULARY;
use crate::types::{QueryProfile, Segment};

const MATCH_WEIGHT: u32 = 10;
const HIGH_VALUE_WEIGHT: u32 = 25;
const MEDIUM_VALUE_WEIGHT: u32 = 15;

/// Segment used when no segment vocabulary matches at all.
pub const DEFAULT_SEGMENT: Segment = Segment::Operations;

/// Builds a `QueryProfile` from job posting text. Pure pattern matching over the
/// shared vocabulary tables; identical input always yields an identical profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobAnalyzer;

impl JobAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, posting: &str) -> QueryProfile {
        let vocabulary = &*VOCABULARY;

        let mut segment_signals = BTreeMap::new();
        let mut segment_scores = BTreeMap::new();
        for compiled in &vocabulary.segments {
            let matches: Vec<String> = compiled
                .terms
                .find_iter(posting)
                .map(|m| m.as_str().to_string())
                .collect();
            let high = compiled.high_value.find_iter(posting).count() as u32;
            let medium = compiled.medium_value.find_iter(posting).count() as u32;
            let score = matches.len() as u32 * MATCH_WEIGHT
                + high * HIGH_VALUE_WEIGHT
                + medium * MEDIUM_VALUE_WEIGHT;

            debug!(
                "Segment {}: {} matches, {} high, {} medium, score {}",
                compiled.segment,
                matches.len(),
                high,
                medium,
                score
            );
            segment_signals.insert(compiled.segment, matches);
            segment_scores.insert(compiled.segment, score);
        }

        let (primary_segment, secondary_segment) = rank_segments(&segment_scores);

        let must_have_skills = names(&vocabulary.skills, posting);
        let success_metrics = names(&vocabulary.metrics, posting);
        let role_keywords = role_keywords(
            primary_segment,
            &segment_signals,
            &must_have_skills,
            &success_metrics,
        );

        let profile = QueryProfile {
            must_have_skills,
            segment_signals,
            cross_functional_partners: names(&vocabulary.partners, posting),
            success_metrics,
            platform_nouns: names(&vocabulary.platform_nouns, posting),
            primary_segment,
            secondary_segment,
            segment_scores,
            role_keywords,
        };

        info!(
            "Analyzed job posting: primary segment {}, secondary {:?}, {} skills, {} metrics",
            profile.primary_segment,
            profile.secondary_segment.map(|s| s.as_str()),
            profile.must_have_skills.len(),
            profile.success_metrics.len()
        );

        profile
    }
}

fn names(table: &[CompiledTerm], text: &str) -> BTreeSet<String> {
    matched_names(table, text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Highest score wins; ties go to the fixed segment priority order.
fn rank_segments(scores: &BTreeMap<Segment, u32>) -> (Segment, Option<Segment>) {
    let mut ranked: Vec<(Segment, u32)> = Segment::ALL
        .iter()
        .map(|segment| (*segment, scores.get(segment).copied().unwrap_or(0)))
        .filter(|(_, score)| *score > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    match ranked.as_slice() {
        [] => (DEFAULT_SEGMENT, None),
        [(primary, _)] => (*primary, None),
        [(primary, _), (secondary, _), ..] => (*primary, Some(*secondary)),
    }
}

/// Role-defining segment terms (primary segment first), then skills, then metrics.
fn role_keywords(
    primary: Segment,
    signals: &BTreeMap<Segment, Vec<String>>,
    skills: &BTreeSet<String>,
    metrics: &BTreeSet<String>,
) -> Vec<String> {
    let segment_order = std::iter::once(primary)
        .chain(Segment::ALL.into_iter().filter(move |segment| *segment != primary));

    let segment_terms = segment_order
        .flat_map(|segment| signals.get(&segment).into_iter().flatten())
        .filter(|term| is_role_word(term))
        .map(|term| display_case(term));

    let mut seen = BTreeSet::new();
    segment_terms
        .chain(skills.iter().cloned())
        .chain(metrics.iter().cloned())
        .filter(|keyword| seen.insert(keyword.to_lowercase()))
        .collect()
}

/// Analyze posting text with the default analyzer.
pub fn analyze_query(posting: &str) -> QueryProfile {
    JobAnalyzer::new().analyze(posting)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENEFITS_POSTING: &str = "We need a Salesforce power user to own enrollment planning \
with our carriers and keep payroll data clean.";

    #[test]
    fn test_benefits_posting_profile() {
        let profile = analyze_query(BENEFITS_POSTING);
        assert_eq!(profile.primary_segment, Segment::Benefits);
        assert!(profile.must_have_skills.contains("Salesforce"));
        assert_eq!(
            profile.segment_signals[&Segment::Benefits],
            vec!["enrollment", "carriers", "payroll"]
        );
        // 3 matches * 10 + 2 high * 25 + 1 medium * 15
        assert_eq!(profile.segment_scores[&Segment::Benefits], 95);
    }

    #[test]
    fn test_segment_terms_keep_original_casing() {
        let profile = analyze_query("SaaS churn and Customer Success");
        assert_eq!(
            profile.segment_signals[&Segment::Saas],
            vec!["SaaS", "churn", "Customer Success"]
        );
        assert_eq!(profile.primary_segment, Segment::Saas);
    }

    #[test]
    fn test_no_signal_defaults_to_operations() {
        let profile = analyze_query("We are hiring a friendly person.");
        assert_eq!(profile.primary_segment, Segment::Operations);
        assert_eq!(profile.secondary_segment, None);
        assert!(profile.role_keywords.is_empty());
    }

    #[test]
    fn test_tie_breaks_by_segment_priority() {
        // One plain match each for revenue ("sales") and operations ("operations").
        let profile = analyze_query("sales operations");
        assert_eq!(profile.segment_scores[&Segment::Revenue], 10);
        assert_eq!(profile.segment_scores[&Segment::Operations], 10);
        assert_eq!(profile.primary_segment, Segment::Revenue);
        assert_eq!(profile.secondary_segment, Some(Segment::Operations));
    }

    #[test]
    fn test_partners_metrics_and_platforms() {
        let profile = analyze_query(
            "Partner with Engineering and Finance to improve retention and NPS on our CRM platform.",
        );
        assert!(profile.cross_functional_partners.contains("Engineering"));
        assert!(profile.cross_functional_partners.contains("Finance"));
        assert!(profile.success_metrics.contains("Retention"));
        assert!(profile.success_metrics.contains("NPS"));
        assert!(profile.platform_nouns.contains("CRM"));
        assert!(profile.platform_nouns.contains("Platform"));
    }

    #[test]
    fn test_role_keywords_are_title_cased_and_deduplicated() {
        let profile = analyze_query("Benefits enrollment, benefits compliance. Salesforce. Retention.");
        assert_eq!(
            profile.role_keywords,
            vec!["Benefits", "Enrollment", "Salesforce", "Retention"]
        );
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let first = analyze_query(BENEFITS_POSTING);
        let second = analyze_query(BENEFITS_POSTING);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
