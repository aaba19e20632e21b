// src/types/profile.rs
//! Job posting profile and transient ranking units

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Target-audience category. Declaration order is the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Benefits,
    Saas,
    Revenue,
    Operations,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Benefits,
        Segment::Saas,
        Segment::Revenue,
        Segment::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Benefits => "benefits",
            Segment::Saas => "saas",
            Segment::Revenue => "revenue",
            Segment::Operations => "operations",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals extracted from a job posting. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryProfile {
    pub must_have_skills: BTreeSet<String>,
    /// Matched terms per segment, verbatim from the posting, in order of appearance.
    pub segment_signals: BTreeMap<Segment, Vec<String>>,
    pub cross_functional_partners: BTreeSet<String>,
    pub success_metrics: BTreeSet<String>,
    pub platform_nouns: BTreeSet<String>,
    pub primary_segment: Segment,
    pub secondary_segment: Option<Segment>,
    pub segment_scores: BTreeMap<Segment, u32>,
    /// Title-cased, deduplicated keywords used for job-title rewriting.
    pub role_keywords: Vec<String>,
}

impl QueryProfile {
    /// Distinct (case-insensitive) terms matched for a segment, first spelling wins.
    pub fn segment_terms(&self, segment: Segment) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.segment_signals
            .get(&segment)
            .map(|terms| {
                terms
                    .iter()
                    .filter(|t| seen.insert(t.to_lowercase()))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn primary_terms(&self) -> Vec<&str> {
        self.segment_terms(self.primary_segment)
    }
}

/// One achievement with its relevance score. Only lives during ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredUnit {
    pub content: String,
    pub score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_priority_order() {
        let mut segments = vec![Segment::Operations, Segment::Revenue, Segment::Benefits, Segment::Saas];
        segments.sort();
        assert_eq!(segments, Segment::ALL.to_vec());
    }

    #[test]
    fn test_segment_terms_dedup_case_insensitive() {
        let mut signals = BTreeMap::new();
        signals.insert(
            Segment::Benefits,
            vec!["Carriers".to_string(), "enrollment".to_string(), "carriers".to_string()],
        );
        let profile = QueryProfile {
            must_have_skills: BTreeSet::new(),
            segment_signals: signals,
            cross_functional_partners: BTreeSet::new(),
            success_metrics: BTreeSet::new(),
            platform_nouns: BTreeSet::new(),
            primary_segment: Segment::Benefits,
            secondary_segment: None,
            segment_scores: BTreeMap::new(),
            role_keywords: vec![],
        };
        assert_eq!(profile.primary_terms(), vec!["Carriers", "enrollment"]);
        assert!(profile.segment_terms(Segment::Saas).is_empty());
    }
}
