// src/scoring.rs
//! Achievement ranking, technical skill ordering and job title rewriting

use regex::Captures;
use tracing::debug;

use crate::core::vocabulary::{is_role_word, overlap_score, term_score};
use crate::core::VOCABULARY;
use crate::types::{ExperienceEntry, QueryProfile, ScoredUnit, TechnicalGroup};

const QUANTIFIED_BONUS: i32 = 100;
const SEGMENT_TERM_BONUS: i32 = 75;
const SEGMENT_VOCABULARY_BONUS: i32 = 60;
const SKILL_BONUS: i32 = 30;
const METRIC_BONUS: i32 = 25;
const TRANSFORMATION_BONUS: i32 = 50;
const LEADERSHIP_BONUS: i32 = 30;
const TOOL_BONUS: i32 = 25;
const DETAIL_BONUS: i32 = 10;
const DETAILED_ACHIEVEMENT_CHARS: usize = 100;

const MUST_HAVE_SKILL_WEIGHT: i32 = 50;
const PLATFORM_NOUN_WEIGHT: i32 = 40;
const SEGMENT_SKILL_WEIGHT: i32 = 20;

/// How many ranked achievements survive, from the candidate scores.
pub fn selection_count(scores: &[i32]) -> usize {
    let at_least = |threshold: i32| scores.iter().filter(|s| **s >= threshold).count();
    match scores.len() {
        n if n >= 6 => at_least(50).max(4).min(6),
        n if n >= 4 => at_least(30).max(3).min(5),
        n => n,
    }
}

pub struct RelevanceScorer<'a> {
    profile: Option<&'a QueryProfile>,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(profile: Option<&'a QueryProfile>) -> Self {
        Self { profile }
    }

    pub fn score(&self, achievement: &str) -> i32 {
        let vocabulary = &*VOCABULARY;
        let mut score = 0;

        if vocabulary.quantified.is_match(achievement) {
            score += QUANTIFIED_BONUS;
        }

        match self.profile {
            Some(profile) => {
                let segment = vocabulary.segment(profile.primary_segment);
                score += overlap_score(achievement, profile.primary_terms(), SEGMENT_TERM_BONUS);
                if segment.achievement_terms.is_match(achievement) {
                    score += SEGMENT_VOCABULARY_BONUS;
                }
                score += term_score(
                    &vocabulary.skills,
                    profile.must_have_skills.iter().map(String::as_str),
                    achievement,
                    SKILL_BONUS,
                );
                score += term_score(
                    &vocabulary.metrics,
                    profile.success_metrics.iter().map(String::as_str),
                    achievement,
                    METRIC_BONUS,
                );
            }
            None => {
                if vocabulary.transformation.is_match(achievement) {
                    score += TRANSFORMATION_BONUS;
                }
            }
        }

        if vocabulary.leadership.is_match(achievement) {
            score += LEADERSHIP_BONUS;
        }
        if vocabulary.tools.is_match(achievement) {
            score += TOOL_BONUS;
        }
        if achievement.chars().count() > DETAILED_ACHIEVEMENT_CHARS {
            score += DETAIL_BONUS;
        }

        score
    }

    /// Scored achievements of one job, in document order.
    pub fn score_units(&self, entry: &ExperienceEntry) -> Vec<ScoredUnit> {
        entry
            .achievements
            .iter()
            .map(|achievement| ScoredUnit {
                content: achievement.clone(),
                score: self.score(achievement),
            })
            .collect()
    }

    /// Stable descending sort, then the selection-count cut.
    pub fn rank_achievements(&self, achievements: &[String]) -> Vec<String> {
        let mut units: Vec<ScoredUnit> = achievements
            .iter()
            .map(|achievement| ScoredUnit {
                content: achievement.clone(),
                score: self.score(achievement),
            })
            .collect();

        let scores: Vec<i32> = units.iter().map(|unit| unit.score).collect();
        let keep = selection_count(&scores);

        units.sort_by(|a, b| b.score.cmp(&a.score));
        units.truncate(keep);
        units.into_iter().map(|unit| unit.content).collect()
    }

    /// Swap a generic title fragment ("Business Analyst") for a role keyword of
    /// the primary segment. Unrecognized titles pass through.
    pub fn rewrite_title(&self, title: &str) -> String {
        let Some(keyword) = self.title_keyword() else {
            return title.to_string();
        };

        VOCABULARY
            .title_fragment
            .replace(title, |caps: &Captures| {
                format!("{}{}{}", keyword, &caps[2], &caps[3])
            })
            .into_owned()
    }

    fn title_keyword(&self) -> Option<&'a str> {
        let profile = self.profile?;
        let preferred = VOCABULARY.segment(profile.primary_segment).title_words;

        profile
            .role_keywords
            .iter()
            .find(|keyword| preferred.iter().any(|word| word.eq_ignore_ascii_case(keyword)))
            .or_else(|| profile.role_keywords.iter().find(|keyword| is_role_word(keyword)))
            .map(String::as_str)
    }

    /// Order skills by overlap with the posting; without a profile the order is kept.
    pub fn rank_technical(&self, groups: Vec<TechnicalGroup>) -> Vec<TechnicalGroup> {
        let Some(profile) = self.profile else {
            return groups;
        };
        let segment_terms = profile.primary_terms();

        groups
            .into_iter()
            .map(|mut group| {
                let mut scored: Vec<(i32, String)> = group
                    .skills
                    .into_iter()
                    .map(|skill| {
                        let score = term_score(
                            &VOCABULARY.skills,
                            profile.must_have_skills.iter().map(String::as_str),
                            &skill,
                            MUST_HAVE_SKILL_WEIGHT,
                        ) + term_score(
                            &VOCABULARY.platform_nouns,
                            profile.platform_nouns.iter().map(String::as_str),
                            &skill,
                            PLATFORM_NOUN_WEIGHT,
                        ) + overlap_score(&skill, segment_terms.iter().copied(), SEGMENT_SKILL_WEIGHT);
                        (score, skill)
                    })
                    .collect();
                scored.sort_by(|a, b| b.0.cmp(&a.0));
                group.skills = scored.into_iter().map(|(_, skill)| skill).collect();
                group
            })
            .collect()
    }

    pub fn rank_experience(&self, entry: ExperienceEntry) -> ExperienceEntry {
        let candidates = entry.achievements.len();
        let achievements = self.rank_achievements(&entry.achievements);
        debug!(
            "Selected {} of {} achievements for {}",
            achievements.len(),
            candidates,
            entry.title
        );

        ExperienceEntry {
            title: self.rewrite_title(&entry.title),
            achievements,
            ..entry
        }
    }
}

/// Rank every job's achievements (and rewrite titles when a profile is given).
/// Job order is preserved.
pub fn score_and_rank(
    experiences: Vec<ExperienceEntry>,
    profile: Option<&QueryProfile>,
) -> Vec<ExperienceEntry> {
    let scorer = RelevanceScorer::new(profile);
    experiences
        .into_iter()
        .map(|entry| scorer.rank_experience(entry))
        .collect()
}

/// Transient scores of one job's achievements, in document order.
pub fn score_units(entry: &ExperienceEntry, profile: Option<&QueryProfile>) -> Vec<ScoredUnit> {
    RelevanceScorer::new(profile).score_units(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_analysis::analyze_query;

    fn job(achievements: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            title: "Operations Manager".to_string(),
            company: "Acme".to_string(),
            dates: "2020 - Present".to_string(),
            achievements: achievements.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_selection_count_policy() {
        assert_eq!(selection_count(&[0, 0, 0, 0, 0, 0, 0]), 4);
        assert_eq!(selection_count(&[90, 80, 70, 60, 50, 0]), 5);
        assert_eq!(selection_count(&[90, 90, 90, 90, 90, 90, 90, 90]), 6);
        assert_eq!(selection_count(&[0, 0, 0, 0, 0]), 3);
        assert_eq!(selection_count(&[30, 30, 30, 30, 0]), 4);
        assert_eq!(selection_count(&[0, 0, 0]), 3);
        assert_eq!(selection_count(&[]), 0);
    }

    #[test]
    fn test_intrinsic_signals_without_profile() {
        let scorer = RelevanceScorer::new(None);
        assert_eq!(scorer.score("Wrote weekly status notes"), 0);
        assert_eq!(scorer.score("Cut costs by 40%"), 100);
        assert_eq!(scorer.score("Automated invoice matching"), 50);
        assert_eq!(scorer.score("Led the Salesforce rollout"), 55);
        let long = format!("Wrote notes {}", "x".repeat(100));
        assert_eq!(scorer.score(&long), 10);
    }

    #[test]
    fn test_metric_achievements_rank_first() {
        let entry = job(&[
            "Wrote weekly status notes",
            "Reduced churn by 12%",
            "Organized the team offsite",
            "Led a 5-person team that grew revenue 30%",
            "Maintained vendor contacts",
            "Closed $2M in new business",
        ]);
        let ranked = RelevanceScorer::new(None).rank_achievements(&entry.achievements);

        assert_eq!(ranked.len(), 4);
        assert_eq!(
            &ranked[..3],
            &[
                "Led a 5-person team that grew revenue 30%".to_string(),
                "Reduced churn by 12%".to_string(),
                "Closed $2M in new business".to_string(),
            ]
        );
        assert_eq!(ranked[3], "Wrote weekly status notes");
    }

    #[test]
    fn test_profile_segment_terms_skills_and_metrics() {
        let profile = analyze_query(
            "Salesforce admin to own enrollment with carriers and improve retention.",
        );
        let scorer = RelevanceScorer::new(Some(&profile));

        // enrollment + carriers (75 each) + benefits vocabulary (60)
        assert_eq!(scorer.score("Coordinated enrollment with carriers"), 210);
        // skill (30) + tool (25) + metric (25)
        assert_eq!(scorer.score("Rebuilt Salesforce reports on retention"), 80);
        // transformation fallback only applies without a profile
        assert_eq!(scorer.score("Automated invoice matching"), 0);
    }

    #[test]
    fn test_skills_and_metrics_match_posting_spelling() {
        let profile =
            analyze_query("Must be fluent with ChatGPT and spreadsheets; reduce costs across teams.");
        assert!(profile.must_have_skills.contains("LLM Tools"));
        assert!(profile.must_have_skills.contains("Excel"));
        assert!(profile.success_metrics.contains("Cost Reduction"));

        let scorer = RelevanceScorer::new(Some(&profile));
        // skill (30) + tool (25)
        assert_eq!(scorer.score("Built ChatGPT triage for tickets"), 55);
        // skill (30) + metric (25) + tool (25)
        assert_eq!(scorer.score("Rebuilt the spreadsheets to reduce costs"), 80);
    }

    #[test]
    fn test_rank_technical_matches_posting_spelling() {
        let profile = analyze_query("Daily work in spreadsheets and our partner portals.");
        let groups = vec![TechnicalGroup {
            title: "TOOLS".to_string(),
            skills: vec![
                "Linux".to_string(),
                "Portal administration".to_string(),
                "Advanced spreadsheets".to_string(),
            ],
        }];
        let ranked = RelevanceScorer::new(Some(&profile)).rank_technical(groups);
        assert_eq!(
            ranked[0].skills,
            vec!["Advanced spreadsheets", "Portal administration", "Linux"]
        );
    }

    #[test]
    fn test_units_keep_document_order() {
        let units = score_units(&job(&["Plain work", "Grew sales 20%"]), None);
        assert_eq!(units[0].content, "Plain work");
        assert_eq!(units[0].score, 0);
        assert_eq!(units[1].score, 100);
    }

    #[test]
    fn test_rewrite_title_prefers_segment_keyword() {
        let profile = analyze_query("Benefits enrollment with carriers, plus sales pipeline work.");
        let scorer = RelevanceScorer::new(Some(&profile));
        assert_eq!(scorer.rewrite_title("Operations Manager"), "Benefits Manager");
        assert_eq!(scorer.rewrite_title("Senior Business Analyst"), "Senior Benefits Analyst");
        assert_eq!(scorer.rewrite_title("Head of Growth"), "Head of Growth");
    }

    #[test]
    fn test_rewrite_title_without_keywords_is_identity() {
        let profile = analyze_query("A friendly team.");
        let scorer = RelevanceScorer::new(Some(&profile));
        assert_eq!(scorer.rewrite_title("Business Analyst"), "Business Analyst");
        assert_eq!(RelevanceScorer::new(None).rewrite_title("Business Analyst"), "Business Analyst");
    }

    #[test]
    fn test_rank_technical_moves_matching_skills_forward() {
        let profile = analyze_query("Must know Python and Salesforce. Build dashboards.");
        let groups = vec![TechnicalGroup {
            title: "TOOLS".to_string(),
            skills: vec![
                "Linux".to_string(),
                "Dashboard design".to_string(),
                "Salesforce Admin".to_string(),
                "Python".to_string(),
            ],
        }];
        let ranked = RelevanceScorer::new(Some(&profile)).rank_technical(groups.clone());
        assert_eq!(
            ranked[0].skills,
            vec!["Salesforce Admin", "Python", "Dashboard design", "Linux"]
        );
        assert_eq!(RelevanceScorer::new(None).rank_technical(groups.clone()), groups);
    }

    #[test]
    fn test_score_and_rank_preserves_job_order() {
        let jobs = vec![job(&["a", "b"]), job(&["Grew sales 20%", "c", "d", "e"])];
        let ranked = score_and_rank(jobs, None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].achievements, vec!["a", "b"]);
        assert_eq!(ranked[1].achievements[0], "Grew sales 20%");
        assert_eq!(ranked[1].achievements.len(), 3);
    }
}
