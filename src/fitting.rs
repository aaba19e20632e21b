// src/fitting.rs
//! Single-page capacity fitting: trims achievements, never re-ranks them

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::FitterConfig;
use crate::types::{ExperienceEntry, StructuredRecord};

/// Character count of the rendered text that competes for page space.
pub fn content_estimate(record: &StructuredRecord) -> usize {
    fn chars(s: &str) -> usize {
        s.chars().count()
    }

    let header = chars(&record.name)
        + chars(&record.tagline)
        + record.contact_parts.iter().map(|p| chars(p)).sum::<usize>()
        + chars(&record.bio);
    let strengths: usize = record
        .strengths
        .iter()
        .map(|s| chars(&s.title) + chars(&s.description))
        .sum();

    header + strengths + experience_estimate(&record.experiences)
}

fn experience_estimate(experiences: &[ExperienceEntry]) -> usize {
    experiences
        .iter()
        .map(|e| {
            e.title.chars().count()
                + e.company.chars().count()
                + e.achievements.iter().map(|a| a.chars().count()).sum::<usize>()
        })
        .sum()
}

fn cap_achievements(experiences: &[ExperienceEntry], cap: usize) -> Vec<ExperienceEntry> {
    experiences
        .iter()
        .map(|e| ExperienceEntry {
            achievements: e.achievements.iter().take(cap).cloned().collect(),
            ..e.clone()
        })
        .collect()
}

pub struct CapacityFitter {
    config: FitterConfig,
}

impl CapacityFitter {
    pub fn new(config: FitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn budget(&self) -> usize {
        self.config.page_budget
    }

    /// Fit `record` into the configured budget. Achievements are only ever
    /// truncated from the end, so the incoming ranking order is preserved.
    pub fn fit(&self, mut record: StructuredRecord) -> StructuredRecord {
        let budget = self.config.page_budget;
        let tiers = &self.config.density_tiers;

        let estimate = content_estimate(&record);
        if estimate <= budget {
            record.font_scale_factor = tiers.scale_for(estimate);
            debug!("Content fits untouched: {} / {} chars", estimate, budget);
            return record;
        }

        let fixed = estimate - experience_estimate(&record.experiences);
        for &cap in &self.config.achievement_caps {
            let capped = cap_achievements(&record.experiences, cap);
            let estimate = fixed + experience_estimate(&capped);
            if estimate <= budget {
                info!(
                    "Capped achievements at {} per job: {} / {} chars",
                    cap, estimate, budget
                );
                record.experiences = capped;
                record.font_scale_factor = tiers.scale_for(estimate);
                return record;
            }
        }

        record.experiences = cap_achievements(&record.experiences, self.config.floor_achievements);
        record
            .professional_development
            .truncate(self.config.floor_professional_development);
        record.font_scale_factor = self.config.compressed_scale;

        warn!(
            "Content still exceeds budget at the floor: {} / {} chars, compressing to {}",
            content_estimate(&record),
            budget,
            record.font_scale_factor
        );
        record
    }
}

/// Fit `record` into `budget` characters using the default cap sequence.
pub fn fit_to_capacity(record: StructuredRecord, budget: usize) -> Result<StructuredRecord> {
    if budget == 0 {
        anyhow::bail!("Capacity budget must be greater than zero");
    }
    let fitter = CapacityFitter::new(FitterConfig::default().with_budget(budget))?;
    Ok(fitter.fit(record))
}
