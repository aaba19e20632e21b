// src/core/config_manager.rs
//! Fitter configuration - yaml file, environment override, or built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Approximate character capacity of a single rendered page.
pub const SINGLE_PAGE_BUDGET: usize = 4300;

const CONFIG_ENV_VAR: &str = "CVFIT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "cvfit.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaglineStyle {
    /// Trailing period removed.
    #[default]
    Bare,
    /// Trailing sentence punctuation ensured.
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// Scheme and `www.` removed.
    #[default]
    Bare,
    /// Scheme removed, profile links prefixed with `www.`.
    Www,
}

/// Optional content-density scaling for records that fit the budget. Depends only
/// on the fitted estimate, so re-fitting a fitted record keeps its scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityTiers {
    pub enabled: bool,
    pub sparse_max: usize,
    pub medium_max: usize,
    pub sparse_scale: f64,
    pub medium_scale: f64,
}

impl Default for DensityTiers {
    fn default() -> Self {
        Self {
            enabled: false,
            sparse_max: 3300,
            medium_max: 4000,
            sparse_scale: 1.2,
            medium_scale: 1.1,
        }
    }
}

impl DensityTiers {
    pub fn scale_for(&self, estimate: usize) -> f64 {
        if !self.enabled {
            return 1.0;
        }
        if estimate <= self.sparse_max {
            self.sparse_scale
        } else if estimate <= self.medium_max {
            self.medium_scale
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitterConfig {
    pub page_budget: usize,
    /// Per-job achievement caps tried in order, strictly descending, ending at
    /// `floor_achievements`.
    pub achievement_caps: Vec<usize>,
    pub floor_achievements: usize,
    pub floor_professional_development: usize,
    pub compressed_scale: f64,
    pub max_jobs: usize,
    pub tagline_style: TaglineStyle,
    pub link_style: LinkStyle,
    pub density_tiers: DensityTiers,
}

impl Default for FitterConfig {
    fn default() -> Self {
        Self {
            page_budget: SINGLE_PAGE_BUDGET,
            achievement_caps: vec![5, 4, 3, 2],
            floor_achievements: 2,
            floor_professional_development: 3,
            compressed_scale: 0.92,
            max_jobs: 3,
            tagline_style: TaglineStyle::default(),
            link_style: LinkStyle::default(),
            density_tiers: DensityTiers::default(),
        }
    }
}

impl FitterConfig {
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.page_budget = budget;
        self
    }

    pub fn with_tagline_style(mut self, style: TaglineStyle) -> Self {
        self.tagline_style = style;
        self
    }

    pub fn with_link_style(mut self, style: LinkStyle) -> Self {
        self.link_style = style;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_budget == 0 {
            anyhow::bail!("page_budget must be greater than zero");
        }
        if self.achievement_caps.is_empty() {
            anyhow::bail!("achievement_caps must not be empty");
        }
        if self.achievement_caps.windows(2).any(|pair| pair[0] <= pair[1]) {
            anyhow::bail!(
                "achievement_caps must be strictly descending: {:?}",
                self.achievement_caps
            );
        }
        if self.achievement_caps.last() != Some(&self.floor_achievements) {
            anyhow::bail!(
                "achievement_caps {:?} must end at floor_achievements {}",
                self.achievement_caps,
                self.floor_achievements
            );
        }
        if self.max_jobs == 0 {
            anyhow::bail!("max_jobs must be greater than zero");
        }
        let scales = [
            self.compressed_scale,
            self.density_tiers.sparse_scale,
            self.density_tiers.medium_scale,
        ];
        if scales.iter().any(|scale| !(*scale > 0.0)) {
            anyhow::bail!("scale factors must be positive");
        }
        Ok(())
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load from `$CVFIT_CONFIG`, then `./cvfit.yaml`, then built-in defaults.
    pub fn load() -> Result<FitterConfig> {
        match Self::config_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                info!("No fitter configuration file found, using defaults");
                Ok(FitterConfig::default())
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    pub fn load_from_file(path: &Path) -> Result<FitterConfig> {
        info!("Loading fitter configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<FitterConfig> {
        let config: FitterConfig =
            serde_yaml::from_str(content).context("Invalid fitter configuration yaml")?;
        config.validate()?;
        Ok(config)
    }
}
