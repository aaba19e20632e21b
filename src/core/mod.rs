// src/core/mod.rs
//! Shared tables and configuration used by every pipeline stage

pub mod config_manager;
pub mod defaults;
pub mod vocabulary;

pub use config_manager::{
    ConfigManager, DensityTiers, FitterConfig, LinkStyle, TaglineStyle, SINGLE_PAGE_BUDGET,
};
pub use defaults::{FallbackContent, FALLBACK, PARAGRAPH_BREAK};
pub use vocabulary::VOCABULARY;
