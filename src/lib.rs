//! Markdown resume extraction, job-aware relevance ranking and single-page fitting.

pub mod cli;
pub mod core;
pub mod extraction;
pub mod fitting;
pub mod job_analysis;
pub mod processor;
pub mod scoring;
pub mod types;
pub mod utils;

pub use crate::core::{ConfigManager, FitterConfig, SINGLE_PAGE_BUDGET};
pub use extraction::{extract_sections, normalize};
pub use fitting::{content_estimate, fit_to_capacity, CapacityFitter};
pub use job_analysis::analyze_query;
pub use processor::{process_cv, CvProcessor, ScoreRow};
pub use scoring::{score_and_rank, score_units, RelevanceScorer};
pub use types::{
    NormalizedFields, QueryProfile, RawSections, ScoredUnit, SectionKey, Segment, StructuredRecord,
};
