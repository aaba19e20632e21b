// src/job_analysis/mod.rs
pub mod analyzer;

pub use analyzer::{analyze_query, JobAnalyzer, DEFAULT_SEGMENT};
