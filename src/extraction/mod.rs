// src/extraction/mod.rs
//! Markdown resume parsing: raw sections first, then normalized fields

pub mod normalizer;
pub mod sections;

pub use normalizer::{normalize, Normalizer};
pub use sections::extract_sections;
