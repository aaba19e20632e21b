// src/types/mod.rs
pub mod profile;
pub mod record;

pub use profile::{QueryProfile, ScoredUnit, Segment};
pub use record::{
    Education, ExperienceEntry, Language, NormalizedFields, RawSections, SectionKey,
    Strength, StructuredRecord, TechnicalGroup,
};
