//! Common test utilities for moral-agreement integration tests
//!
//! Shared corpus fixtures and seeded label generators.

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    kannada_human, kannada_method, study_yaml, tamil_human, tamil_method, tamil_texts_yaml,
    write_study,
};
pub use generators::{random_labels, random_scores, with_gaps, FOUNDATION_LABELS};
