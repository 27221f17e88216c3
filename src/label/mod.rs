//! Label normalization
//!
//! Turns free-text annotations into ranked labels, a primary label and its
//! base category.

mod overlap;
mod ranked;

pub use overlap::{ranked_overlap, RankedOverlap};
pub use ranked::{
    base_category, parse_ranked, primary_label, Granularity, RankedLabels, CATEGORY_DELIMITER,
};
