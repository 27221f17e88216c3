//! Unit identifier resolution
//!
//! Human annotations and automated-method outputs are joined on a unit
//! identifier (paragraph number, couplet id). How that identifier is found
//! differs per corpus, so resolution is a pluggable [`IdentifierResolver`].

mod strategies;

pub use strategies::{first_digit_run, CandidateKeys, ColumnLookup, OverrideTable, PatternExtraction};

use crate::table::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one text unit within a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(u64);

impl UnitId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UnitId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Resolve the unit identifier of a record.
///
/// `None` means the record is unresolvable; callers skip it rather than
/// fabricate an identifier.
pub trait IdentifierResolver: Send + Sync {
    fn resolve(&self, record: &Record) -> Option<UnitId>;

    /// Short description for logs and reports.
    fn describe(&self) -> String;
}
