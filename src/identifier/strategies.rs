//! Identifier resolution strategies

use super::{IdentifierResolver, UnitId};
use crate::table::{Record, Table};
use regex_lite::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Zero of every Unicode decimal-digit (Nd) block; each block runs zero..nine.
const DECIMAL_ZEROS: [u32; 66] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6,
    0x0C66, 0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0,
    0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620,
    0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066,
    0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730,
    0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE,
    0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E950, 0x1FBF0,
];

/// Decimal value of `c` in any script: `'8'`, `'೮'` and `'௮'` are all 8.
fn digit_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|zero| code - zero)
}

fn digit_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            let mut class = String::from("[");
            for zero in DECIMAL_ZEROS {
                class.push(char::from_u32(zero)?);
                class.push('-');
                class.push(char::from_u32(zero + 9)?);
            }
            class.push_str("]+");
            Regex::new(&class).ok()
        })
        .as_ref()
}

/// The first run of decimal digits in `text`, as a number.
///
/// Digits of any script count, so Kannada `"ಪ್ಯಾರಾ ೮೧"` gives 81. A run too
/// long for `u64` is treated as no identifier.
pub fn first_digit_run(text: &str) -> Option<u64> {
    digit_pattern()?
        .find(text)?
        .as_str()
        .chars()
        .try_fold(0u64, |acc, c| {
            acc.checked_mul(10)?
                .checked_add(u64::from(digit_value(c)?))
        })
}

/// Scan a free-text field for the first embedded number.
///
/// `"Paragraph 81: ..."` resolves to 81.
#[derive(Debug, Clone)]
pub struct PatternExtraction {
    field: String,
}

impl PatternExtraction {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl IdentifierResolver for PatternExtraction {
    fn resolve(&self, record: &Record) -> Option<UnitId> {
        let text = record.text(&self.field)?;
        first_digit_run(&text).map(UnitId::new)
    }

    fn describe(&self) -> String {
        format!("first number in '{}'", self.field)
    }
}

/// Explicit row position → identifier table.
///
/// Used for corpora whose text carries no reliable embedded number. It is an
/// override: positions without an entry are unresolvable, the text is never
/// scanned.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: BTreeMap<usize, UnitId>,
}

impl OverrideTable {
    pub fn new(entries: impl IntoIterator<Item = (usize, u64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(position, id)| (position, UnitId::new(id)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IdentifierResolver for OverrideTable {
    fn resolve(&self, record: &Record) -> Option<UnitId> {
        self.entries.get(&record.position).copied()
    }

    fn describe(&self) -> String {
        format!("explicit override table ({} entries)", self.entries.len())
    }
}

/// Read the identifier straight from a column.
#[derive(Debug, Clone)]
pub struct ColumnLookup {
    column: String,
}

impl ColumnLookup {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl IdentifierResolver for ColumnLookup {
    fn resolve(&self, record: &Record) -> Option<UnitId> {
        record.get(&self.column)?.as_unsigned().map(UnitId::new)
    }

    fn describe(&self) -> String {
        format!("column '{}'", self.column)
    }
}

/// Prioritized list of candidate identifier columns.
///
/// Selected once per table, never re-checked per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKeys(Vec<String>);

impl CandidateKeys {
    pub fn new<S: Into<String>>(candidates: impl IntoIterator<Item = S>) -> Self {
        Self(candidates.into_iter().map(Into::into).collect())
    }

    /// The first candidate the table actually has.
    pub fn select(&self, table: &Table) -> Option<&str> {
        self.0
            .iter()
            .map(String::as_str)
            .find(|candidate| table.has_column(candidate))
    }

    /// Build a column resolver for `table`, if any candidate is present.
    pub fn resolver_for(&self, table: &Table) -> Option<ColumnLookup> {
        self.select(table).map(ColumnLookup::new)
    }

    pub fn candidates(&self) -> &[String] {
        &self.0
    }
}
