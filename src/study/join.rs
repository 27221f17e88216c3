//! Joining human annotations to method outputs

use super::{ComparisonRow, ComparisonTable, Source};
use crate::config::{HumanFields, MethodFields};
use crate::error::{AgreementResult, ConfigError};
use crate::identifier::{IdentifierResolver, UnitId};
use crate::label::{parse_ranked, primary_label};
use crate::table::{Record, Table};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// What happened to each human-annotation row during the join.
///
/// Rows listed here are excluded from every statistic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    /// Resolver used for the human table
    pub strategy: String,
    /// Method-table column the identifier was matched against
    pub method_key: String,
    /// Rows joined to a method row
    pub joined: usize,
    /// Positions of rows naming no known text
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_text: Vec<usize>,
    /// Positions of rows whose identifier could not be resolved
    pub unresolvable: Vec<usize>,
    /// Resolved identifiers absent from the method table
    pub unmatched: Vec<UnitId>,
}

impl ResolutionReport {
    pub fn skipped(&self) -> usize {
        self.unknown_text.len() + self.unresolvable.len() + self.unmatched.len()
    }
}

/// Where a corpus's method outputs live.
#[derive(Debug, Clone, Copy)]
pub enum MethodTables<'a> {
    /// One table; units are unique across the corpus
    Single(&'a Table),
    /// One table per text. Unit numbering restarts in every text, so human
    /// rows are matched on the text named in `field` plus the unit.
    PerText {
        field: &'a str,
        tables: &'a BTreeMap<String, Table>,
    },
}

impl<'a> MethodTables<'a> {
    fn tables(&self) -> Vec<(Option<&'a str>, &'a Table)> {
        match *self {
            MethodTables::Single(table) => vec![(None, table)],
            MethodTables::PerText { tables, .. } => tables
                .iter()
                .map(|(text, table)| (Some(text.as_str()), table))
                .collect(),
        }
    }
}

/// Join `human` to `method` on the identifier `resolver` finds.
///
/// The method table's identifier column is picked once from
/// `method_fields.id_candidates`. Duplicate method identifiers keep their
/// first row.
pub fn join_tables(
    corpus: &str,
    human: &Table,
    method: &Table,
    resolver: &dyn IdentifierResolver,
    human_fields: &HumanFields,
    method_fields: &MethodFields,
) -> AgreementResult<ComparisonTable> {
    join_method_tables(
        corpus,
        human,
        MethodTables::Single(method),
        resolver,
        human_fields,
        method_fields,
    )
}

/// Join `human` to one or more method tables.
///
/// With [`MethodTables::PerText`] every text's table picks its own
/// identifier column, and a row joins only within the text it names. All
/// joined rows are pooled into one table.
pub fn join_method_tables(
    corpus: &str,
    human: &Table,
    method: MethodTables<'_>,
    resolver: &dyn IdentifierResolver,
    human_fields: &HumanFields,
    method_fields: &MethodFields,
) -> AgreementResult<ComparisonTable> {
    let sources = method.tables();
    let candidates = method_fields.candidate_keys();

    let mut keys = Vec::new();
    let mut by_unit: HashMap<(Option<&str>, UnitId), &Record> = HashMap::new();
    for &(text, table) in &sources {
        let key = candidates.resolver_for(table).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "method table for '{}'{} has none of the identifier columns {:?}",
                corpus,
                text.map(|t| format!(" text '{}'", t)).unwrap_or_default(),
                method_fields.id_candidates
            ))
        })?;

        for record in table.records() {
            let Some(unit) = key.resolve(record) else {
                debug!(corpus, text, position = record.position, "method row without identifier");
                continue;
            };
            if by_unit.contains_key(&(text, unit)) {
                debug!(corpus, text, %unit, "duplicate method row ignored");
                continue;
            }
            by_unit.insert((text, unit), record);
        }

        keys.push(match text {
            Some(text) => format!("{}: {}", text, key.column()),
            None => key.column().to_string(),
        });
    }

    let methods: Vec<Source> = Source::METHODS
        .into_iter()
        .filter(|source| {
            let column = method_column(method_fields, *source);
            sources.iter().any(|(_, table)| table.has_column(column))
        })
        .collect();

    let mut report = ResolutionReport {
        strategy: resolver.describe(),
        method_key: keys.join(", "),
        ..Default::default()
    };
    let mut rows = Vec::new();

    for record in human.records() {
        let text = match method {
            MethodTables::Single(_) => None,
            MethodTables::PerText { field, tables } => {
                let named = record.text(field);
                let Some((text, _)) = named.as_deref().and_then(|n| tables.get_key_value(n.trim()))
                else {
                    warn!(
                        corpus,
                        position = record.position,
                        text = named.as_deref().unwrap_or(""),
                        "row names no known text, skipped"
                    );
                    report.unknown_text.push(record.position);
                    continue;
                };
                Some(text.as_str())
            }
        };
        let Some(unit) = resolver.resolve(record) else {
            warn!(corpus, position = record.position, "unresolvable identifier, row skipped");
            report.unresolvable.push(record.position);
            continue;
        };
        let Some(method_row) = by_unit.get(&(text, unit)) else {
            warn!(corpus, text, %unit, "no method output for unit, row skipped");
            report.unmatched.push(unit);
            continue;
        };

        rows.push(ComparisonRow {
            text: text.map(str::to_string),
            unit,
            human1: parse_ranked(record.text(&human_fields.human1).as_deref()),
            human2: parse_ranked(record.text(&human_fields.human2).as_deref()),
            embedding: primary_label(method_row.text(&method_fields.embedding).as_deref()),
            lexicon: primary_label(method_row.text(&method_fields.lexicon).as_deref()),
        });
    }

    report.joined = rows.len();
    info!(
        corpus,
        joined = report.joined,
        unknown_text = report.unknown_text.len(),
        unresolvable = report.unresolvable.len(),
        unmatched = report.unmatched.len(),
        "joined human annotations to method outputs"
    );

    Ok(ComparisonTable {
        corpus: corpus.to_string(),
        rows,
        methods,
        resolution: report,
    })
}

fn method_column(fields: &MethodFields, source: Source) -> &str {
    match source {
        Source::Lexicon => &fields.lexicon,
        _ => &fields.embedding,
    }
}
