//! Ranked label parsing and base-category projection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a foundation and its polarity (`care.virtue`).
pub const CATEGORY_DELIMITER: char = '.';

/// An ordered, first-ranked-first list of labels from one annotation.
///
/// Produced by [`parse_ranked`]; never contains empty entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedLabels(Vec<String>);

impl RankedLabels {
    pub fn new(labels: Vec<String>) -> Self {
        Self(
            labels
                .into_iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        )
    }

    /// The first-ranked label.
    ///
    /// A first line that itself carries a comma-separated tail
    /// (`"care.virtue, loyalty.vice"`) contributes only its head.
    pub fn primary(&self) -> Option<&str> {
        let first = self.0.first()?;
        let head = first.split(',').next().unwrap_or_default().trim();
        if head.is_empty() {
            None
        } else {
            Some(head)
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a raw annotation into its ranked labels.
///
/// Multi-line text splits on newlines, otherwise on commas. Segments are
/// trimmed and empty ones dropped. `None` or blank input gives an empty list.
pub fn parse_ranked(raw: Option<&str>) -> RankedLabels {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return RankedLabels::default();
    };

    let segments: Vec<&str> = if text.contains('\n') {
        text.split('\n').collect()
    } else {
        text.split(',').collect()
    };

    RankedLabels(
        segments
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Convenience: the primary label of a raw annotation, if any.
pub fn primary_label(raw: Option<&str>) -> Option<String> {
    parse_ranked(raw).primary().map(str::to_string)
}

/// The foundation part of a label: everything before the first `.`.
pub fn base_category(label: &str) -> &str {
    match label.split_once(CATEGORY_DELIMITER) {
        Some((base, _)) => base,
        None => label,
    }
}

/// Label comparison granularity.
///
/// Every label statistic is computed at exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Full `foundation.polarity` label
    #[default]
    Exact,
    /// Foundation only
    Base,
}

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::Exact, Granularity::Base];

    /// Project a label to this granularity.
    pub fn apply<'a>(&self, label: &'a str) -> &'a str {
        match self {
            Granularity::Exact => label,
            Granularity::Base => base_category(label),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Exact => write!(f, "exact (foundation.polarity)"),
            Granularity::Base => write!(f, "base (foundation only)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_splits_on_newlines_in_order() {
        let ranked = parse_ranked(Some("care.virtue\nfairness.vice\n loyalty.virtue "));
        assert_eq!(
            ranked.labels(),
            &["care.virtue", "fairness.vice", "loyalty.virtue"]
        );
        assert_eq!(ranked.primary(), Some("care.virtue"));
    }

    #[test]
    fn single_line_splits_on_commas() {
        let ranked = parse_ranked(Some("sanctity.vice, care.vice,authority.virtue"));
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.primary(), Some("sanctity.vice"));
    }

    #[test]
    fn primary_drops_comma_tail_of_first_line() {
        let ranked = parse_ranked(Some("  care.virtue, loyalty.vice\nfairness.virtue"));
        assert_eq!(ranked.primary(), Some("care.virtue"));
        // The ranked list itself keeps whole lines
        assert_eq!(ranked.labels()[0], "care.virtue, loyalty.vice");
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let ranked = parse_ranked(Some("care.virtue\r\nfairness.vice\r\n"));
        assert_eq!(ranked.labels(), &["care.virtue", "fairness.vice"]);
    }

    #[test]
    fn empty_segments_are_dropped() {
        let ranked = parse_ranked(Some("care.virtue,, ,fairness.vice,"));
        assert_eq!(ranked.labels(), &["care.virtue", "fairness.vice"]);

        let ranked = parse_ranked(Some("care.virtue\n\n  \nfairness.vice"));
        assert_eq!(ranked.labels(), &["care.virtue", "fairness.vice"]);
    }

    #[test]
    fn absent_or_blank_yields_nothing() {
        assert!(parse_ranked(None).is_empty());
        assert!(parse_ranked(Some("")).is_empty());
        assert!(parse_ranked(Some("  \n \t")).is_empty());
        assert_eq!(primary_label(None), None);
        assert_eq!(primary_label(Some(" , ")), None);
    }

    #[test]
    fn base_category_takes_prefix_before_first_dot() {
        assert_eq!(base_category("care.virtue"), "care");
        assert_eq!(base_category("liberty.vice.extra"), "liberty");
        assert_eq!(base_category("care"), "care");
        assert_eq!(base_category(""), "");
    }

    #[test]
    fn base_category_is_idempotent() {
        for label in ["care.virtue", "fairness", "a.b.c", ".leading", ""] {
            let once = base_category(label);
            assert_eq!(base_category(once), once);
        }
    }

    #[test]
    fn granularity_projects_labels() {
        assert_eq!(Granularity::Exact.apply("care.virtue"), "care.virtue");
        assert_eq!(Granularity::Base.apply("care.virtue"), "care");
    }

    #[test]
    fn ranked_labels_new_drops_blanks() {
        let ranked = RankedLabels::new(vec![" a ".into(), "".into(), "b".into()]);
        assert_eq!(ranked.labels(), &["a", "b"]);
    }
}
