//! Per-category aggregate score vectors

use crate::error::{AgreementError, AgreementResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One scalar per moral-foundation category, for one corpus or text.
///
/// Category order is significant: two vectors compare only when their
/// categories match position by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreVector")]
pub struct ScoreVector {
    name: String,
    categories: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Deserialize)]
struct RawScoreVector {
    name: String,
    scores: Vec<(String, f64)>,
}

impl TryFrom<RawScoreVector> for ScoreVector {
    type Error = AgreementError;

    fn try_from(raw: RawScoreVector) -> Result<Self, Self::Error> {
        ScoreVector::new(raw.name, raw.scores)
    }
}

impl ScoreVector {
    /// Build a vector from ordered (category, score) pairs.
    ///
    /// Duplicate categories and non-finite scores are rejected.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (S, f64)>,
    ) -> AgreementResult<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        let mut scores = Vec::new();

        for (category, score) in entries {
            let category = category.into();
            if !seen.insert(category.clone()) {
                return Err(AgreementError::MisalignedInputs(format!(
                    "duplicate category '{}' in '{}'",
                    category, name
                )));
            }
            if !score.is_finite() {
                return Err(AgreementError::UndefinedStatistic(format!(
                    "non-finite score for '{}' in '{}'",
                    category, name
                )));
            }
            categories.push(category);
            scores.push(score);
        }

        Ok(Self {
            name,
            categories,
            scores,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| self.scores[i])
    }

    /// Fail unless `other` has the same categories in the same order.
    pub fn ensure_aligned(&self, other: &ScoreVector) -> AgreementResult<()> {
        if self.categories.len() != other.categories.len() {
            return Err(AgreementError::MisalignedInputs(format!(
                "'{}' has {} categories, '{}' has {}",
                self.name,
                self.categories.len(),
                other.name,
                other.categories.len()
            )));
        }
        if let Some((i, (a, b))) = self
            .categories
            .iter()
            .zip(&other.categories)
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Err(AgreementError::MisalignedInputs(format!(
                "category {} is '{}' in '{}' but '{}' in '{}'",
                i, a, self.name, b, other.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_categories() {
        let err = ScoreVector::new("aesop", [("care", 0.1), ("care", 0.2)]).unwrap_err();
        assert!(matches!(err, AgreementError::MisalignedInputs(_)));
    }

    #[test]
    fn rejects_non_finite_scores() {
        assert!(ScoreVector::new("aesop", [("care", f64::NAN)]).is_err());
    }

    #[test]
    fn alignment_requires_same_order() {
        let a = ScoreVector::new("a", [("care", 0.1), ("fairness", 0.2)]).unwrap();
        let b = ScoreVector::new("b", [("fairness", 0.2), ("care", 0.1)]).unwrap();
        let c = ScoreVector::new("c", [("care", 0.3), ("fairness", 0.4)]).unwrap();

        assert!(matches!(
            a.ensure_aligned(&b),
            Err(AgreementError::MisalignedInputs(_))
        ));
        assert!(a.ensure_aligned(&c).is_ok());
    }

    #[test]
    fn deserializes_from_ordered_pairs() {
        let yaml = r#"
name: English_Aesop
scores:
  - [care.virtue, 0.41]
  - [fairness.virtue, 0.37]
"#;
        let v: ScoreVector = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(v.name(), "English_Aesop");
        assert_eq!(v.categories(), &["care.virtue", "fairness.virtue"]);
        assert_eq!(v.get("fairness.virtue"), Some(0.37));
    }
}
