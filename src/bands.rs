//! Reporting bands
//!
//! Verbal labels attached to numeric results for presentation. They are
//! reporting conventions, not statistical claims: a "strong" correlation over
//! ten categories is still a statement about ten numbers.

use serde::Serialize;
use std::fmt;

/// Significance band for a two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// p < 0.001
    HighlySignificant,
    /// p < 0.01
    VerySignificant,
    /// p < 0.05
    Significant,
    NotSignificant,
}

impl Significance {
    pub fn from_p(p: f64) -> Self {
        if p < 0.001 {
            Significance::HighlySignificant
        } else if p < 0.01 {
            Significance::VerySignificant
        } else if p < 0.05 {
            Significance::Significant
        } else {
            Significance::NotSignificant
        }
    }

    /// Star notation (`***`, `**`, `*`, `ns`)
    pub fn marker(&self) -> &'static str {
        match self {
            Significance::HighlySignificant => "***",
            Significance::VerySignificant => "**",
            Significance::Significant => "*",
            Significance::NotSignificant => "ns",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Significance::HighlySignificant => "highly significant",
            Significance::VerySignificant => "very significant",
            Significance::Significant => "significant",
            Significance::NotSignificant => "not significant",
        };
        write!(f, "{}", label)
    }
}

/// Band for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    /// ρ > 0.7
    Strong,
    /// ρ > 0.4
    Moderate,
    /// ρ > 0
    Weak,
    /// ρ ≤ 0
    Negative,
}

impl CorrelationStrength {
    pub fn from_rho(rho: f64) -> Self {
        if rho > 0.7 {
            CorrelationStrength::Strong
        } else if rho > 0.4 {
            CorrelationStrength::Moderate
        } else if rho > 0.0 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Negative
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CorrelationStrength::Strong => "strong positive",
            CorrelationStrength::Moderate => "moderate positive",
            CorrelationStrength::Weak => "weak positive",
            CorrelationStrength::Negative => "negative",
        };
        write!(f, "{}", label)
    }
}

/// Band for a Jensen-Shannon figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceBand {
    /// JSD < 0.1
    VerySimilar,
    /// JSD < 0.3
    ModeratelyDifferent,
    VeryDifferent,
}

impl DivergenceBand {
    pub fn from_jsd(jsd: f64) -> Self {
        if jsd < 0.1 {
            DivergenceBand::VerySimilar
        } else if jsd < 0.3 {
            DivergenceBand::ModeratelyDifferent
        } else {
            DivergenceBand::VeryDifferent
        }
    }
}

impl fmt::Display for DivergenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DivergenceBand::VerySimilar => "very similar",
            DivergenceBand::ModeratelyDifferent => "moderately different",
            DivergenceBand::VeryDifferent => "very different",
        };
        write!(f, "{}", label)
    }
}

/// Landis & Koch band for Cohen's Kappa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KappaBand {
    Poor,
    Slight,
    Fair,
    Moderate,
    Substantial,
    AlmostPerfect,
}

impl KappaBand {
    pub fn from_kappa(kappa: f64) -> Self {
        if kappa < 0.0 {
            KappaBand::Poor
        } else if kappa <= 0.2 {
            KappaBand::Slight
        } else if kappa <= 0.4 {
            KappaBand::Fair
        } else if kappa <= 0.6 {
            KappaBand::Moderate
        } else if kappa <= 0.8 {
            KappaBand::Substantial
        } else {
            KappaBand::AlmostPerfect
        }
    }
}

impl fmt::Display for KappaBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KappaBand::Poor => "poor",
            KappaBand::Slight => "slight",
            KappaBand::Fair => "fair",
            KappaBand::Moderate => "moderate",
            KappaBand::Substantial => "substantial",
            KappaBand::AlmostPerfect => "almost perfect",
        };
        write!(f, "{}", label)
    }
}
