//! Priority classification
//!
//! Two independent scales: the per-asset [`PriorityTier`] derived from data
//! sensitivity and usage, and the report-level [`OverallRiskTier`] derived
//! from an aggregate percentage score.

use crate::error::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-asset priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    /// Combined score below 10
    Low,
    /// 10 to under 30
    Medium,
    /// 30 to under 60
    High,
    /// 60 and above
    Critical,
}

impl PriorityTier {
    /// Classify `sensitivity x usage`; bands are evaluated high to low
    pub fn from_combined_score(score: f64) -> Self {
        if score >= 60.0 {
            Self::Critical
        } else if score >= 30.0 {
            Self::High
        } else if score >= 10.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report-level tier for the overall percentage risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OverallRiskTier {
    /// Above 46
    P1,
    /// 36 to 46
    P2,
    /// 21 to under 36
    P3,
    /// Under 21
    P4,
}

impl OverallRiskTier {
    /// Description shown next to the tier
    pub fn label(&self) -> &'static str {
        match self {
            Self::P1 => "Critical - disclosure of restricted information",
            Self::P2 => "High - disclosure of non-restricted information",
            Self::P3 => "Medium - minimal impact, non-restricted disclosure",
            Self::P4 => "Low - informational",
        }
    }

    /// Matching per-asset tier name
    pub fn severity(&self) -> PriorityTier {
        match self {
            Self::P1 => PriorityTier::Critical,
            Self::P2 => PriorityTier::High,
            Self::P3 => PriorityTier::Medium,
            Self::P4 => PriorityTier::Low,
        }
    }
}

impl fmt::Display for OverallRiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Tier and label for an overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRiskClassification {
    /// Score as given
    pub score: f64,
    /// Tier the score falls in
    pub tier: OverallRiskTier,
    /// `tier.label()`
    pub label: String,
}

/// Classify an overall percentage score (0-100).
///
/// `> 46` is P1, so exactly 46 is P2. Scores between the tabulated integer
/// bands fall to the lower tier (35.99 is P3, 20.99 is P4).
pub fn classify_overall_risk_score(score: f64) -> ScoringResult<OverallRiskClassification> {
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(ScoringError::invalid("overall_score"));
    }

    let tier = if score > 46.0 {
        OverallRiskTier::P1
    } else if score >= 36.0 {
        OverallRiskTier::P2
    } else if score >= 21.0 {
        OverallRiskTier::P3
    } else {
        OverallRiskTier::P4
    };

    Ok(OverallRiskClassification { score, tier, label: tier.label().to_string() })
}
