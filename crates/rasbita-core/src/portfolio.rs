//! Portfolio assessment
//!
//! Scores a set of named assets and rolls them up per priority tier.

use crate::engine::{RiskAssessmentResult, RiskScoringEngine, SafeguardVerdict};
use crate::input::RiskAssessmentInput;
use crate::priority::PriorityTier;
use serde::{Deserialize, Serialize};

/// Asset entry in a portfolio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAsset {
    /// Asset name
    pub name: String,
    /// Scoring input, flattened into the entry
    #[serde(flatten)]
    pub input: RiskAssessmentInput,
}

/// Scored asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetAssessment {
    /// Asset name
    pub name: String,
    /// Scoring chain output
    pub result: RiskAssessmentResult,
}

/// Roll-up across assessed assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of assets
    pub total: usize,
    /// Assets in the Critical tier
    pub critical: usize,
    /// Assets in the High tier
    pub high: usize,
    /// Assets in the Medium tier
    pub medium: usize,
    /// Assets in the Low tier
    pub low: usize,
    /// Sum of AV
    pub total_asset_value: f64,
    /// Sum of ALE
    pub total_ale: f64,
    /// Sum of NRRB
    pub total_nrrb: f64,
    /// Assets whose safeguard spend is cost-justified
    pub justified: usize,
}

/// Assessed assets plus their summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioAssessment {
    /// Per-asset results in input order
    pub assets: Vec<AssetAssessment>,
    /// Roll-up of `assets`
    pub summary: PortfolioSummary,
}

impl PortfolioAssessment {
    /// Assess every asset, keeping input order
    pub fn assess(engine: &RiskScoringEngine, assets: &[NamedAsset]) -> Self {
        let assets: Vec<_> = assets
            .iter()
            .map(|a| AssetAssessment { name: a.name.clone(), result: engine.assess(&a.input) })
            .collect();
        let summary = PortfolioSummary::from_results(assets.iter().map(|a| &a.result));
        tracing::debug!(total = summary.total, critical = summary.critical, "Assessed portfolio");
        Self { assets, summary }
    }

    /// Assets sorted by priority, then by ALE, highest first
    pub fn ranked(&self) -> Vec<&AssetAssessment> {
        let mut ranked: Vec<_> = self.assets.iter().collect();
        ranked.sort_by(|a, b| {
            b.result
                .priority_tier
                .cmp(&a.result.priority_tier)
                .then(b.result.annualized_loss_expectancy.total_cmp(&a.result.annualized_loss_expectancy))
        });
        ranked
    }
}

impl PortfolioSummary {
    /// Fold results into tier counts and totals
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a RiskAssessmentResult>) -> Self {
        results.into_iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            match r.priority_tier {
                PriorityTier::Critical => s.critical += 1,
                PriorityTier::High => s.high += 1,
                PriorityTier::Medium => s.medium += 1,
                PriorityTier::Low => s.low += 1,
            }
            s.total_asset_value += r.asset_value;
            s.total_ale += r.annualized_loss_expectancy;
            s.total_nrrb += r.net_risk_reduction_benefit;
            if r.verdict() == SafeguardVerdict::Justified {
                s.justified += 1;
            }
            s
        })
    }
}
