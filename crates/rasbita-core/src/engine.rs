//! Risk Scoring Engine
//!
//! Quantitative risk chain for a single asset:
//!
//! ```text
//! asset value ──► SLE = AV × EF ──► ALE = SLE × ARO ──► NRRB = (ALE − ALE') − ACS
//!      │                                   │                       ▲
//!      └──────────► ACS (policy) ──────────┼───────────────────────┘
//!                                          └──► ALE' (policy)
//!
//! sensitivity × usage ──► priority tier        (independent of the chain)
//! ```
//!
//! The engine holds no mutable state and is safe to share across threads.

use crate::codes::{DataClassification, DataLossBand, OccurrenceRate, UsageFrequency};
use crate::error::ScoringResult;
use crate::input::{RawAssessmentInput, RiskAssessmentInput};
use crate::policy::{
    EngineConfig, FixedResidualRatio, FixedSafeguardRatio, ResidualRiskPolicy, SafeguardCostPolicy,
};
use crate::priority::PriorityTier;
use crate::tables::ReferenceTables;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Whether safeguard spend pays for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafeguardVerdict {
    /// NRRB > 0
    Justified,
    /// NRRB == 0
    BreakEven,
    /// NRRB < 0
    NotJustified,
}

impl SafeguardVerdict {
    /// Read the exact sign of NRRB
    pub fn from_nrrb(nrrb: f64) -> Self {
        if nrrb > 0.0 {
            Self::Justified
        } else if nrrb < 0.0 {
            Self::NotJustified
        } else {
            Self::BreakEven
        }
    }
}

impl fmt::Display for SafeguardVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Justified => "Safeguard justified",
            Self::BreakEven => "Break-even",
            Self::NotJustified => "Safeguard not cost-justified",
        })
    }
}

/// Quantified risk for one asset, fields in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    /// AV
    pub asset_value: f64,
    /// EF, 0.0-1.0
    pub exposure_factor: f64,
    /// SLE = AV x EF
    pub single_loss_expectancy: f64,
    /// ARO
    pub annualized_rate_of_occurrence: f64,
    /// ALE = SLE x ARO
    pub annualized_loss_expectancy: f64,
    /// ACS
    pub annual_cost_of_safeguard: f64,
    /// ALE'
    pub annualized_loss_expectancy_after_controls: f64,
    /// NRRB = (ALE - ALE') - ACS; may be negative
    pub net_risk_reduction_benefit: f64,
    /// Sensitivity weight times usage weight
    pub combined_score: f64,
    /// Tier for `combined_score`
    pub priority_tier: PriorityTier,
}

impl RiskAssessmentResult {
    /// Verdict from the sign of NRRB
    pub fn verdict(&self) -> SafeguardVerdict {
        SafeguardVerdict::from_nrrb(self.net_risk_reduction_benefit)
    }

    /// ALE removed by controls
    pub fn risk_reduction(&self) -> f64 {
        self.annualized_loss_expectancy - self.annualized_loss_expectancy_after_controls
    }
}

/// Pure risk scoring engine
#[derive(Clone)]
pub struct RiskScoringEngine {
    tables: Arc<ReferenceTables>,
    safeguard: Arc<dyn SafeguardCostPolicy>,
    residual: Arc<dyn ResidualRiskPolicy>,
}

impl RiskScoringEngine {
    /// Engine over the given tables with the default 10% / 20% policies
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self {
            tables,
            safeguard: Arc::new(FixedSafeguardRatio::default()),
            residual: Arc::new(FixedResidualRatio::default()),
        }
    }

    /// Engine with fixed-ratio policies taken from config
    pub fn with_config(tables: Arc<ReferenceTables>, config: &EngineConfig) -> ScoringResult<Self> {
        config.validate()?;
        Ok(Self::new(tables).with_policies(
            FixedSafeguardRatio(config.safeguard_cost_ratio),
            FixedResidualRatio(config.residual_loss_ratio),
        ))
    }

    /// Swap in custom safeguard and residual policies
    pub fn with_policies(
        mut self,
        safeguard: impl SafeguardCostPolicy + 'static,
        residual: impl ResidualRiskPolicy + 'static,
    ) -> Self {
        self.safeguard = Arc::new(safeguard);
        self.residual = Arc::new(residual);
        self
    }

    /// Tables the engine looks codes up in
    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// `replacement × damaged + (records × EF) × threat cost`
    pub fn compute_asset_value(&self, input: &RiskAssessmentInput) -> f64 {
        let device_term =
            self.tables.replacement_cost(&input.device_type) * input.damaged_device_count as f64;
        let data_contribution =
            input.total_record_count as f64 * self.resolve_exposure_factor(&input.data_loss_band);
        device_term + data_contribution * self.tables.threat_cost(&input.incident_category)
    }

    /// EF for a loss band, or the fallback
    pub fn resolve_exposure_factor(&self, band: &DataLossBand) -> f64 {
        self.tables.exposure_factor(band)
    }

    /// SLE = AV x EF
    pub fn compute_single_loss_expectancy(asset_value: f64, exposure_factor: f64) -> f64 {
        asset_value * exposure_factor
    }

    /// ALE = SLE x ARO
    pub fn compute_annualized_loss_expectancy(sle: f64, aro: OccurrenceRate) -> f64 {
        sle * aro.rate()
    }

    /// ACS from the safeguard policy
    pub fn compute_safeguard_cost(&self, asset_value: f64) -> f64 {
        self.safeguard.annual_cost(asset_value)
    }

    /// ALE' from the residual policy
    pub fn compute_residual_ale(&self, ale: f64) -> f64 {
        self.residual.residual_ale(ale)
    }

    /// Positive means the safeguard is cost-justified
    pub fn compute_net_risk_reduction_benefit(ale: f64, ale_after: f64, acs: f64) -> f64 {
        (ale - ale_after) - acs
    }

    /// Combined score of data sensitivity and usage
    pub fn combined_score(&self, classification: &DataClassification, usage: &UsageFrequency) -> f64 {
        let sensitivity = self.tables.sensitivity_weight(classification) as f64;
        sensitivity * self.tables.usage_weight(usage) as f64
    }

    /// Tier for the combined score
    pub fn classify_priority(&self, classification: &DataClassification, usage: &UsageFrequency) -> PriorityTier {
        PriorityTier::from_combined_score(self.combined_score(classification, usage))
    }

    /// Run the full chain for one asset
    pub fn assess(&self, input: &RiskAssessmentInput) -> RiskAssessmentResult {
        if !input.device_counts_consistent() {
            tracing::warn!(
                damaged = input.damaged_device_count,
                total = input.total_device_count,
                "Damaged device count exceeds total device count"
            );
        }

        let exposure_factor = self.resolve_exposure_factor(&input.data_loss_band);
        let asset_value = self.compute_asset_value(input);
        let sle = Self::compute_single_loss_expectancy(asset_value, exposure_factor);
        let ale = Self::compute_annualized_loss_expectancy(sle, input.occurrence_rate);
        let acs = self.compute_safeguard_cost(asset_value);
        let ale_after = self.compute_residual_ale(ale);
        let nrrb = Self::compute_net_risk_reduction_benefit(ale, ale_after, acs);

        let combined_score = self.combined_score(&input.data_classification, &input.usage_frequency);
        let priority_tier = PriorityTier::from_combined_score(combined_score);

        tracing::trace!(asset_value, sle, ale, acs, ale_after, nrrb, %priority_tier, "Assessed asset");

        RiskAssessmentResult {
            asset_value,
            exposure_factor,
            single_loss_expectancy: sle,
            annualized_rate_of_occurrence: input.occurrence_rate.rate(),
            annualized_loss_expectancy: ale,
            annual_cost_of_safeguard: acs,
            annualized_loss_expectancy_after_controls: ale_after,
            net_risk_reduction_benefit: nrrb,
            combined_score,
            priority_tier,
        }
    }

    /// Validate a form payload, then assess it
    pub fn assess_raw(&self, raw: RawAssessmentInput) -> ScoringResult<RiskAssessmentResult> {
        let input = RiskAssessmentInput::try_from(raw)?;
        Ok(self.assess(&input))
    }
}

impl Default for RiskScoringEngine {
    fn default() -> Self {
        Self::new(ReferenceTables::standard())
    }
}

impl fmt::Debug for RiskScoringEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskScoringEngine")
            .field("incidents", &self.tables.incidents.len())
            .field("devices", &self.tables.devices.len())
            .finish_non_exhaustive()
    }
}
