//! Safeguard cost and residual loss policies
//!
//! Neither figure has a real cost model behind it yet, so both are traits
//! the engine is parameterised over. The defaults are fixed ratios.

use crate::error::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};

/// Estimates the annual cost of safeguards (ACS) for an asset
pub trait SafeguardCostPolicy: Send + Sync {
    /// ACS for an asset worth `asset_value`
    fn annual_cost(&self, asset_value: f64) -> f64;
}

/// Estimates the annualized loss expectancy left once controls are in place
pub trait ResidualRiskPolicy: Send + Sync {
    /// ALE' for a pre-control `ale`
    fn residual_ale(&self, ale: f64) -> f64;
}

/// ACS as a fixed share of asset value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSafeguardRatio(pub f64);

impl Default for FixedSafeguardRatio {
    fn default() -> Self {
        Self(0.10)
    }
}

impl SafeguardCostPolicy for FixedSafeguardRatio {
    fn annual_cost(&self, asset_value: f64) -> f64 {
        asset_value * self.0
    }
}

/// Residual ALE as a fixed share of ALE
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedResidualRatio(pub f64);

impl Default for FixedResidualRatio {
    fn default() -> Self {
        Self(0.20)
    }
}

impl ResidualRiskPolicy for FixedResidualRatio {
    fn residual_ale(&self, ale: f64) -> f64 {
        ale * self.0
    }
}

/// Ratios for the fixed-ratio policies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Share of asset value spent on safeguards each year
    pub safeguard_cost_ratio: f64,
    /// Share of ALE remaining after controls
    pub residual_loss_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { safeguard_cost_ratio: 0.10, residual_loss_ratio: 0.20 }
    }
}

impl EngineConfig {
    /// Both ratios must lie in 0.0-1.0
    pub fn validate(&self) -> ScoringResult<()> {
        for (name, ratio) in [
            ("safeguard_cost_ratio", self.safeguard_cost_ratio),
            ("residual_loss_ratio", self.residual_loss_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ScoringError::Config(format!("{} must be 0.0-1.0, got {}", name, ratio)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratios() {
        assert_eq!(FixedSafeguardRatio::default().annual_cost(2500.0), 250.0);
        assert_eq!(FixedResidualRatio::default().residual_ale(500.0), 100.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::default().validate().is_ok());
        let bad = EngineConfig { safeguard_cost_ratio: 1.5, ..Default::default() };
        assert!(bad.validate().is_err());
        let nan = EngineConfig { residual_loss_ratio: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
    }
}
