//! Assessment reports
//!
//! Bundles input and result into the record a persistence layer stores, and
//! provides the formatting helpers report renderers share.

use crate::engine::{RiskAssessmentResult, RiskScoringEngine, SafeguardVerdict};
use crate::input::{Feasibility, RiskAssessmentInput};
use crate::tables::ThreatSeverity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scored assessment keyed by an opaque id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Report id
    pub id: Uuid,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Input that was scored
    pub input: RiskAssessmentInput,
    /// Scoring chain output
    pub result: RiskAssessmentResult,
    /// Verdict from the sign of NRRB
    pub verdict: SafeguardVerdict,
    /// Severity band of the incident's threat cost
    pub threat_severity: ThreatSeverity,
    /// Safeguard feasibility copied from the input
    pub feasibility: Feasibility,
}

impl AssessmentReport {
    /// Assess `input` and wrap it in a new report
    pub fn generate(engine: &RiskScoringEngine, input: RiskAssessmentInput) -> Self {
        let result = engine.assess(&input);
        let threat_severity =
            ThreatSeverity::from_cost(engine.tables().threat_cost(&input.incident_category));

        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            verdict: result.verdict(),
            threat_severity,
            feasibility: input.feasibility,
            input,
            result,
        }
    }

    /// Label/value pairs in dependency order, formatted for display
    pub fn metric_rows(&self) -> Vec<(&'static str, String)> {
        let r = &self.result;
        vec![
            ("Asset Value (AV)", format_currency(r.asset_value)),
            ("Exposure Factor (EF)", format!("{:.2}", r.exposure_factor)),
            ("Single Loss Expectancy (SLE)", format_currency(r.single_loss_expectancy)),
            ("Annualized Rate of Occurrence (ARO)", format!("{:.2}", r.annualized_rate_of_occurrence)),
            ("Annualized Loss Expectancy (ALE)", format_currency(r.annualized_loss_expectancy)),
            ("Annual Cost of Safeguard (ACS)", format_currency(r.annual_cost_of_safeguard)),
            ("ALE After Controls", format_currency(r.annualized_loss_expectancy_after_controls)),
            ("Net Risk Reduction Benefit (NRRB)", format_currency(r.net_risk_reduction_benefit)),
            ("Priority", r.priority_tier.to_string()),
        ]
    }
}

/// Format a dollar amount with thousands separators and two decimals.
///
/// The sign is taken from the unrounded value, so a tiny negative amount
/// renders as `-$0.00` rather than losing its sign.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && amount != 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}
