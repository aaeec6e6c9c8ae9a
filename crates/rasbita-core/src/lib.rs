//! RASBITA Risk Scoring
//!
//! Quantitative cyber-risk scoring for individual assets: asset value, loss
//! expectancy, safeguard cost and the net benefit of putting controls in
//! place.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        RISK SCORING ENGINE                           │
//! │                                                                      │
//! │  ┌──────────────┐   ┌──────────────┐   ┌────────────────────────┐   │
//! │  │  Form input  │──►│  Validated   │──►│   Financial chain      │   │
//! │  │   (raw)      │   │    input     │   │  AV → SLE → ALE → NRRB │   │
//! │  └──────────────┘   └──────┬───────┘   └───────────┬────────────┘   │
//! │                            │                       │                │
//! │  ┌──────────────┐   ┌──────▼───────┐   ┌───────────▼────────────┐   │
//! │  │  Reference   │──►│   Priority   │──►│   Result / Report /    │   │
//! │  │   tables     │   │    tier      │   │   Portfolio summary    │   │
//! │  └──────────────┘   └──────────────┘   └────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: no I/O outside [`ReferenceTables::load`], no
//! mutable state, and identical input always yields identical output.
//!
//! ```
//! use rasbita_core::*;
//!
//! let input = RiskAssessmentInput {
//!     incident_category: IncidentCategory::UnauthorizedExternal,
//!     device_type: DeviceType::Workstation,
//!     data_classification: DataClassification::Phi,
//!     usage_frequency: UsageFrequency::Daily,
//!     data_loss_band: DataLossBand::UpTo40,
//!     occurrence_rate: OccurrenceRate::EveryTwoYears,
//!     damaged_device_count: 1,
//!     total_device_count: 1,
//!     total_record_count: 1000,
//!     feasibility: Feasibility::default(),
//! };
//!
//! let result = assess(&input);
//! assert_eq!(result.priority_tier, PriorityTier::Critical);
//! assert_eq!(result.verdict(), SafeguardVerdict::Justified);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codes;
pub mod engine;
pub mod error;
pub mod input;
pub mod policy;
pub mod portfolio;
pub mod priority;
pub mod report;
pub mod tables;

pub use codes::*;
pub use engine::{RiskAssessmentResult, RiskScoringEngine, SafeguardVerdict};
pub use error::*;
pub use input::{Feasibility, RawAssessmentInput, RiskAssessmentInput};
pub use policy::{EngineConfig, FixedResidualRatio, FixedSafeguardRatio, ResidualRiskPolicy, SafeguardCostPolicy};
pub use portfolio::{AssetAssessment, NamedAsset, PortfolioAssessment, PortfolioSummary};
pub use priority::{classify_overall_risk_score, OverallRiskClassification, OverallRiskTier, PriorityTier};
pub use report::{format_currency, AssessmentReport};
pub use tables::{ReferenceTables, ThreatSeverity};

/// Assess one asset against the standard reference tables
pub fn assess(input: &RiskAssessmentInput) -> RiskAssessmentResult {
    RiskScoringEngine::default().assess(input)
}
