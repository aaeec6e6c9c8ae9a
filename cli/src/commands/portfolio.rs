//! Portfolio command

use super::read_document;
use crate::output::{self, FieldRow, OutputFormat};
use anyhow::Context;
use rasbita_core::{
    format_currency, NamedAsset, PortfolioAssessment, RawAssessmentInput, RiskAssessmentInput,
    RiskScoringEngine,
};
use serde::Deserialize;
use std::path::Path;
use tabled::Tabled;

/// Portfolio file: `assets` is a list of form payloads with a `name`
#[derive(Debug, Deserialize)]
pub struct PortfolioFile {
    pub assets: Vec<RawNamedAsset>,
}

#[derive(Debug, Deserialize)]
pub struct RawNamedAsset {
    pub name: String,
    #[serde(flatten)]
    pub input: RawAssessmentInput,
}

impl PortfolioFile {
    pub fn validate(self) -> anyhow::Result<Vec<NamedAsset>> {
        self.assets
            .into_iter()
            .map(|asset| {
                let input = RiskAssessmentInput::try_from(asset.input)
                    .with_context(|| format!("asset {}", asset.name))?;
                Ok(NamedAsset { name: asset.name, input })
            })
            .collect()
    }
}

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "ALE")]
    ale: String,
    #[tabled(rename = "ACS")]
    acs: String,
    #[tabled(rename = "NRRB")]
    nrrb: String,
}

pub fn handle(file: &Path, engine: &RiskScoringEngine, format: OutputFormat) -> anyhow::Result<()> {
    let portfolio: PortfolioFile = read_document(file)?;
    let assets = portfolio.validate().with_context(|| format!("validating {}", file.display()))?;
    let assessment = PortfolioAssessment::assess(engine, &assets);

    if format != OutputFormat::Table {
        return format.print(&assessment);
    }

    let rows = assessment.ranked().into_iter().map(|a| AssetRow {
        name: a.name.clone(),
        priority: a.result.priority_tier.to_string(),
        ale: format_currency(a.result.annualized_loss_expectancy),
        acs: format_currency(a.result.annual_cost_of_safeguard),
        nrrb: format_currency(a.result.net_risk_reduction_benefit),
    });
    println!("{}", output::render(rows));

    let s = &assessment.summary;
    let summary = [
        FieldRow::new("Assets", s.total.to_string()),
        FieldRow::new("Critical / High / Medium / Low", format!("{} / {} / {} / {}", s.critical, s.high, s.medium, s.low)),
        FieldRow::new("Total asset value", format_currency(s.total_asset_value)),
        FieldRow::new("Total ALE", format_currency(s.total_ale)),
        FieldRow::new("Total NRRB", format_currency(s.total_nrrb)),
        FieldRow::new("Safeguards justified", format!("{} of {}", s.justified, s.total)),
    ];
    println!("{}", output::render(summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_file_validation_names_asset() {
        let file: PortfolioFile = serde_json::from_str(
            r#"{"assets": [
                {"name": "ok", "incident_category": "ransomware", "device_type": "server",
                 "data_classification": "phi", "usage_frequency": "daily", "data_loss_band": "1_20",
                 "occurrence_rate": 1.0, "damaged_device_count": 1, "total_device_count": 1,
                 "total_record_count": 10},
                {"name": "broken", "device_type": "server"}
            ]}"#,
        )
        .unwrap();
        let err = file.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("asset broken"));
    }

    #[test]
    fn test_portfolio_file_from_toml() {
        let file: PortfolioFile = toml::from_str(
            r#"
            [[assets]]
            name = "pos"
            incident_category = "malware_workstation"
            device_type = "workstation"
            data_classification = "payment_card"
            usage_frequency = "often"
            data_loss_band = "61_80"
            occurrence_rate = 0.25
            damaged_device_count = 3
            total_device_count = 12
            total_record_count = 4000
            "#,
        )
        .unwrap();
        let assets = file.validate().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "pos");
    }
}
