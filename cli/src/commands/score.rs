//! Overall score classification

use crate::output::{self, OutputFormat};
use rasbita_core::classify_overall_risk_score;

pub fn handle(score: f64, format: OutputFormat) -> anyhow::Result<()> {
    let classification = classify_overall_risk_score(score)?;

    match format {
        OutputFormat::Table => println!(
            "{} {} ({})",
            classification.tier,
            output::tier_badge(classification.tier.severity()),
            classification.label
        ),
        _ => format.print(&classification)?,
    }
    Ok(())
}
