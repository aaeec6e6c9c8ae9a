//! Assess command

use super::read_document;
use crate::output::{self, FieldRow, OutputFormat};
use anyhow::Context;
use rasbita_core::{AssessmentReport, RawAssessmentInput, RiskAssessmentInput, RiskScoringEngine};
use std::path::Path;

pub fn handle(file: &Path, engine: &RiskScoringEngine, format: OutputFormat) -> anyhow::Result<()> {
    let raw: RawAssessmentInput = read_document(file)?;
    let input = RiskAssessmentInput::try_from(raw)
        .with_context(|| format!("validating {}", file.display()))?;
    let report = AssessmentReport::generate(engine, input);

    match format {
        OutputFormat::Table => print_report(engine, &report),
        _ => format.print(&report)?,
    }
    Ok(())
}

fn print_report(engine: &RiskScoringEngine, report: &AssessmentReport) {
    let tables = engine.tables();
    let input = &report.input;
    let name_or_code = |name: Option<&String>, code: &str| {
        name.cloned().unwrap_or_else(|| format!("{} (unlisted)", code))
    };

    let context = [
        FieldRow::new(
            "Incident",
            name_or_code(tables.incident(&input.incident_category).map(|p| &p.display_name), input.incident_category.code()),
        ),
        FieldRow::new(
            "Device",
            name_or_code(tables.device(&input.device_type).map(|p| &p.display_name), input.device_type.code()),
        ),
        FieldRow::new(
            "Data",
            name_or_code(tables.data_profile(&input.data_classification).map(|p| &p.display_name), input.data_classification.code()),
        ),
        FieldRow::new(
            "Devices damaged",
            format!("{} of {}", input.damaged_device_count, input.total_device_count),
        ),
        FieldRow::new("Records", input.total_record_count.to_string()),
        FieldRow::new("Occurrence", input.occurrence_rate.to_string()),
        FieldRow::new("Threat severity", format!("{:?}", report.threat_severity)),
    ];
    println!("{}", output::render(context));

    let metrics = report.metric_rows().into_iter().map(|(label, value)| FieldRow::new(label, value));
    println!("{}", output::render(metrics));

    println!("Priority: {}", output::tier_badge(report.result.priority_tier));
    println!("Verdict:  {}", output::verdict_badge(report.verdict));
    println!(
        "Feasibility: {}/4 (organizational {}, behavioral {}, technical {}, political {})",
        report.feasibility.count(),
        yes_no(report.feasibility.organizational),
        yes_no(report.feasibility.behavioral),
        yes_no(report.feasibility.technical),
        yes_no(report.feasibility.political),
    );
    println!("Report: {}", report.id);
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
