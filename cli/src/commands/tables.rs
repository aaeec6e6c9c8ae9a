//! Reference table listing

use crate::output::{self, OutputFormat};
use clap::ValueEnum;
use rasbita_core::{format_currency, tables::loss_band_label, ReferenceTables, RiskScoringEngine};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    Incidents,
    Devices,
    Data,
    Bands,
    Usage,
}

impl TableKind {
    const ALL: [TableKind; 5] = [Self::Incidents, Self::Devices, Self::Data, Self::Bands, Self::Usage];

    fn title(&self) -> &'static str {
        match self {
            Self::Incidents => "Incident categories (threat cost)",
            Self::Devices => "Device types (replacement cost)",
            Self::Data => "Data classifications (sensitivity weight)",
            Self::Bands => "Data loss bands (exposure factor)",
            Self::Usage => "Usage frequency (weight)",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Incidents => "incidents",
            Self::Devices => "devices",
            Self::Data => "data",
            Self::Bands => "loss_bands",
            Self::Usage => "usage",
        }
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn rows(tables: &ReferenceTables, kind: TableKind) -> Vec<EntryRow> {
    match kind {
        TableKind::Incidents => tables
            .incidents
            .iter()
            .map(|(code, p)| EntryRow {
                code: code.to_string(),
                name: p.display_name.clone(),
                value: format!("{} ({:?})", p.base_cost, p.threat_severity()),
            })
            .collect(),
        TableKind::Devices => tables
            .devices
            .iter()
            .map(|(code, p)| EntryRow {
                code: code.to_string(),
                name: p.display_name.clone(),
                value: format_currency(p.replacement_cost),
            })
            .collect(),
        TableKind::Data => tables
            .data
            .iter()
            .map(|(code, p)| EntryRow {
                code: code.to_string(),
                name: p.display_name.clone(),
                value: p.sensitivity_weight.to_string(),
            })
            .collect(),
        TableKind::Bands => tables
            .loss_bands
            .iter()
            .map(|(band, ef)| EntryRow { code: band.to_string(), name: loss_band_label(band), value: ef.to_string() })
            .collect(),
        TableKind::Usage => tables
            .usage
            .iter()
            .map(|(freq, weight)| EntryRow { code: freq.to_string(), name: freq.to_string(), value: weight.to_string() })
            .collect(),
    }
}

fn section(tables: &ReferenceTables, kind: TableKind) -> anyhow::Result<serde_json::Value> {
    let value = match kind {
        TableKind::Incidents => serde_json::to_value(&tables.incidents)?,
        TableKind::Devices => serde_json::to_value(&tables.devices)?,
        TableKind::Data => serde_json::to_value(&tables.data)?,
        TableKind::Bands => serde_json::to_value(&tables.loss_bands)?,
        TableKind::Usage => serde_json::to_value(&tables.usage)?,
    };
    Ok(value)
}

pub fn handle(kind: Option<TableKind>, engine: &RiskScoringEngine, format: OutputFormat) -> anyhow::Result<()> {
    let tables = engine.tables();
    let kinds: Vec<TableKind> = kind.map(|k| vec![k]).unwrap_or_else(|| TableKind::ALL.to_vec());

    if format == OutputFormat::Table {
        for kind in kinds {
            println!("{}", kind.title());
            println!("{}", output::render(rows(tables, kind)));
        }
        return Ok(());
    }

    match kind {
        Some(kind) => format.print(&section(tables, kind)?),
        None => {
            let all = kinds
                .into_iter()
                .map(|k| Ok((k.key().to_string(), section(tables, k)?)))
                .collect::<anyhow::Result<serde_json::Map<String, serde_json::Value>>>()?;
            format.print(&all)
        }
    }
}
