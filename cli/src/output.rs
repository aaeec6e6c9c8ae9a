//! Output formatting

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use rasbita_core::{PriorityTier, SafeguardVerdict};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print structured data; `Table` falls back to pretty JSON
    pub fn print<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        match self {
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data)?)
            }
        }
        Ok(())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Two-column label/value row
#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Render rows as a rounded table
pub fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Colour-coded priority badge
pub fn tier_badge(tier: PriorityTier) -> ColoredString {
    let label = format!(" {} ", tier);
    let label = label.as_str();
    match tier {
        PriorityTier::Critical => label.on_red().white().bold(),
        PriorityTier::High => label.red().bold(),
        PriorityTier::Medium => label.yellow(),
        PriorityTier::Low => label.green(),
    }
}

/// Colour-coded safeguard verdict
pub fn verdict_badge(verdict: SafeguardVerdict) -> ColoredString {
    let label = verdict.to_string();
    let label = label.as_str();
    match verdict {
        SafeguardVerdict::Justified => label.green().bold(),
        SafeguardVerdict::BreakEven => label.yellow(),
        SafeguardVerdict::NotJustified => label.red(),
    }
}
