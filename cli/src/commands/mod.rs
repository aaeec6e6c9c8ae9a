//! CLI Commands

pub mod assess;
pub mod config;
pub mod portfolio;
pub mod score;
pub mod tables;

use anyhow::Context;
use rasbita_core::{EngineConfig, ReferenceTables, RiskScoringEngine};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Engine options resolved from flags, environment and profile config
#[derive(Debug, Default)]
pub struct EngineSettings {
    pub tables: Option<PathBuf>,
    pub safeguard_cost_ratio: Option<f64>,
    pub residual_loss_ratio: Option<f64>,
}

impl EngineSettings {
    pub fn build(&self) -> anyhow::Result<RiskScoringEngine> {
        let tables = match &self.tables {
            Some(path) => Arc::new(
                ReferenceTables::load(path)
                    .with_context(|| format!("loading reference tables from {}", path.display()))?,
            ),
            None => ReferenceTables::standard(),
        };

        let defaults = EngineConfig::default();
        let config = EngineConfig {
            safeguard_cost_ratio: self.safeguard_cost_ratio.unwrap_or(defaults.safeguard_cost_ratio),
            residual_loss_ratio: self.residual_loss_ratio.unwrap_or(defaults.residual_loss_ratio),
        };
        Ok(RiskScoringEngine::with_config(tables, &config)?)
    }
}

/// Read a JSON, YAML or TOML document, chosen by file extension
pub fn read_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(anyhow::Error::from),
        Some("toml") => toml::from_str(&content).map_err(anyhow::Error::from),
        _ => serde_json::from_str(&content).map_err(anyhow::Error::from),
    };
    parsed.with_context(|| format!("parsing {}", path.display()))
}
