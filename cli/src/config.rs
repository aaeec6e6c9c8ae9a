//! CLI Configuration

use crate::output::OutputFormat;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub tables_path: Option<PathBuf>,
    pub default_format: Option<OutputFormat>,
    pub safeguard_cost_ratio: Option<f64>,
    pub residual_loss_ratio: Option<f64>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    /// Set a key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "tables_path" => self.tables_path = Some(PathBuf::from(value)),
            "default_format" => {
                self.default_format = Some(value.parse().map_err(anyhow::Error::msg)?)
            }
            "safeguard_cost_ratio" => {
                self.safeguard_cost_ratio = Some(value.parse().context("expected a number")?)
            }
            "residual_loss_ratio" => {
                self.residual_loss_ratio = Some(value.parse().context("expected a number")?)
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Value of a key, or `None` when unset
    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(match key {
            "tables_path" => self.tables_path.as_ref().map(|p| p.display().to_string()),
            "default_format" => self.default_format.map(|f| f.to_string()),
            "safeguard_cost_ratio" => self.safeguard_cost_ratio.map(|r| r.to_string()),
            "residual_loss_ratio" => self.residual_loss_ratio.map(|r| r.to_string()),
            _ => anyhow::bail!("Unknown config key: {}", key),
        })
    }

    pub const KEYS: [&'static str; 4] =
        ["tables_path", "default_format", "safeguard_cost_ratio", "residual_loss_ratio"];

    fn config_path(profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".rasbita").join(filename))
    }
}
