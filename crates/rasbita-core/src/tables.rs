//! Reference Tables
//!
//! Static lookup tables mapping categorical inputs to the numeric weights
//! and costs the scoring chain consumes. Tables are immutable once built
//! and shared through `Arc`; custom tables can be loaded from TOML or JSON
//! and are merged over the built-in set.

use crate::codes::{DataClassification, DataLossBand, DeviceType, IncidentCategory, UsageFrequency};
use crate::error::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static STANDARD: OnceLock<Arc<ReferenceTables>> = OnceLock::new();

/// Incident table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentProfile {
    /// Human-readable name
    pub display_name: String,
    /// Representative cost per exposed record; used as the threat cost
    pub base_cost: f64,
}

impl IncidentProfile {
    fn new(display_name: &str, base_cost: f64) -> Self {
        Self { display_name: display_name.to_string(), base_cost }
    }

    /// Severity band derived from the base cost
    pub fn threat_severity(&self) -> ThreatSeverity {
        ThreatSeverity::from_cost(self.base_cost)
    }
}

/// Device table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Human-readable name
    pub display_name: String,
    /// Cost to replace one device
    pub replacement_cost: f64,
}

impl DeviceProfile {
    fn new(display_name: &str, replacement_cost: f64) -> Self {
        Self { display_name: display_name.to_string(), replacement_cost }
    }
}

/// Data classification table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataProfile {
    /// Human-readable name
    pub display_name: String,
    /// Sensitivity on a 1-10 scale
    pub sensitivity_weight: u32,
}

impl DataProfile {
    fn new(display_name: &str, sensitivity_weight: u32) -> Self {
        Self { display_name: display_name.to_string(), sensitivity_weight }
    }
}

/// Threat severity derived from incident base cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThreatSeverity {
    /// Zero cost
    None,
    /// Below 5
    Low,
    /// 5 to under 10
    Medium,
    /// 10 to under 15
    High,
    /// 15 and above
    Critical,
}

impl ThreatSeverity {
    /// Band a threat cost: >= 15 critical, >= 10 high, >= 5 medium
    pub fn from_cost(cost: f64) -> Self {
        if cost >= 15.0 {
            Self::Critical
        } else if cost >= 10.0 {
            Self::High
        } else if cost >= 5.0 {
            Self::Medium
        } else if cost > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }
}

/// Values used when a lookup misses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    /// Unknown incident category
    pub threat_cost: f64,
    /// Unknown device type
    pub replacement_cost: f64,
    /// Unknown data loss band
    pub exposure_factor: f64,
    /// Unknown data classification
    pub sensitivity_weight: u32,
    /// Unknown usage frequency
    pub usage_weight: u32,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            threat_cost: 10.0,
            replacement_cost: 0.0,
            exposure_factor: 0.5,
            sensitivity_weight: 5,
            usage_weight: 5,
        }
    }
}

/// Immutable lookup tables for the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Threat cost per incident category
    pub incidents: BTreeMap<IncidentCategory, IncidentProfile>,
    /// Replacement cost per device type
    pub devices: BTreeMap<DeviceType, DeviceProfile>,
    /// Sensitivity weight per data classification
    pub data: BTreeMap<DataClassification, DataProfile>,
    /// Exposure factor per loss band
    pub loss_bands: BTreeMap<DataLossBand, f64>,
    /// Weight (1-10) per usage frequency
    pub usage: BTreeMap<UsageFrequency, u32>,
    /// Values used on a lookup miss
    pub fallbacks: Fallbacks,
}

/// Partial tables read from a file and merged over the built-in set
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableOverrides {
    incidents: BTreeMap<IncidentCategory, IncidentProfile>,
    devices: BTreeMap<DeviceType, DeviceProfile>,
    data: BTreeMap<DataClassification, DataProfile>,
    loss_bands: BTreeMap<DataLossBand, f64>,
    usage: BTreeMap<UsageFrequency, u32>,
    fallbacks: Option<Fallbacks>,
}

impl ReferenceTables {
    /// Built-in tables
    pub fn builtin() -> Self {
        use DataClassification as D;
        use DeviceType as Dev;
        use IncidentCategory as I;

        let incidents = BTreeMap::from([
            (I::DenialOfService, IncidentProfile::new("Denial of Service", 8.0)),
            (I::Ransomware, IncidentProfile::new("Ransomware", 15.0)),
            (I::UnauthorizedExternal, IncidentProfile::new("Unauthorized Disclosure (External)", 5.0)),
            (I::UnauthorizedInternal, IncidentProfile::new("Unauthorized Disclosure (Internal)", 4.0)),
            (I::AccidentalDisclosure, IncidentProfile::new("Accidental Disclosure", 3.0)),
            (I::LostOrStolenDevice, IncidentProfile::new("Lost or Stolen Device", 6.0)),
            (I::MalwareWorkstation, IncidentProfile::new("Malware - Workstation", 6.0)),
            (I::MalwareServer, IncidentProfile::new("Malware - Server", 12.0)),
            (I::MalwareNetworkDevice, IncidentProfile::new("Malware - Network Device", 10.0)),
            (I::MalwareIot, IncidentProfile::new("Malware - IoT Device", 7.0)),
            (I::SocialEngineering, IncidentProfile::new("Social Engineering", 9.0)),
            (I::NoSignificantLoss, IncidentProfile::new("No Significant Loss", 0.0)),
        ]);

        let devices = BTreeMap::from([
            (Dev::Workstation, DeviceProfile::new("Workstation", 500.0)),
            (Dev::Laptop, DeviceProfile::new("Laptop", 1_200.0)),
            (Dev::MobileDevice, DeviceProfile::new("Mobile Device", 800.0)),
            (Dev::Server, DeviceProfile::new("Server", 5_000.0)),
            (Dev::DatabaseServer, DeviceProfile::new("Database Server", 10_000.0)),
            (Dev::NetworkDevice, DeviceProfile::new("Network Device", 3_000.0)),
            (Dev::StorageArray, DeviceProfile::new("Storage Array", 15_000.0)),
            (Dev::IotDevice, DeviceProfile::new("IoT Device", 200.0)),
            (Dev::IndustrialControlSystem, DeviceProfile::new("Industrial Control System", 25_000.0)),
            (Dev::CloudInstance, DeviceProfile::new("Cloud Instance", 1_000.0)),
        ]);

        let data = BTreeMap::from([
            (D::SystemFile, DataProfile::new("System File", 1)),
            (D::Public, DataProfile::new("Public Information", 1)),
            (D::Internal, DataProfile::new("Internal Use Only", 3)),
            (D::FinancialRecords, DataProfile::new("Financial Records", 7)),
            (D::Pii, DataProfile::new("Personally Identifiable Information", 8)),
            (D::Phi, DataProfile::new("Protected Health Information", 9)),
            (D::PaymentCard, DataProfile::new("Payment Card Data", 10)),
            (D::Credentials, DataProfile::new("Authentication Credentials", 9)),
            (D::IntellectualProperty, DataProfile::new("Intellectual Property", 8)),
            (D::TradeSecrets, DataProfile::new("Trade Secrets", 10)),
            (D::Biometric, DataProfile::new("Biometric Data", 10)),
        ]);

        let loss_bands = BTreeMap::from([
            (DataLossBand::UpTo20, 0.2),
            (DataLossBand::UpTo40, 0.4),
            (DataLossBand::UpTo60, 0.6),
            (DataLossBand::UpTo80, 0.8),
            (DataLossBand::UpTo100, 1.0),
        ]);

        let usage = BTreeMap::from([
            (UsageFrequency::Daily, 9),
            (UsageFrequency::Often, 5),
            (UsageFrequency::Rarely, 2),
        ]);

        Self { incidents, devices, data, loss_bands, usage, fallbacks: Fallbacks::default() }
    }

    /// Process-wide shared built-in tables
    pub fn standard() -> Arc<ReferenceTables> {
        STANDARD.get_or_init(|| Arc::new(Self::builtin())).clone()
    }

    /// Load tables from a TOML (`.toml`) or JSON file, merged over the built-in set
    pub fn load(path: impl AsRef<Path>) -> ScoringResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let tables = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };
        tracing::info!(
            path = %path.display(),
            incidents = tables.incidents.len(),
            devices = tables.devices.len(),
            "Loaded reference tables"
        );
        Ok(tables)
    }

    /// Parse TOML overrides
    pub fn from_toml_str(content: &str) -> ScoringResult<Self> {
        let overrides: TableOverrides = toml::from_str(content)?;
        Self::builtin().merged(overrides)
    }

    /// Parse JSON overrides
    pub fn from_json_str(content: &str) -> ScoringResult<Self> {
        let overrides: TableOverrides = serde_json::from_str(content)?;
        Self::builtin().merged(overrides)
    }

    fn merged(mut self, overrides: TableOverrides) -> ScoringResult<Self> {
        self.incidents.extend(overrides.incidents);
        self.devices.extend(overrides.devices);
        self.data.extend(overrides.data);
        self.loss_bands.extend(overrides.loss_bands);
        self.usage.extend(overrides.usage);
        if let Some(fallbacks) = overrides.fallbacks {
            self.fallbacks = fallbacks;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every cost, factor and weight is in range
    pub fn validate(&self) -> ScoringResult<()> {
        fn cost(what: &str, code: &str, value: f64) -> ScoringResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ScoringError::Config(format!("{} for {} must be finite and non-negative, got {}", what, code, value)))
            }
        }
        fn factor(code: &str, value: f64) -> ScoringResult<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ScoringError::Config(format!("exposure factor for {} must be 0.0-1.0, got {}", code, value)))
            }
        }
        fn weight(what: &str, code: &str, value: u32) -> ScoringResult<()> {
            if (1..=10).contains(&value) {
                Ok(())
            } else {
                Err(ScoringError::Config(format!("{} for {} must be 1-10, got {}", what, code, value)))
            }
        }

        for (code, profile) in &self.incidents {
            cost("base cost", code.code(), profile.base_cost)?;
        }
        for (code, profile) in &self.devices {
            cost("replacement cost", code.code(), profile.replacement_cost)?;
        }
        for (code, profile) in &self.data {
            weight("sensitivity weight", code.code(), profile.sensitivity_weight)?;
        }
        for (band, ef) in &self.loss_bands {
            factor(band.code(), *ef)?;
        }
        for (frequency, usage) in &self.usage {
            weight("usage weight", frequency.code(), *usage)?;
        }

        let fb = &self.fallbacks;
        cost("threat cost", "fallback", fb.threat_cost)?;
        cost("replacement cost", "fallback", fb.replacement_cost)?;
        factor("fallback", fb.exposure_factor)?;
        weight("sensitivity weight", "fallback", fb.sensitivity_weight)?;
        weight("usage weight", "fallback", fb.usage_weight)?;
        Ok(())
    }

    /// Incident entry, if tabulated
    pub fn incident(&self, category: &IncidentCategory) -> Option<&IncidentProfile> {
        self.incidents.get(category)
    }

    /// Device entry, if tabulated
    pub fn device(&self, device: &DeviceType) -> Option<&DeviceProfile> {
        self.devices.get(device)
    }

    /// Data classification entry, if tabulated
    pub fn data_profile(&self, classification: &DataClassification) -> Option<&DataProfile> {
        self.data.get(classification)
    }

    /// Threat cost for an incident, or the fallback
    pub fn threat_cost(&self, category: &IncidentCategory) -> f64 {
        match self.incidents.get(category) {
            Some(profile) => profile.base_cost,
            None => {
                tracing::debug!(incident = %category, fallback = self.fallbacks.threat_cost, "Unknown incident category");
                self.fallbacks.threat_cost
            }
        }
    }

    /// Replacement cost for a device, or the fallback
    pub fn replacement_cost(&self, device: &DeviceType) -> f64 {
        match self.devices.get(device) {
            Some(profile) => profile.replacement_cost,
            None => {
                tracing::debug!(device = %device, fallback = self.fallbacks.replacement_cost, "Unknown device type");
                self.fallbacks.replacement_cost
            }
        }
    }

    /// Sensitivity weight for a classification, or the fallback
    pub fn sensitivity_weight(&self, classification: &DataClassification) -> u32 {
        match self.data.get(classification) {
            Some(profile) => profile.sensitivity_weight,
            None => {
                tracing::debug!(classification = %classification, fallback = self.fallbacks.sensitivity_weight, "Unknown data classification");
                self.fallbacks.sensitivity_weight
            }
        }
    }

    /// Exposure factor for a loss band, or the fallback
    pub fn exposure_factor(&self, band: &DataLossBand) -> f64 {
        match self.loss_bands.get(band) {
            Some(ef) => *ef,
            None => {
                tracing::debug!(band = %band, fallback = self.fallbacks.exposure_factor, "Unknown data loss band");
                self.fallbacks.exposure_factor
            }
        }
    }

    /// Usage weight for a frequency, or the fallback
    pub fn usage_weight(&self, frequency: &UsageFrequency) -> u32 {
        match self.usage.get(frequency) {
            Some(weight) => *weight,
            None => {
                tracing::debug!(usage = %frequency, fallback = self.fallbacks.usage_weight, "Unknown usage frequency");
                self.fallbacks.usage_weight
            }
        }
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Human label for a loss band
pub fn loss_band_label(band: &DataLossBand) -> String {
    match band {
        DataLossBand::UpTo20 => "1-20%".into(),
        DataLossBand::UpTo40 => "21-40%".into(),
        DataLossBand::UpTo60 => "41-60%".into(),
        DataLossBand::UpTo80 => "61-80%".into(),
        DataLossBand::UpTo100 => "81-100%".into(),
        DataLossBand::Unknown(code) => code.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        assert!(ReferenceTables::builtin().validate().is_ok());
    }

    #[test]
    fn test_builtin_covers_every_known_code() {
        let tables = ReferenceTables::builtin();
        for c in IncidentCategory::known() {
            assert!(tables.incident(&c).is_some(), "missing incident {}", c);
        }
        for d in DeviceType::known() {
            assert!(tables.device(&d).is_some(), "missing device {}", d);
        }
        for d in DataClassification::known() {
            assert!(tables.data_profile(&d).is_some(), "missing data {}", d);
        }
        assert_eq!(tables.loss_bands.len(), DataLossBand::known().len());
        assert_eq!(tables.usage.len(), UsageFrequency::known().len());
    }

    #[test]
    fn test_documented_values() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.replacement_cost(&DeviceType::Workstation), 500.0);
        assert_eq!(tables.threat_cost(&IncidentCategory::UnauthorizedExternal), 5.0);
        assert_eq!(tables.sensitivity_weight(&DataClassification::Phi), 9);
        assert_eq!(tables.exposure_factor(&DataLossBand::UpTo40), 0.4);
        assert_eq!(tables.usage_weight(&UsageFrequency::Daily), 9);
        assert_eq!(tables.usage_weight(&UsageFrequency::Often), 5);
        assert_eq!(tables.usage_weight(&UsageFrequency::Rarely), 2);
    }

    #[test]
    fn test_lookup_misses_use_fallbacks() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.threat_cost(&IncidentCategory::from_code("meteor")), 10.0);
        assert_eq!(tables.replacement_cost(&DeviceType::from_code("toaster")), 0.0);
        assert_eq!(tables.exposure_factor(&DataLossBand::from_code("0_0")), 0.5);
    }

    #[test]
    fn test_threat_severity_bands() {
        assert_eq!(ThreatSeverity::from_cost(15.0), ThreatSeverity::Critical);
        assert_eq!(ThreatSeverity::from_cost(12.0), ThreatSeverity::High);
        assert_eq!(ThreatSeverity::from_cost(5.0), ThreatSeverity::Medium);
        assert_eq!(ThreatSeverity::from_cost(4.99), ThreatSeverity::Low);
        assert_eq!(ThreatSeverity::from_cost(0.0), ThreatSeverity::None);
    }

    #[test]
    fn test_toml_overrides_merge_over_builtin() {
        let tables = ReferenceTables::from_toml_str(
            r#"
            [devices.workstation]
            display_name = "Workstation"
            replacement_cost = 750.0

            [devices.kiosk]
            display_name = "Kiosk"
            replacement_cost = 300.0

            [fallbacks]
            threat_cost = 12.0
            "#,
        )
        .unwrap();
        assert_eq!(tables.replacement_cost(&DeviceType::Workstation), 750.0);
        assert_eq!(tables.replacement_cost(&DeviceType::from_code("kiosk")), 300.0);
        assert_eq!(tables.replacement_cost(&DeviceType::Server), 5_000.0);
        assert_eq!(tables.fallbacks.threat_cost, 12.0);
        assert_eq!(tables.fallbacks.exposure_factor, 0.5);
    }

    #[test]
    fn test_json_override_rejects_bad_exposure_factor() {
        let err = ReferenceTables::from_json_str(r#"{"loss_bands": {"1_20": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ScoringError::Config(_)));
    }

    #[test]
    fn test_custom_codes_match_regardless_of_case() {
        let tables = ReferenceTables::from_toml_str(
            r#"
            [devices.Medical_Imaging]
            display_name = "Medical Imaging Device"
            replacement_cost = 40000.0
            "#,
        )
        .unwrap();
        assert_eq!(tables.replacement_cost(&DeviceType::from_code("medical_imaging")), 40_000.0);
        assert_eq!(tables.replacement_cost(&DeviceType::from_code("Medical_Imaging")), 40_000.0);
        assert_eq!(tables.replacement_cost(&DeviceType::from_code("WORKSTATION")), 500.0);
    }

    #[test]
    fn test_usage_weights_are_range_checked() {
        for toml in ["usage.daily = 0", "usage.daily = 100000", "[fallbacks]\nusage_weight = 11"] {
            let err = ReferenceTables::from_toml_str(toml).unwrap_err();
            assert!(matches!(err, ScoringError::Config(_)), "{} accepted", toml);
        }
        let tables = ReferenceTables::from_toml_str("usage.rarely = 1").unwrap();
        assert_eq!(tables.usage_weight(&UsageFrequency::Rarely), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(&path, r#"{"usage": {"daily": 10}}"#).unwrap();
        let tables = ReferenceTables::load(&path).unwrap();
        assert_eq!(tables.usage_weight(&UsageFrequency::Daily), 10);
    }

    #[test]
    fn test_standard_is_shared() {
        let a = ReferenceTables::standard();
        let b = ReferenceTables::standard();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
