//! Assessment input
//!
//! [`RiskAssessmentInput`] is the strictly typed value the engine scores.
//! [`RawAssessmentInput`] is the loosely typed shape a form submits; it is
//! validated once, on conversion, and every failure names its field.

use crate::codes::{
    DataClassification, DataLossBand, DeviceType, IncidentCategory, OccurrenceRate, UsageFrequency,
};
use crate::error::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};

/// Feasibility of putting safeguards in place. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feasibility {
    /// Organizationally feasible
    pub organizational: bool,
    /// Behaviorally feasible
    pub behavioral: bool,
    /// Technically feasible
    pub technical: bool,
    /// Politically feasible
    pub political: bool,
}

impl Feasibility {
    /// All four dimensions feasible
    pub fn all() -> Self {
        Self { organizational: true, behavioral: true, technical: true, political: true }
    }

    /// Number of feasible dimensions (0-4)
    pub fn count(&self) -> u8 {
        [self.organizational, self.behavioral, self.technical, self.political]
            .iter()
            .filter(|f| **f)
            .count() as u8
    }

    /// Every dimension feasible
    pub fn is_fully_feasible(&self) -> bool {
        self.count() == 4
    }
}

/// Validated scoring input for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentInput {
    /// Selects the threat cost
    pub incident_category: IncidentCategory,
    /// Selects the replacement cost
    pub device_type: DeviceType,
    /// Selects the sensitivity weight
    pub data_classification: DataClassification,
    /// Selects the usage weight
    pub usage_frequency: UsageFrequency,
    /// Selects the exposure factor
    pub data_loss_band: DataLossBand,
    /// ARO
    pub occurrence_rate: OccurrenceRate,
    /// Devices damaged by the incident
    pub damaged_device_count: u64,
    /// Devices of this type in the organization
    pub total_device_count: u64,
    /// Records held on the asset
    pub total_record_count: u64,
    /// Safeguard feasibility; not scored
    #[serde(default)]
    pub feasibility: Feasibility,
}

impl RiskAssessmentInput {
    /// Damaged devices do not exceed the device population
    pub fn device_counts_consistent(&self) -> bool {
        self.damaged_device_count <= self.total_device_count
    }
}

/// Form payload before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAssessmentInput {
    /// Incident category code
    #[serde(alias = "incidentCategory")]
    pub incident_category: Option<String>,
    /// Device type code
    #[serde(alias = "deviceType")]
    pub device_type: Option<String>,
    /// Data classification code
    #[serde(alias = "dataClassification")]
    pub data_classification: Option<String>,
    /// Usage frequency code
    #[serde(alias = "usageFrequency")]
    pub usage_frequency: Option<String>,
    /// Data loss band code
    #[serde(alias = "dataLossBand")]
    pub data_loss_band: Option<String>,
    /// One of 1, 0.5, 0.33 or 0.25
    #[serde(alias = "occurrenceRate")]
    pub occurrence_rate: Option<f64>,
    /// Must be non-negative
    #[serde(alias = "damagedDeviceCount")]
    pub damaged_device_count: Option<i64>,
    /// Must be non-negative
    #[serde(alias = "totalDeviceCount")]
    pub total_device_count: Option<i64>,
    /// Must be non-negative
    #[serde(alias = "totalRecordCount")]
    pub total_record_count: Option<i64>,
    /// Safeguard feasibility
    pub feasibility: Feasibility,
}

fn required_code<'a>(value: Option<&'a str>, field: &'static str) -> ScoringResult<&'a str> {
    match value.map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code),
        _ => Err(ScoringError::invalid(field)),
    }
}

fn required_count(value: Option<i64>, field: &'static str) -> ScoringResult<u64> {
    let count = value.ok_or(ScoringError::invalid(field))?;
    u64::try_from(count).map_err(|_| ScoringError::invalid(field))
}

impl TryFrom<RawAssessmentInput> for RiskAssessmentInput {
    type Error = ScoringError;

    fn try_from(raw: RawAssessmentInput) -> Result<Self, Self::Error> {
        let incident_category =
            IncidentCategory::from_code(required_code(raw.incident_category.as_deref(), "incident_category")?);
        let device_type = DeviceType::from_code(required_code(raw.device_type.as_deref(), "device_type")?);
        let data_classification =
            DataClassification::from_code(required_code(raw.data_classification.as_deref(), "data_classification")?);
        let usage_frequency =
            UsageFrequency::from_code(required_code(raw.usage_frequency.as_deref(), "usage_frequency")?);
        let data_loss_band = DataLossBand::from_code(required_code(raw.data_loss_band.as_deref(), "data_loss_band")?);
        let occurrence_rate = raw
            .occurrence_rate
            .ok_or(ScoringError::invalid("occurrence_rate"))
            .and_then(OccurrenceRate::from_rate)?;

        Ok(Self {
            incident_category,
            device_type,
            data_classification,
            usage_frequency,
            data_loss_band,
            occurrence_rate,
            damaged_device_count: required_count(raw.damaged_device_count, "damaged_device_count")?,
            total_device_count: required_count(raw.total_device_count, "total_device_count")?,
            total_record_count: required_count(raw.total_record_count, "total_record_count")?,
            feasibility: raw.feasibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawAssessmentInput {
        RawAssessmentInput {
            incident_category: Some("unauthorized_external".into()),
            device_type: Some("workstation".into()),
            data_classification: Some("pii".into()),
            usage_frequency: Some("often".into()),
            data_loss_band: Some("21_40".into()),
            occurrence_rate: Some(0.5),
            damaged_device_count: Some(1),
            total_device_count: Some(10),
            total_record_count: Some(1000),
            feasibility: Feasibility::default(),
        }
    }

    #[test]
    fn test_valid_raw_input_converts() {
        let input = RiskAssessmentInput::try_from(raw()).unwrap();
        assert_eq!(input.device_type, DeviceType::Workstation);
        assert_eq!(input.occurrence_rate, OccurrenceRate::EveryTwoYears);
        assert_eq!(input.total_record_count, 1000);
        assert!(input.device_counts_consistent());
    }

    #[test]
    fn test_negative_damaged_count_rejected() {
        let mut r = raw();
        r.damaged_device_count = Some(-1);
        let err = RiskAssessmentInput::try_from(r).unwrap_err();
        assert_eq!(err.field(), Some("damaged_device_count"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut r = raw();
        r.device_type = None;
        let err = RiskAssessmentInput::try_from(r).unwrap_err();
        assert_eq!(err.field(), Some("device_type"));

        let mut r = raw();
        r.usage_frequency = Some("  ".into());
        let err = RiskAssessmentInput::try_from(r).unwrap_err();
        assert_eq!(err.field(), Some("usage_frequency"));
    }

    #[test]
    fn test_unsupported_occurrence_rate_rejected() {
        let mut r = raw();
        r.occurrence_rate = Some(2.0);
        let err = RiskAssessmentInput::try_from(r).unwrap_err();
        assert_eq!(err.field(), Some("occurrence_rate"));
    }

    #[test]
    fn test_unknown_codes_are_accepted() {
        let mut r = raw();
        r.incident_category = Some("meteor_strike".into());
        let input = RiskAssessmentInput::try_from(r).unwrap();
        assert!(!input.incident_category.is_known());
    }

    #[test]
    fn test_camel_case_form_payload() {
        let r: RawAssessmentInput = serde_json::from_str(
            r#"{
                "incidentCategory": "ransomware",
                "deviceType": "server",
                "dataClassification": "phi",
                "usageFrequency": "daily",
                "dataLossBand": "81_100",
                "occurrenceRate": 1,
                "damagedDeviceCount": 2,
                "totalDeviceCount": 4,
                "totalRecordCount": 50000,
                "feasibility": {"technical": true}
            }"#,
        )
        .unwrap();
        let input = RiskAssessmentInput::try_from(r).unwrap();
        assert_eq!(input.incident_category, IncidentCategory::Ransomware);
        assert_eq!(input.feasibility.count(), 1);
    }

    #[test]
    fn test_feasibility_count() {
        assert!(Feasibility::all().is_fully_feasible());
        assert_eq!(Feasibility::default().count(), 0);
    }
}
