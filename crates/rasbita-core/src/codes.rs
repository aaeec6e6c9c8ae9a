//! Categorical codes
//!
//! Form payloads and table files identify categories by short snake_case
//! codes. Codes outside the closed enumerations are kept as `Unknown` so
//! they survive parsing and degrade to fallback values at lookup time.

use crate::error::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* #[doc = concat!("`", $code, "`")] $variant,)+
            /// Code outside the closed enumeration
            Unknown(String),
        }

        impl $name {
            /// Known variants in table order
            pub fn known() -> Vec<Self> {
                vec![$(Self::$variant),+]
            }

            /// Stable code used in payloads and table files
            pub fn code(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => code,
                }
            }

            /// Parse a code; unrecognised codes become lowercase `Unknown`
            pub fn from_code(code: &str) -> Self {
                let code = code.trim().to_ascii_lowercase();
                match code.as_str() {
                    $($code => Self::$variant,)+
                    _ => Self::Unknown(code),
                }
            }

            /// Whether the code belongs to the closed enumeration
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self::from_code(&code)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::from_code(code)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.code().to_string()
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_code(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

categorical! {
    /// Incident type driving threat cost
    IncidentCategory {
        DenialOfService => "denial_of_service",
        Ransomware => "ransomware",
        UnauthorizedExternal => "unauthorized_external",
        UnauthorizedInternal => "unauthorized_internal",
        AccidentalDisclosure => "accidental_disclosure",
        LostOrStolenDevice => "lost_stolen_device",
        MalwareWorkstation => "malware_workstation",
        MalwareServer => "malware_server",
        MalwareNetworkDevice => "malware_network_device",
        MalwareIot => "malware_iot",
        SocialEngineering => "social_engineering",
        NoSignificantLoss => "no_significant_loss",
    }
}

categorical! {
    /// Device / asset class driving replacement cost
    DeviceType {
        Workstation => "workstation",
        Laptop => "laptop",
        MobileDevice => "mobile_device",
        Server => "server",
        DatabaseServer => "database_server",
        NetworkDevice => "network_device",
        StorageArray => "storage_array",
        IotDevice => "iot_device",
        IndustrialControlSystem => "industrial_control_system",
        CloudInstance => "cloud_instance",
    }
}

categorical! {
    /// Kind of data held on the asset
    DataClassification {
        SystemFile => "system_file",
        Public => "public",
        Internal => "internal",
        FinancialRecords => "financial_records",
        Pii => "pii",
        Phi => "phi",
        PaymentCard => "payment_card",
        Credentials => "credentials",
        IntellectualProperty => "intellectual_property",
        TradeSecrets => "trade_secrets",
        Biometric => "biometric",
    }
}

categorical! {
    /// Share of records lost in the incident
    DataLossBand {
        UpTo20 => "1_20",
        UpTo40 => "21_40",
        UpTo60 => "41_60",
        UpTo80 => "61_80",
        UpTo100 => "81_100",
    }
}

categorical! {
    /// How often the asset is used
    UsageFrequency {
        Daily => "daily",
        Often => "often",
        Rarely => "rarely",
    }
}

/// Annualized rate of occurrence ("once per N years")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum OccurrenceRate {
    /// Once a year (1.0)
    EveryYear,
    /// Once every two years (0.5)
    EveryTwoYears,
    /// Once every three years (0.33)
    EveryThreeYears,
    /// Once every four years (0.25)
    EveryFourYears,
}

impl OccurrenceRate {
    /// All supported rates, most frequent first
    pub const ALL: [OccurrenceRate; 4] = [
        Self::EveryYear,
        Self::EveryTwoYears,
        Self::EveryThreeYears,
        Self::EveryFourYears,
    ];

    /// Annual rate used as ARO
    pub const fn rate(&self) -> f64 {
        match self {
            Self::EveryYear => 1.0,
            Self::EveryTwoYears => 0.5,
            Self::EveryThreeYears => 0.33,
            Self::EveryFourYears => 0.25,
        }
    }

    /// Years between occurrences
    pub const fn years(&self) -> u8 {
        match self {
            Self::EveryYear => 1,
            Self::EveryTwoYears => 2,
            Self::EveryThreeYears => 3,
            Self::EveryFourYears => 4,
        }
    }

    /// Match one of the four fixed rates exactly
    pub fn from_rate(rate: f64) -> ScoringResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.rate() == rate)
            .ok_or(ScoringError::invalid("occurrence_rate"))
    }
}

impl TryFrom<f64> for OccurrenceRate {
    type Error = ScoringError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::from_rate(rate)
    }
}

impl From<OccurrenceRate> for f64 {
    fn from(rate: OccurrenceRate) -> Self {
        rate.rate()
    }
}

impl fmt::Display for OccurrenceRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.years() {
            1 => write!(f, "once a year"),
            n => write!(f, "once every {} years", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_for_known_variants() {
        for device in DeviceType::known() {
            assert_eq!(DeviceType::from_code(device.code()), device);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let incident = IncidentCategory::from_code("alien_invasion");
        assert_eq!(incident, IncidentCategory::Unknown("alien_invasion".into()));
        assert!(!incident.is_known());
        assert_eq!(incident.code(), "alien_invasion");
    }

    #[test]
    fn test_codes_are_case_insensitive() {
        assert_eq!(DataClassification::from_code(" PHI "), DataClassification::Phi);
        assert_eq!(UsageFrequency::from_code("Daily"), UsageFrequency::Daily);
        assert_eq!(DeviceType::from_code(" Medical_Imaging "), DeviceType::Unknown("medical_imaging".into()));
    }

    #[test]
    fn test_loss_band_codes() {
        assert_eq!(DataLossBand::from_code("21_40"), DataLossBand::UpTo40);
        assert_eq!(DataLossBand::known().len(), 5);
    }

    #[test]
    fn test_occurrence_rate_exact_values() {
        assert_eq!(OccurrenceRate::from_rate(0.5).unwrap(), OccurrenceRate::EveryTwoYears);
        assert_eq!(OccurrenceRate::from_rate(0.33).unwrap(), OccurrenceRate::EveryThreeYears);
        let err = OccurrenceRate::from_rate(0.75).unwrap_err();
        assert_eq!(err.field(), Some("occurrence_rate"));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&DeviceType::DatabaseServer).unwrap();
        assert_eq!(json, "\"database_server\"");
        let rate: OccurrenceRate = serde_json::from_str("0.25").unwrap();
        assert_eq!(rate, OccurrenceRate::EveryFourYears);
        assert!(serde_json::from_str::<OccurrenceRate>("2.0").is_err());
    }
}
