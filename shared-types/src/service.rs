use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Service offered by the studio, as picked in the appointment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Consultation,
    Small,
    Medium,
    Large,
    Coverup,
    Custom,
}

impl ServiceType {
    /// Every service, in the order the select control lists them
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Consultation,
        ServiceType::Small,
        ServiceType::Medium,
        ServiceType::Large,
        ServiceType::Coverup,
        ServiceType::Custom,
    ];

    /// Wire tag, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Consultation => "consultation",
            ServiceType::Small => "small",
            ServiceType::Medium => "medium",
            ServiceType::Large => "large",
            ServiceType::Coverup => "coverup",
            ServiceType::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Consultation => "Consultation",
            ServiceType::Small => "Small tattoo (up to 10cm)",
            ServiceType::Medium => "Medium tattoo (10-20cm)",
            ServiceType::Large => "Large tattoo (20cm+)",
            ServiceType::Coverup => "Cover-up",
            ServiceType::Custom => "Custom project",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown service type: {0:?}")]
pub struct UnknownServiceType(pub String);

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| UnknownServiceType(s.to_string()))
    }
}

/// Option entry for the service select control
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceOption {
    pub value: ServiceType,
    pub label: String,
}

impl From<ServiceType> for ServiceOption {
    fn from(value: ServiceType) -> Self {
        Self {
            value,
            label: value.label().to_string(),
        }
    }
}

pub fn service_options() -> Vec<ServiceOption> {
    ServiceType::ALL.into_iter().map(ServiceOption::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_serialization() {
        let json = serde_json::to_string(&ServiceType::Coverup).unwrap();
        assert_eq!(json, "\"coverup\"");

        let deserialized: ServiceType = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(deserialized, ServiceType::Small);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for service in ServiceType::ALL {
            let json = serde_json::to_string(&service).unwrap();
            assert_eq!(json, format!("\"{}\"", service.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("large".parse::<ServiceType>(), Ok(ServiceType::Large));
        assert!("Large".parse::<ServiceType>().is_err());
        assert!("".parse::<ServiceType>().is_err());
        assert!("tiny".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_service_options_cover_all_variants() {
        let options = service_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0].value, ServiceType::Consultation);
        assert_eq!(options[5].label, "Custom project");
    }
}
