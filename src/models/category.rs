use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Purpose of a logged trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TripCategory {
    Commute,
    ClientVisit,
    MeetingTransport,
    BusinessTravel,
    Inspection,
    VehicleService,
}

impl TripCategory {
    pub const ALL: [TripCategory; 6] = [
        TripCategory::Commute,
        TripCategory::ClientVisit,
        TripCategory::MeetingTransport,
        TripCategory::BusinessTravel,
        TripCategory::Inspection,
        TripCategory::VehicleService,
    ];

    /// Human readable label, also used as the DB value.
    pub fn label(&self) -> &'static str {
        match self {
            TripCategory::Commute => "commute",
            TripCategory::ClientVisit => "client visit",
            TripCategory::MeetingTransport => "meeting transport",
            TripCategory::BusinessTravel => "business travel",
            TripCategory::Inspection => "inspection",
            TripCategory::VehicleService => "vehicle service",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s)
    }

    /// Parse user input: label or slug, case-insensitive.
    /// `"Business Travel"`, `"business-travel"` and `"business_travel"` all match.
    pub fn from_label(input: &str) -> Option<Self> {
        let normalized = input
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ");
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        Self::from_db_str(&normalized)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

impl fmt::Display for TripCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TripCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TripCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TripCategory::from_label(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown trip category '{}' (expected one of: {})",
                raw,
                TripCategory::labels().join(", ")
            ))
        })
    }
}
