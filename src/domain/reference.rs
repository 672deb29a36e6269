//! Reference data the quoting core reads: shipping destinations and
//! service tiers. Both are static lookup rows owned by the rate table,
//! never mutated by the engines.

use serde::{Deserialize, Serialize};

/// An inclusive business-day range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitDays {
    pub min: u16,
    pub max: u16,
}

impl TransitDays {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// The string shown on quotes, e.g. "3-5 business days".
    pub fn label(&self) -> String {
        format!("{}-{} business days", self.min, self.max)
    }
}

/// A shipping lane the portal quotes for.
///
/// Field names in the JSON rate file follow the portal's destination
/// collection (camelCase).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    /// Currency per billable pound. Must be positive.
    pub base_rate: f64,
    pub transit_days: TransitDays,
}

/// Canonical service tier tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Standard,
    Express,
    DoorToDoor,
    Consolidated,
}

impl ServiceType {
    /// Normalizes a caller-facing service tag. The portal sends
    /// "door-to-door" with a hyphen; everything else already matches the
    /// canonical snake_case tags. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "standard" => Some(Self::Standard),
            "express" => Some(Self::Express),
            "door-to-door" | "door_to_door" => Some(Self::DoorToDoor),
            "consolidated" => Some(Self::Consolidated),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::DoorToDoor => "door_to_door",
            Self::Consolidated => "consolidated",
        }
    }
}

/// A service tier row. `delivery_days` is the nominal window shown in
/// marketing copy; the delivery estimator computes its own window from the
/// destination instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceType,
    pub name: String,
    pub delivery_days: TransitDays,
}
