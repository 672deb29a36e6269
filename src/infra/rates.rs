//! The rate table: destination and service reference data backing both
//! engines. Ships with the portal's built-in lanes and can be reloaded from
//! a JSON file when rates change.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::reference::{Destination, Service, ServiceType, TransitDays};

#[derive(Debug, Error)]
pub enum RateTableError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("invalid rate table: {0}")]
    Invalid(String),
}

/// Immutable lookup tables for destinations and service tiers. Built once
/// and injected into the engines; never mutated per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    destinations: Vec<Destination>,
    services: Vec<Service>,
}

impl RateTable {
    /// Builds a table, rejecting rows that violate the rate invariants
    /// (positive base rate, min <= max transit days).
    pub fn new(
        destinations: Vec<Destination>,
        services: Vec<Service>,
    ) -> Result<Self, RateTableError> {
        for destination in &destinations {
            if !(destination.base_rate > 0.0) || !destination.base_rate.is_finite() {
                return Err(RateTableError::Invalid(format!(
                    "destination {} has non-positive base rate",
                    destination.id
                )));
            }
            if destination.transit_days.min > destination.transit_days.max {
                return Err(RateTableError::Invalid(format!(
                    "destination {} has inverted transit range",
                    destination.id
                )));
            }
        }
        Ok(Self {
            destinations,
            services,
        })
    }

    /// Loads a table from a JSON rate file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RateTableError> {
        let data = fs::read_to_string(path)?;
        let table: RateTable = serde_json::from_str(&data)?;
        // Re-run the invariant checks; the file is hand-edited.
        Self::new(table.destinations, table.services)
    }

    /// The portal's built-in Caribbean lanes and service tiers.
    pub fn builtin() -> Self {
        let destinations = vec![
            destination("guyana", 4.50, 5, 7),
            destination("jamaica", 3.75, 3, 5),
            destination("trinidad", 4.25, 4, 6),
            destination("barbados", 4.00, 3, 5),
            destination("grenada", 4.75, 5, 8),
            destination("st_lucia", 4.50, 4, 7),
            destination("st_vincent", 4.75, 5, 8),
            destination("suriname", 5.25, 6, 9),
        ];
        let services = vec![
            service(ServiceType::Standard, "Standard Shipping", 5, 7),
            service(ServiceType::Express, "Express Shipping", 2, 3),
            service(ServiceType::DoorToDoor, "Door to Door", 5, 8),
            service(ServiceType::Consolidated, "Consolidated Freight", 10, 14),
        ];
        Self {
            destinations,
            services,
        }
    }

    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Looks up a service by caller-facing tag; "door-to-door" and
    /// "door_to_door" resolve to the same row.
    pub fn service(&self, tag: &str) -> Option<&Service> {
        let id = ServiceType::from_tag(tag)?;
        self.services.iter().find(|s| s.id == id)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn destination(id: &str, base_rate: f64, min: u16, max: u16) -> Destination {
    Destination {
        id: id.to_string(),
        base_rate,
        transit_days: TransitDays::new(min, max),
    }
}

fn service(id: ServiceType, name: &str, min: u16, max: u16) -> Service {
    Service {
        id,
        name: name.to_string(),
        delivery_days: TransitDays::new(min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lanes_resolve() {
        let rates = RateTable::builtin();
        let guyana = rates.destination("guyana").unwrap();
        assert_eq!(guyana.base_rate, 4.50);
        assert_eq!(guyana.transit_days, TransitDays::new(5, 7));
        assert!(rates.destination("narnia").is_none());
        assert!(rates.service("door-to-door").is_some());
        assert!(rates.service("overnight").is_none());
    }

    #[test]
    fn json_round_trip() {
        let rates = RateTable::builtin();
        let json = serde_json::to_string(&rates).unwrap();
        // Wire shape matches the portal's collections.
        assert!(json.contains("\"baseRate\":4.5"));
        assert!(json.contains("\"door_to_door\""));
        assert!(json.contains("\"delivery_days\""));
        let back: RateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rates);
    }

    #[test]
    fn inverted_transit_range_rejected() {
        let err = RateTable::new(
            vec![destination("guyana", 4.50, 7, 5)],
            RateTable::builtin().services.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, RateTableError::Invalid(_)));
    }

    #[test]
    fn non_positive_base_rate_rejected() {
        let err = RateTable::new(vec![destination("guyana", 0.0, 5, 7)], vec![]).unwrap_err();
        assert!(matches!(err, RateTableError::Invalid(_)));
    }
}
