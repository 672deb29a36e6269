//! Booking pricing: billable weight, multi-package discounts, insurance and
//! the express surcharge.
//!
//! Deliberately permissive about package inputs: negative or missing numbers
//! clamp to zero instead of failing, because the portal's booking form sends
//! partially-filled packages while the customer is still typing. The only
//! hard failure is an unknown destination.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::reference::ServiceType;
use crate::infra::rates::RateTable;

/// Substituted when the customer ticks "weight unknown". Overrides any
/// weight they typed anyway.
pub const FALLBACK_WEIGHT_LBS: f64 = 5.0;

/// Volumetric divisor, cubic inches per pound. Air-freight convention,
/// not configurable per destination.
pub const DIM_DIVISOR: f64 = 166.0;

const INSURANCE_RATE: f64 = 0.03;
const INSURANCE_MINIMUM: f64 = 5.0;
const EXPRESS_SURCHARGE_RATE: f64 = 0.25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("unknown destination: {0}")]
    UnknownDestination(String),
}

/// One physical parcel as submitted by the booking form. All numeric fields
/// are optional; see the module docs for the clamping rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInput {
    /// Caller-assigned, unique within the request.
    pub id: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unknown: bool,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub declared_value: Option<f64>,
}

/// Priced counterpart of one [`PackageInput`]. Weights are rounded to one
/// decimal, cost to two.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageQuote {
    pub id: String,
    pub weight: f64,
    pub dim_weight: f64,
    pub billable_weight: f64,
    pub cost: f64,
}

/// The full itemized quote for a booking.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPricing {
    /// Same order as the input packages.
    pub packages: Vec<PackageQuote>,
    pub subtotal: f64,
    pub multi_package_discount: f64,
    pub insurance_cost: f64,
    pub express_surcharge: f64,
    pub total_cost: f64,
    /// Straight from the destination, never adjusted for service tier. The
    /// delivery estimator applies the express adjustment; this string does
    /// not. Keep the asymmetry — the booking UI shows both.
    pub transit_days: String,
    /// Sum of actual weights, not billable weights.
    pub total_weight: f64,
}

/// Prices a booking. `service_type` only matters for the express surcharge;
/// unrecognized service tags are simply not express, not an error.
pub fn calculate_booking_pricing(
    rates: &RateTable,
    destination_id: &str,
    service_type: &str,
    packages: &[PackageInput],
) -> Result<BookingPricing, PricingError> {
    let destination = rates
        .destination(destination_id)
        .ok_or_else(|| PricingError::UnknownDestination(destination_id.to_string()))?;

    let quotes: Vec<PackageQuote> = packages
        .iter()
        .map(|package| quote_package(package, destination.base_rate))
        .collect();

    // Each package cost is rounded before summing, then the sum is rounded
    // again. Booking records persisted by the portal were written with this
    // double rounding; keep it.
    let subtotal = round2(quotes.iter().map(|q| q.cost).sum());

    let discount = round2(subtotal * discount_rate(packages.len()));

    let total_declared: f64 = packages
        .iter()
        .map(|p| p.declared_value.unwrap_or(0.0).max(0.0))
        .sum();
    let insurance = if total_declared > 0.0 {
        round2((total_declared * INSURANCE_RATE).max(INSURANCE_MINIMUM))
    } else {
        0.0
    };

    let surcharge = if ServiceType::from_tag(service_type) == Some(ServiceType::Express) {
        round2(subtotal * EXPRESS_SURCHARGE_RATE)
    } else {
        0.0
    };

    let total_weight = round2(quotes.iter().map(|q| q.weight).sum());

    Ok(BookingPricing {
        total_cost: round2(subtotal - discount + insurance + surcharge),
        subtotal,
        multi_package_discount: discount,
        insurance_cost: insurance,
        express_surcharge: surcharge,
        transit_days: destination.transit_days.label(),
        total_weight,
        packages: quotes,
    })
}

fn quote_package(package: &PackageInput, base_rate: f64) -> PackageQuote {
    let weight = if package.weight_unknown {
        FALLBACK_WEIGHT_LBS
    } else {
        package.weight.unwrap_or(0.0).max(0.0)
    };

    let dim_weight = match (package.length, package.width, package.height) {
        (Some(l), Some(w), Some(h)) if l > 0.0 && w > 0.0 && h > 0.0 => (l * w * h) / DIM_DIVISOR,
        _ => 0.0,
    };

    let billable = weight.max(dim_weight);

    PackageQuote {
        id: package.id.clone(),
        weight: round1(weight),
        dim_weight: round1(dim_weight),
        billable_weight: round1(billable),
        cost: round2(round1(billable) * base_rate),
    }
}

/// Discount tier by package count (not weight).
fn discount_rate(package_count: usize) -> f64 {
    if package_count >= 5 {
        0.10
    } else if package_count >= 2 {
        0.05
    } else {
        0.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::{Destination, TransitDays};
    use crate::infra::rates::RateTable;

    fn table() -> RateTable {
        RateTable::new(
            vec![Destination {
                id: "guyana".to_string(),
                base_rate: 5.0,
                transit_days: TransitDays::new(3, 5),
            }],
            RateTable::builtin().services().to_vec(),
        )
        .unwrap()
    }

    fn plain_package(id: &str, weight: f64) -> PackageInput {
        PackageInput {
            id: id.to_string(),
            weight: Some(weight),
            weight_unknown: false,
            length: None,
            width: None,
            height: None,
            declared_value: None,
        }
    }

    #[test]
    fn single_package_end_to_end() {
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[plain_package("p1", 10.0)])
                .unwrap();

        assert_eq!(pricing.packages.len(), 1);
        assert_eq!(pricing.packages[0].cost, 50.0);
        assert_eq!(pricing.subtotal, 50.0);
        assert_eq!(pricing.multi_package_discount, 0.0);
        assert_eq!(pricing.insurance_cost, 0.0);
        assert_eq!(pricing.express_surcharge, 0.0);
        assert_eq!(pricing.total_cost, 50.0);
        assert_eq!(pricing.transit_days, "3-5 business days");
        assert_eq!(pricing.total_weight, 10.0);
    }

    #[test]
    fn unknown_destination_fails() {
        let err =
            calculate_booking_pricing(&table(), "atlantis", "standard", &[plain_package("p1", 1.0)])
                .unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownDestination("atlantis".to_string())
        );
    }

    #[test]
    fn dimensional_weight_dominates_actual() {
        let package = PackageInput {
            length: Some(20.0),
            width: Some(20.0),
            height: Some(20.0),
            ..plain_package("p1", 2.0)
        };
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[package]).unwrap();

        // 8000 / 166 = 48.19..., rounds to 48.2.
        assert_eq!(pricing.packages[0].dim_weight, 48.2);
        assert_eq!(pricing.packages[0].billable_weight, 48.2);
        assert_eq!(pricing.packages[0].weight, 2.0);
        assert_eq!(pricing.packages[0].cost, 241.0);
    }

    #[test]
    fn missing_dimension_means_no_dim_weight() {
        let package = PackageInput {
            length: Some(20.0),
            width: Some(20.0),
            height: None,
            ..plain_package("p1", 2.0)
        };
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[package]).unwrap();
        assert_eq!(pricing.packages[0].dim_weight, 0.0);
        assert_eq!(pricing.packages[0].billable_weight, 2.0);
    }

    #[test]
    fn unknown_weight_fallback_overrides_supplied_weight() {
        let package = PackageInput {
            weight_unknown: true,
            ..plain_package("p1", 999.0)
        };
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[package]).unwrap();
        assert_eq!(pricing.packages[0].weight, 5.0);
        assert_eq!(pricing.packages[0].cost, 25.0);
    }

    #[test]
    fn negative_weight_clamps_to_zero() {
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[plain_package("p1", -4.0)])
                .unwrap();
        assert_eq!(pricing.packages[0].weight, 0.0);
        assert_eq!(pricing.packages[0].cost, 0.0);
    }

    #[test]
    fn discount_tiers_by_package_count() {
        for (count, expected_rate) in [(1, 0.0), (2, 0.05), (4, 0.05), (5, 0.10), (10, 0.10)] {
            let packages: Vec<PackageInput> = (0..count)
                .map(|i| plain_package(&format!("p{i}"), 10.0))
                .collect();
            let pricing =
                calculate_booking_pricing(&table(), "guyana", "standard", &packages).unwrap();
            let expected = (pricing.subtotal * expected_rate * 100.0).round() / 100.0;
            assert_eq!(
                pricing.multi_package_discount, expected,
                "count {count} should discount at {expected_rate}"
            );
        }
    }

    #[test]
    fn insurance_floor_applies_only_above_zero_declared() {
        let low = PackageInput {
            declared_value: Some(10.0),
            ..plain_package("p1", 10.0)
        };
        let pricing = calculate_booking_pricing(&table(), "guyana", "standard", &[low]).unwrap();
        assert_eq!(pricing.insurance_cost, 5.0);

        let none = plain_package("p1", 10.0);
        let pricing = calculate_booking_pricing(&table(), "guyana", "standard", &[none]).unwrap();
        assert_eq!(pricing.insurance_cost, 0.0);
    }

    #[test]
    fn insurance_three_percent_above_floor() {
        let package = PackageInput {
            declared_value: Some(1000.0),
            ..plain_package("p1", 10.0)
        };
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[package]).unwrap();
        assert_eq!(pricing.insurance_cost, 30.0);
    }

    #[test]
    fn negative_declared_value_ignored() {
        let package = PackageInput {
            declared_value: Some(-50.0),
            ..plain_package("p1", 10.0)
        };
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "standard", &[package]).unwrap();
        assert_eq!(pricing.insurance_cost, 0.0);
    }

    #[test]
    fn express_surcharge_is_quarter_of_subtotal() {
        let packages = [plain_package("p1", 20.0)]; // subtotal 100.00
        let express =
            calculate_booking_pricing(&table(), "guyana", "express", &packages).unwrap();
        assert_eq!(express.subtotal, 100.0);
        assert_eq!(express.express_surcharge, 25.0);
        assert_eq!(express.total_cost, 125.0);

        let standard =
            calculate_booking_pricing(&table(), "guyana", "standard", &packages).unwrap();
        assert_eq!(standard.express_surcharge, 0.0);
    }

    #[test]
    fn unrecognized_service_is_not_express() {
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "overnight", &[plain_package("p1", 20.0)])
                .unwrap();
        assert_eq!(pricing.express_surcharge, 0.0);
    }

    #[test]
    fn transit_string_ignores_express() {
        let pricing =
            calculate_booking_pricing(&table(), "guyana", "express", &[plain_package("p1", 1.0)])
                .unwrap();
        assert_eq!(pricing.transit_days, "3-5 business days");
    }

    #[test]
    fn total_weight_sums_actual_not_billable() {
        let bulky = PackageInput {
            length: Some(20.0),
            width: Some(20.0),
            height: Some(20.0),
            ..plain_package("p1", 2.0)
        };
        let pricing = calculate_booking_pricing(
            &table(),
            "guyana",
            "standard",
            &[bulky, plain_package("p2", 3.0)],
        )
        .unwrap();
        assert_eq!(pricing.total_weight, 5.0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let packages = [
            plain_package("p1", 7.3),
            PackageInput {
                length: Some(11.0),
                width: Some(9.0),
                height: Some(14.5),
                declared_value: Some(250.0),
                ..plain_package("p2", 4.0)
            },
        ];
        let first = calculate_booking_pricing(&table(), "guyana", "express", &packages).unwrap();
        let second = calculate_booking_pricing(&table(), "guyana", "express", &packages).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round1(48.25), 48.3);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(10.004), 10.0);
    }
}
