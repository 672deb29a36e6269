//! Delivery-window estimation: business-day arithmetic over the
//! destination's transit range, with the express adjustment and a customs
//! buffer.
//!
//! Every lookup or parse failure degrades to `None` rather than an error —
//! the portal renders "estimate unavailable" and carries on. The scheduled
//! pickup-date checks live here too because they share the weekend rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Weekday};

use crate::domain::reference::{ServiceType, TransitDays};
use crate::infra::rates::RateTable;

/// Pickups can be booked at most this many calendar days out.
pub const MAX_SCHEDULE_DAYS_AHEAD: i64 = 14;

/// How firm the estimated window is. `Low` is representable for future
/// tuning but the current estimator only ever emits `High` and `Medium`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: Date,
    pub max: Date,
}

/// A computed delivery window for one booking.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimate {
    pub estimated_delivery: DateRange,
    /// Post-adjustment business-day bounds (service tier, then customs).
    pub transit_days: TransitDays,
    pub business_days: TransitDays,
    pub formatted_range: String,
    pub confidence: Confidence,
}

/// What the estimator needs from a booking. `scheduled_date` stays a string
/// because the portal passes the form field through unparsed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub service_type: String,
    pub destination_id: String,
    /// ISO-8601 calendar date, e.g. "2026-09-04".
    pub scheduled_date: String,
    #[serde(default = "default_include_customs")]
    pub include_customs: bool,
}

fn default_include_customs() -> bool {
    true
}

impl EstimateRequest {
    pub fn new(
        service_type: impl Into<String>,
        destination_id: impl Into<String>,
        scheduled_date: impl Into<String>,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            destination_id: destination_id.into(),
            scheduled_date: scheduled_date.into(),
            include_customs: true,
        }
    }

    pub fn without_customs(mut self) -> Self {
        self.include_customs = false;
        self
    }
}

/// Estimates the delivery window, or `None` when the destination, service
/// or scheduled date cannot be resolved. Callers treat `None` as
/// "insufficient data"; the reasons are deliberately not distinguished.
pub fn calculate_delivery_estimate(
    rates: &RateTable,
    request: &EstimateRequest,
) -> Option<DeliveryEstimate> {
    let destination = rates.destination(&request.destination_id)?;
    let service = rates.service(&request.service_type)?;
    let scheduled = Date::parse(
        &request.scheduled_date,
        format_description!("[year]-[month]-[day]"),
    )
    .ok()?;

    let mut min = destination.transit_days.min;
    let mut max = destination.transit_days.max;

    // Express shaves two business days off both bounds, never below one.
    if service.id == ServiceType::Express {
        min = min.saturating_sub(2).max(1);
        max = max.saturating_sub(2).max(1);
    }

    // Customs clearance buffer applies after the service adjustment, for
    // every tier including express.
    if request.include_customs {
        min += 1;
        max += 2;
    }

    let earliest = add_business_days(scheduled, min);
    let latest = add_business_days(scheduled, max);

    let formatted_range = if earliest == latest {
        format_short(earliest)
    } else {
        format!("{} – {}", format_short(earliest), format_short(latest))
    };

    let confidence = if min == max {
        Confidence::High
    } else {
        Confidence::Medium
    };

    Some(DeliveryEstimate {
        estimated_delivery: DateRange {
            min: earliest,
            max: latest,
        },
        transit_days: TransitDays::new(min, max),
        business_days: TransitDays::new(min, max),
        formatted_range,
        confidence,
    })
}

pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

pub fn is_business_day(date: Date) -> bool {
    !is_weekend(date)
}

/// The first business day strictly after `date`.
pub fn next_business_day(mut date: Date) -> Date {
    loop {
        date = match date.next_day() {
            Some(next) => next,
            // Calendar overflow; unreachable for any realistic schedule.
            None => return date,
        };
        if is_business_day(date) {
            return date;
        }
    }
}

/// Walks forward from `start`, skipping weekends, until `count` business
/// days have elapsed.
fn add_business_days(start: Date, count: u16) -> Date {
    let mut date = start;
    for _ in 0..count {
        date = next_business_day(date);
    }
    date
}

fn format_short(date: Date) -> String {
    date.format(format_description!(
        "[weekday repr:short], [month repr:short] [day padding:none]"
    ))
    .unwrap_or_default()
}

/// Why a requested pickup date was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("scheduled date is in the past")]
    InPast,
    #[error("pickups are not available on weekends")]
    Weekend,
    #[error("scheduled date is more than 14 days ahead")]
    TooFarAhead,
}

/// Validates a requested pickup date against today (UTC).
pub fn validate_scheduled_date(date: Date, destination_id: &str) -> Result<(), ScheduleError> {
    validate_scheduled_date_on(date, OffsetDateTime::now_utc().date(), destination_id)
}

/// Pure form of [`validate_scheduled_date`] with an explicit `today`.
///
/// The destination is accepted for signature compatibility with the booking
/// form but the 14-day horizon and weekday rule do not currently vary by
/// destination. Whether they should is an open product question.
pub fn validate_scheduled_date_on(
    date: Date,
    today: Date,
    _destination_id: &str,
) -> Result<(), ScheduleError> {
    if date < today {
        return Err(ScheduleError::InPast);
    }
    if is_weekend(date) {
        return Err(ScheduleError::Weekend);
    }
    if (date - today).whole_days() > MAX_SCHEDULE_DAYS_AHEAD {
        return Err(ScheduleError::TooFarAhead);
    }
    Ok(())
}
