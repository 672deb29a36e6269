//! Pricing and delivery-estimation core for a Caribbean cargo-shipping
//! portal.
//!
//! Two stateless engines over a shared rate table:
//!
//! - [`calculate_booking_pricing`] turns a destination, service tier and a
//!   list of packages into an itemized quote (billable weights, multi-package
//!   discount, insurance, express surcharge, grand total).
//! - [`calculate_delivery_estimate`] turns a service tier, destination and
//!   scheduled ship date into a business-day delivery window with a customs
//!   buffer.
//!
//! Both are pure functions: safe to call once per request from any number of
//! threads, no caching, no side effects. The surrounding portal (routing,
//! persistence, payments) lives elsewhere and consumes these results as-is.

pub mod domain;
pub mod infra;

pub use domain::{
    calculate_booking_pricing, calculate_delivery_estimate, is_business_day, is_weekend,
    next_business_day, validate_scheduled_date, validate_scheduled_date_on, BookingPricing,
    Confidence, DateRange, DeliveryEstimate, Destination, EstimateRequest, PackageInput,
    PackageQuote, PricingError, ScheduleError, Service, ServiceType, TransitDays,
    MAX_SCHEDULE_DAYS_AHEAD,
};
pub use infra::{RateTable, RateTableError};
