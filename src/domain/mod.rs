//! Pure quoting logic: no I/O, no shared state, one value in, one value out.

pub mod delivery;
pub mod pricing;
pub mod reference;

pub use delivery::{
    calculate_delivery_estimate, is_business_day, is_weekend, next_business_day,
    validate_scheduled_date, validate_scheduled_date_on, Confidence, DateRange, DeliveryEstimate,
    EstimateRequest, ScheduleError, MAX_SCHEDULE_DAYS_AHEAD,
};
pub use pricing::{
    calculate_booking_pricing, BookingPricing, PackageInput, PackageQuote, PricingError,
};
pub use reference::{Destination, Service, ServiceType, TransitDays};
