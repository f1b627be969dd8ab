mod fare_request;
mod health;
mod pricing;
mod quote;

pub use fare_request::{FareRequest, DEFAULT_VEHICLE_TYPE};
pub use health::HealthStatus;
pub use pricing::{PricingTable, VehiclePricing};
pub use quote::{FareQuote, CURRENCY};
