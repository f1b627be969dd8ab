use std::sync::Arc;

use crate::entities::{FareQuote, FareRequest, HealthStatus};

pub trait FareAPI {
    fn suggest_fare(&self, request: FareRequest) -> FareQuote;
}

pub trait HealthAPI {
    fn health(&self) -> HealthStatus;
}

pub trait API: FareAPI + HealthAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
