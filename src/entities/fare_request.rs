use serde::{Deserialize, Serialize};

pub const DEFAULT_VEHICLE_TYPE: &str = "Car";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FareRequest {
    pub distance_km: f64,
    pub traffic_factor: f64,
    pub vehicle_type: String,
}

impl FareRequest {
    pub fn new(distance_km: f64, traffic_factor: f64, vehicle_type: impl Into<String>) -> Self {
        Self {
            distance_km,
            traffic_factor,
            vehicle_type: vehicle_type.into(),
        }
    }
}

impl Default for FareRequest {
    fn default() -> Self {
        Self::new(0.0, 1.0, DEFAULT_VEHICLE_TYPE)
    }
}
