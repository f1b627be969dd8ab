use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::fare_request::DEFAULT_VEHICLE_TYPE;
use crate::error::{invalid_config_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePricing {
    pub base_fare: i64,
    pub rate_per_km: i64,
}

impl VehiclePricing {
    pub const fn new(base_fare: i64, rate_per_km: i64) -> Self {
        Self {
            base_fare,
            rate_per_km,
        }
    }

    pub fn estimate(&self, distance_km: f64, traffic_factor: f64) -> f64 {
        (self.base_fare as f64 + distance_km * self.rate_per_km as f64) * traffic_factor
    }
}

/// Vehicle tag to pricing lookup.
///
/// A table always holds an entry for its fallback tag, which is used for any
/// tag it does not know.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PricingTableData")]
pub struct PricingTable {
    fallback: String,
    vehicles: HashMap<String, VehiclePricing>,
}

#[derive(Deserialize)]
struct PricingTableData {
    #[serde(default = "default_fallback")]
    fallback: String,
    vehicles: HashMap<String, VehiclePricing>,
}

fn default_fallback() -> String {
    DEFAULT_VEHICLE_TYPE.into()
}

impl TryFrom<PricingTableData> for PricingTable {
    type Error = Error;

    fn try_from(data: PricingTableData) -> Result<Self, Self::Error> {
        PricingTable::new(data.fallback, data.vehicles)
    }
}

impl PricingTable {
    pub fn new(
        fallback: impl Into<String>,
        vehicles: HashMap<String, VehiclePricing>,
    ) -> Result<Self, Error> {
        let fallback = fallback.into();

        if !vehicles.contains_key(&fallback) {
            return Err(invalid_config_error(format!(
                "pricing table has no entry for fallback vehicle type {:?}",
                fallback
            )));
        }

        Ok(Self { fallback, vehicles })
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(invalid_config_error)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn lookup(&self, vehicle_type: &str) -> VehiclePricing {
        match self.vehicles.get(vehicle_type) {
            Some(pricing) => *pricing,
            None => self.vehicles[&self.fallback],
        }
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        let vehicles = HashMap::from([
            ("Bike".to_string(), VehiclePricing::new(50, 40)),
            ("Car".to_string(), VehiclePricing::new(100, 60)),
            ("AC Car".to_string(), VehiclePricing::new(150, 100)),
        ]);

        Self {
            fallback: DEFAULT_VEHICLE_TYPE.into(),
            vehicles,
        }
    }
}

#[test]
fn default_table_lookups() {
    let table = PricingTable::default();

    assert_eq!(table.lookup("Bike"), VehiclePricing::new(50, 40));
    assert_eq!(table.lookup("Car"), VehiclePricing::new(100, 60));
    assert_eq!(table.lookup("AC Car"), VehiclePricing::new(150, 100));
    assert_eq!(table.lookup("Rickshaw"), VehiclePricing::new(100, 60));
    assert_eq!(table.lookup("car"), VehiclePricing::new(100, 60));
}

#[test]
fn table_requires_fallback_entry() {
    let vehicles = HashMap::from([("Bike".to_string(), VehiclePricing::new(50, 40))]);

    let err = PricingTable::new("Car", vehicles).unwrap_err();
    assert_eq!(err.code, 2);
}

#[test]
fn table_from_json() {
    let table = PricingTable::from_json(
        r#"{
            "fallback": "Sedan",
            "vehicles": {
                "Sedan": {"base_fare": 120, "rate_per_km": 70},
                "Van": {"base_fare": 200, "rate_per_km": 90}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(table.fallback(), "Sedan");
    assert_eq!(table.lookup("Van"), VehiclePricing::new(200, 90));
    assert_eq!(table.lookup("Bike"), VehiclePricing::new(120, 70));
}

#[test]
fn table_from_json_rejects_missing_fallback() {
    let err = PricingTable::from_json(r#"{"vehicles": {"Bike": {"base_fare": 50, "rate_per_km": 40}}}"#)
        .unwrap_err();
    assert_eq!(err.code, 2);
}
