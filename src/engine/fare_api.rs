use super::Engine;

use crate::{
    api::FareAPI,
    entities::{FareQuote, FareRequest},
};

impl FareAPI for Engine {
    #[tracing::instrument(skip(self))]
    fn suggest_fare(&self, request: FareRequest) -> FareQuote {
        let pricing = self.pricing.lookup(&request.vehicle_type);
        let estimated_fare = pricing.estimate(request.distance_km, request.traffic_factor);

        tracing::debug!(
            base_fare = pricing.base_fare,
            rate_per_km = pricing.rate_per_km,
            estimated_fare,
            "estimated fare"
        );

        FareQuote::from_estimate(estimated_fare)
    }
}

#[cfg(test)]
fn quote(distance_km: f64, traffic_factor: f64, vehicle_type: &str) -> FareQuote {
    Engine::default().suggest_fare(FareRequest::new(distance_km, traffic_factor, vehicle_type))
}

#[test]
fn car_ten_km() {
    let quote = quote(10.0, 1.0, "Car");

    assert_eq!(quote.min_fare, 630);
    assert_eq!(quote.max_fare, 840);
    assert_eq!(quote.suggested_fare, 700);
    assert_eq!(quote.currency, "PKR");
}

#[test]
fn bike_in_traffic() {
    let quote = quote(5.0, 1.5, "Bike");

    assert_eq!(quote.min_fare, 337);
    assert_eq!(quote.max_fare, 450);
    assert_eq!(quote.suggested_fare, 375);
}

#[test]
fn ac_car_base_fare_only() {
    let quote = quote(0.0, 1.0, "AC Car");

    assert_eq!(quote.min_fare, 135);
    assert_eq!(quote.max_fare, 180);
    assert_eq!(quote.suggested_fare, 150);
}

#[test]
fn defaults_match_explicit_car() {
    let engine = Engine::default();

    assert_eq!(
        engine.suggest_fare(FareRequest::default()),
        engine.suggest_fare(FareRequest::new(0.0, 1.0, "Car"))
    );
}

#[test]
fn unknown_vehicle_prices_as_car() {
    for (distance_km, traffic_factor) in [(0.0, 1.0), (3.2, 1.1), (42.0, 2.5)] {
        assert_eq!(
            quote(distance_km, traffic_factor, "Hovercraft"),
            quote(distance_km, traffic_factor, "Car")
        );
    }
}

#[test]
fn zero_traffic_factor_is_free() {
    let quote = quote(25.0, 0.0, "AC Car");

    assert_eq!(quote.min_fare, 0);
    assert_eq!(quote.max_fare, 0);
    assert_eq!(quote.suggested_fare, 0);
}

#[test]
fn negative_distance_flows_through() {
    // (100 + -5 * 60) * 1.0 = -200
    let quote = quote(-5.0, 1.0, "Car");

    assert_eq!(quote.suggested_fare, -200);
    assert_eq!(quote.min_fare, -180);
    assert_eq!(quote.max_fare, -240);
}

#[test]
fn range_brackets_suggestion() {
    use rand::Rng;

    let engine = Engine::default();
    let mut rng = rand::thread_rng();

    for _ in 0..1000 {
        let vehicle_type = ["Bike", "Car", "AC Car"][rng.gen_range(0..3)];
        let request = FareRequest::new(
            rng.gen_range(0.0..500.0),
            rng.gen_range(0.0..5.0),
            vehicle_type,
        );

        let quote = engine.suggest_fare(request.clone());
        assert!(
            quote.min_fare <= quote.suggested_fare && quote.suggested_fare <= quote.max_fare,
            "{:?} -> {:?}",
            request,
            quote
        );
    }
}

#[test]
fn custom_pricing_table() {
    use crate::entities::{PricingTable, VehiclePricing};
    use std::collections::HashMap;

    let pricing = PricingTable::new(
        "Van",
        HashMap::from([("Van".to_string(), VehiclePricing::new(200, 90))]),
    )
    .unwrap();
    let engine = Engine::new(pricing);

    // (200 + 2 * 90) * 1.0 = 380
    let quote = engine.suggest_fare(FareRequest::new(2.0, 1.0, "Car"));
    assert_eq!(quote.suggested_fare, 380);
    assert_eq!(engine.pricing().fallback(), "Van");
}
