use serde::{Deserialize, Serialize};

pub const CURRENCY: &str = "PKR";

const MIN_FARE_RATIO: f64 = 0.9;
const MAX_FARE_RATIO: f64 = 1.2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareQuote {
    pub min_fare: i64,
    pub max_fare: i64,
    pub suggested_fare: i64,
    pub currency: String,
}

impl FareQuote {
    /// Builds the quote range around an estimated fare.
    ///
    /// Each bound is truncated toward zero. Values outside the `i64` range
    /// saturate, and NaN becomes 0.
    pub fn from_estimate(estimated_fare: f64) -> Self {
        Self {
            min_fare: (estimated_fare * MIN_FARE_RATIO) as i64,
            max_fare: (estimated_fare * MAX_FARE_RATIO) as i64,
            suggested_fare: estimated_fare as i64,
            currency: CURRENCY.into(),
        }
    }
}

#[test]
fn truncates_toward_zero() {
    let quote = FareQuote::from_estimate(375.0);
    assert_eq!(quote.min_fare, 337);
    assert_eq!(quote.max_fare, 450);
    assert_eq!(quote.suggested_fare, 375);

    let quote = FareQuote::from_estimate(-10.5);
    assert_eq!(quote.min_fare, -9);
    assert_eq!(quote.max_fare, -12);
    assert_eq!(quote.suggested_fare, -10);
}

#[test]
fn serializes_to_wire_shape() {
    let quote = FareQuote::from_estimate(700.0);

    assert_eq!(
        serde_json::to_value(&quote).unwrap(),
        serde_json::json!({
            "min_fare": 630,
            "max_fare": 840,
            "suggested_fare": 700,
            "currency": "PKR",
        })
    );
}
