use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use serde_json::{Map, Value};

use crate::api::DynAPI;
use crate::entities::{FareQuote, FareRequest, DEFAULT_VEHICLE_TYPE};
use crate::error::{invalid_input_error, Error};

pub(crate) type SuggestParams = Map<String, Value>;

pub async fn suggest(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<SuggestParams>, JsonRejection>,
) -> Result<Json<FareQuote>, Error> {
    let Json(params) = params.map_err(|rejection| {
        tracing::warn!(%rejection, "rejected fare request body");
        rejection
    })?;

    let request = fare_request(&params)?;

    Ok(api.suggest_fare(request).into())
}

/// Reads a fare request out of a JSON object.
///
/// Absent or null keys take their defaults and unknown keys are ignored.
/// Numbers may be sent as numeric strings or booleans.
pub(crate) fn fare_request(params: &SuggestParams) -> Result<FareRequest, Error> {
    let defaults = FareRequest::default();

    Ok(FareRequest {
        distance_km: number(params.get("distance_km"), defaults.distance_km)?,
        traffic_factor: number(params.get("traffic_factor"), defaults.traffic_factor)?,
        vehicle_type: vehicle_type(params.get("vehicle_type")),
    })
}

fn number(value: Option<&Value>, default: f64) -> Result<f64, Error> {
    let number = match value {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        Some(_) => None,
    };

    number
        .filter(|number| number.is_finite())
        .ok_or_else(invalid_input_error)
}

fn vehicle_type(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => DEFAULT_VEHICLE_TYPE.into(),
        Some(Value::String(tag)) => tag.clone(),
        // only a table keyed by this JSON text would price it specially
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
fn params(value: Value) -> SuggestParams {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[test]
fn empty_object_takes_defaults() {
    let request = fare_request(&params(serde_json::json!({}))).unwrap();

    assert_eq!(request, FareRequest::new(0.0, 1.0, "Car"));
}

#[test]
fn nulls_take_defaults() {
    let request = fare_request(&params(serde_json::json!({
        "distance_km": null,
        "traffic_factor": null,
        "vehicle_type": null,
    })))
    .unwrap();

    assert_eq!(request, FareRequest::default());
}

#[test]
fn integers_and_numeric_strings_coerce() {
    let request = fare_request(&params(serde_json::json!({
        "distance_km": 10,
        "traffic_factor": " 1.5 ",
        "vehicle_type": "Bike",
        "promo_code": "SPRING",
    })))
    .unwrap();

    assert_eq!(request, FareRequest::new(10.0, 1.5, "Bike"));
}

#[test]
fn booleans_coerce_to_one_and_zero() {
    let request = fare_request(&params(serde_json::json!({
        "distance_km": true,
        "traffic_factor": false,
    })))
    .unwrap();

    assert_eq!(request, FareRequest::new(1.0, 0.0, "Car"));
}

#[test]
fn non_numeric_values_are_invalid_input() {
    for value in [
        serde_json::json!({"distance_km": "ten"}),
        serde_json::json!({"distance_km": [10]}),
        serde_json::json!({"traffic_factor": {"value": 1.5}}),
        serde_json::json!({"traffic_factor": "inf"}),
    ] {
        let err = fare_request(&params(value)).unwrap_err();
        assert_eq!(err.code, 101);
    }
}

#[test]
fn non_string_vehicle_type_is_unknown() {
    let request = fare_request(&params(serde_json::json!({"vehicle_type": 3}))).unwrap();

    assert_eq!(request.vehicle_type, "3");
}
