mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{DynAPI, API};
use crate::error::Error;
use crate::server::handlers::{fares, health};

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::check))
        .route("/suggest-fare", post(fares::suggest))
        .layer(Extension(api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutdown signal received");
}

#[cfg(test)]
use axum::body::Body;
#[cfg(test)]
use axum::http::{header, Method, Request, StatusCode};
#[cfg(test)]
use axum::response::Response;
#[cfg(test)]
use serde_json::{json, Value};
#[cfg(test)]
use tokio_test::block_on;
#[cfg(test)]
use tower::ServiceExt;

#[cfg(test)]
fn send(request: Request<Body>) -> Response {
    block_on(router(crate::engine::Engine::default()).oneshot(request)).unwrap()
}

#[cfg(test)]
fn body_json(response: Response) -> Value {
    let bytes = block_on(hyper::body::to_bytes(response.into_body())).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[cfg(test)]
fn suggest(body: impl Into<Body>) -> Response {
    send(
        Request::builder()
            .method(Method::POST)
            .uri("/suggest-fare")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
    )
}

#[test]
fn health_is_fixed() {
    for _ in 0..2 {
        suggest(json!({"distance_km": 3}).to_string());

        let response = send(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        );

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response), json!({"status": "healthy"}));
    }
}

#[test]
fn suggest_fare_for_car() {
    let response = suggest(
        json!({"distance_km": 10, "traffic_factor": 1.0, "vehicle_type": "Car"}).to_string(),
    );

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response),
        json!({"min_fare": 630, "max_fare": 840, "suggested_fare": 700, "currency": "PKR"})
    );
}

#[test]
fn suggest_fare_for_bike_in_traffic() {
    let response = suggest(
        json!({"distance_km": 5, "traffic_factor": 1.5, "vehicle_type": "Bike"}).to_string(),
    );

    assert_eq!(
        body_json(response),
        json!({"min_fare": 337, "max_fare": 450, "suggested_fare": 375, "currency": "PKR"})
    );
}

#[test]
fn suggest_fare_for_ac_car() {
    let response = suggest(
        json!({"distance_km": 0, "traffic_factor": 1.0, "vehicle_type": "AC Car"}).to_string(),
    );

    assert_eq!(
        body_json(response),
        json!({"min_fare": 135, "max_fare": 180, "suggested_fare": 150, "currency": "PKR"})
    );
}

#[test]
fn empty_body_object_uses_defaults() {
    let defaulted = body_json(suggest("{}"));
    let explicit = body_json(suggest(
        json!({"distance_km": 0, "traffic_factor": 1.0, "vehicle_type": "Car"}).to_string(),
    ));

    assert_eq!(defaulted, explicit);
    assert_eq!(defaulted["suggested_fare"], json!(100));
}

#[test]
fn malformed_bodies_are_client_errors() {
    for body in ["not json", "[10, 1.0]", "\"Car\""] {
        let response = suggest(body);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body_json(response)["code"], json!(102));
    }
}

#[test]
fn non_numeric_distance_is_client_error() {
    let response = suggest(json!({"distance_km": "far"}).to_string());

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response),
        json!({"code": 101, "error": "invalid input"})
    );
}

#[test]
fn any_origin_is_allowed() {
    let response = send(
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://rider.example.com")
            .body(Body::empty())
            .unwrap(),
    );

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[test]
fn preflight_is_answered() {
    let response = send(
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/suggest-fare")
            .header(header::ORIGIN, "https://rider.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap(),
    );

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[test]
fn boolean_distance_counts_as_one_km() {
    let response = suggest(json!({"distance_km": true}).to_string());

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response),
        json!({"min_fare": 144, "max_fare": 192, "suggested_fare": 160, "currency": "PKR"})
    );
}
