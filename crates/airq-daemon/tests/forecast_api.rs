//! Router tests: health reporting, forecast shapes and error mapping.

use airq_daemon::api::rest::handlers::{ForecastResponse, HealthCheckResponse};
use airq_daemon::error::ErrorResponse;
use airq_daemon::{create_router, AppState};
use airq_forecast::{
    Category, CategoryClassifier, ClassifierError, FeatureVector, Granularity, IndexRange,
    TreeEnsembleClassifier,
};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

const BUNDLED_MODEL: &str = include_str!("../../../models/forecast_classifier_v1.json");

struct BrokenClassifier;

impl CategoryClassifier for BrokenClassifier {
    fn name(&self) -> &str {
        "broken"
    }

    fn classify(&self, _features: &FeatureVector) -> Result<Category, ClassifierError> {
        Err(ClassifierError::Unavailable("model evaluation failed".to_string()))
    }
}

fn app_with(classifier: Option<Arc<dyn CategoryClassifier>>) -> Router {
    create_router(AppState::new(classifier), true)
}

fn app() -> Router {
    let model = TreeEnsembleClassifier::from_json(BUNDLED_MODEL).unwrap();
    app_with(Some(Arc::new(model)))
}

fn forecast_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/forecast")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send<T: DeserializeOwned>(app: Router, request: Request<Body>) -> (StatusCode, T) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body): (_, HealthCheckResponse) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    assert!(body.model_loaded);
    assert_eq!(body.classifier.as_deref(), Some("forecast_classifier_v1"));
    assert_eq!(body.index_range, [100, 1000]);
}

#[tokio::test]
async fn health_answers_without_model() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body): (_, HealthCheckResponse) = send(app_with(None), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "degraded");
    assert!(!body.model_loaded);
    assert!(body.classifier.is_none());
}

#[tokio::test]
async fn forecast_refused_without_model() {
    let (status, body): (_, ErrorResponse) = send(app_with(None), forecast_request("{}")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.code, "MODEL_UNAVAILABLE");
}

#[tokio::test]
async fn hourly_forecast_with_defaults() {
    let (status, body): (_, ForecastResponse) = send(app(), forecast_request("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "success");
    assert_eq!(body.forecast_type, Granularity::Hourly);
    assert_eq!(body.model_used, "forecast_classifier_v1");
    assert_eq!(body.index_range, [100, 1000]);
    assert_eq!(body.forecasts.len(), 48);

    let first = &body.forecasts[0];
    assert_eq!(first.pm25, 150.0);
    assert_eq!(first.category.value(), 4);
    assert!(first.hour.is_some());
    assert!(first.day.is_none() && first.date.is_none());
    assert_eq!(
        body.forecasts[1].time - first.time,
        chrono::Duration::hours(1)
    );

    for point in &body.forecasts {
        let range = IndexRange::for_category(point.category.value() as i64);
        assert!(range.contains(point.index));
    }
}

#[tokio::test]
async fn daily_and_extended_forecasts() {
    for (kind, expected) in [("daily", 7), ("extended", 14)] {
        let body = format!(r#"{{"type": "{}", "pm25": 20, "wind_speed": 2.5}}"#, kind);
        let (status, response): (_, ForecastResponse) = send(app(), forecast_request(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.forecast_type.as_str(), kind);
        assert_eq!(response.forecasts.len(), expected);
        for point in &response.forecasts {
            assert!(point.hour.is_none());
            assert!(point.day.is_some() && point.date.is_some());
        }
        for pair in response.forecasts.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, chrono::Duration::hours(24));
        }
    }
}

#[tokio::test]
async fn null_labels_are_serialized() {
    let response = app().oneshot(forecast_request(r#"{"type": "daily"}"#)).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let first = &value["forecasts"][0];
    assert!(first["hour"].is_null());
    assert!(first["day"].is_string());
    assert!(first["time"].is_string());
    assert!(first["category"].is_u64());
}

#[tokio::test]
async fn malformed_input_is_client_error() {
    for body in [
        r#"{"pm25": "high"}"#,
        r#"{"type": "weekly"}"#,
        r#"{"humidity": 140}"#,
        r#"{"wind_speed": 0}"#,
        "not json",
    ] {
        let (status, response): (_, ErrorResponse) = send(app(), forecast_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(!response.error.is_empty());
    }
}

#[tokio::test]
async fn oversized_pm25_rejected_before_assembly() {
    let (status, body): (_, ErrorResponse) =
        send(app(), forecast_request(r#"{"pm25": 1e308}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn extreme_pm25_is_hazardous() {
    let (status, body): (_, ForecastResponse) =
        send(app(), forecast_request(r#"{"pm25": 9000}"#)).await;

    assert_eq!(status, StatusCode::OK);
    for point in &body.forecasts {
        assert_eq!(point.category.value(), 5);
        assert!(point.pm25.is_finite());
    }
}

#[tokio::test]
async fn classifier_failure_fails_whole_request() {
    let app = app_with(Some(Arc::new(BrokenClassifier)));
    let (status, body): (_, ErrorResponse) = send(app, forecast_request("{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, "CLASSIFICATION_ERROR");
}

#[tokio::test]
async fn cors_headers_present() {
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://dashboard.local")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
