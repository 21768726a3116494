//! Forecast handler

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use airq_forecast::{
    Category, EnvironmentSnapshot, ForecastPoint, Granularity, INDEX_CEILING, INDEX_FLOOR,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// Model identifier reported to clients
pub const MODEL_USED: &str = "forecast_classifier_v1";

/// Forecast request; every field is optional
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    #[serde(default = "default_pm25")]
    pub pm25: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_humidity")]
    pub humidity: f64,
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,
    #[serde(default, rename = "type")]
    pub forecast_type: Granularity,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            pm25: default_pm25(),
            temperature: default_temperature(),
            humidity: default_humidity(),
            wind_speed: default_wind_speed(),
            forecast_type: Granularity::default(),
        }
    }
}

fn default_pm25() -> f64 {
    EnvironmentSnapshot::DEFAULT_PM25
}

fn default_temperature() -> f64 {
    EnvironmentSnapshot::DEFAULT_TEMPERATURE
}

fn default_humidity() -> f64 {
    EnvironmentSnapshot::DEFAULT_HUMIDITY
}

fn default_wind_speed() -> f64 {
    EnvironmentSnapshot::DEFAULT_WIND_SPEED
}

impl ForecastRequest {
    pub fn snapshot(&self) -> ApiResult<EnvironmentSnapshot> {
        EnvironmentSnapshot::new(self.pm25, self.temperature, self.humidity, self.wind_speed)
            .map_err(ApiError::from)
    }
}

/// Forecast response
#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub status: String,
    pub forecast_type: Granularity,
    pub forecasts: Vec<ForecastPoint>,
    pub index_range: [u32; 2],
    pub model_used: String,
}

/// Generate a forecast series
pub async fn create_forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> ApiResult<Json<ForecastResponse>> {
    let assembler = state.assembler.as_ref().ok_or_else(|| {
        ApiError::ModelUnavailable("classifier failed to load at startup".to_string())
    })?;

    let Json(request) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let snapshot = request.snapshot()?;

    let forecast = assembler.assemble(&snapshot, request.forecast_type)?;

    let peak = forecast.points.iter().map(|p| p.category).max();
    tracing::info!(
        forecast_type = %forecast.granularity,
        points = forecast.points.len(),
        peak = peak.map(Category::label).unwrap_or("none"),
        "Forecast served"
    );

    Ok(Json(ForecastResponse {
        status: "success".to_string(),
        forecast_type: forecast.granularity,
        forecasts: forecast.points,
        index_range: [INDEX_FLOOR, INDEX_CEILING],
        model_used: MODEL_USED.to_string(),
    }))
}
