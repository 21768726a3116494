//! Deterministic projection of a snapshot to a future offset
//!
//! Projections are smooth periodic functions of the offset rather than random
//! draws, so the same snapshot and offset always produce the same vector and a
//! refreshed forecast keeps its shape.

use crate::types::{EnvironmentSnapshot, FeatureVector};
use std::f64::consts::PI;

/// Relative PM2.5 drift amplitude over the daily cycle
const PM25_DRIFT: f64 = 0.15;
/// Extra PM2.5 variation proportional to the drift
const PM25_VARIATION: f64 = 0.2;
/// Daily temperature swing (°C)
const TEMPERATURE_SWING: f64 = 3.0;
/// Humidity change per degree of temperature swing
const HUMIDITY_PER_DEGREE: f64 = 2.0;
/// Relative wind variation over the 16 hour cycle
const WIND_VARIATION: f64 = 0.2;

const TEMPERATURE_RANGE: (f64, f64) = (-20.0, 50.0);
const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);
const MIN_WIND_SPEED: f64 = 0.1;

/// Stateless feature synthesizer
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureSynthesizer;

impl FeatureSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Project `base` forward by `offset_hours`
    pub fn synthesize(&self, base: &EnvironmentSnapshot, offset_hours: u32) -> FeatureVector {
        let hours = offset_hours as f64;

        // 24h period, bounded to ±15% relative drift
        let hour_factor = (hours / 12.0 * PI).sin() * PM25_DRIFT;
        let pm25 = base.pm25 * (1.0 + hour_factor) + hour_factor * base.pm25 * PM25_VARIATION;

        let temp_cycle = (hours / 12.0 * PI).cos() * TEMPERATURE_SWING;
        let temperature = base.temperature + temp_cycle;

        // humidity moves against temperature
        let humidity = base.humidity - temp_cycle * HUMIDITY_PER_DEGREE;

        // 16h period
        let wind_cycle = (hours / 8.0 * PI).sin() * base.wind_speed * WIND_VARIATION;
        let wind_speed = base.wind_speed + wind_cycle;

        FeatureVector::new(
            pm25.max(0.0),
            temperature.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1),
            humidity.clamp(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1),
            wind_speed.max(MIN_WIND_SPEED),
        )
    }
}
