//! Data model shared by the forecast pipeline

use crate::error::{ForecastError, ForecastResult};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current environmental readings a forecast is projected from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// PM2.5 concentration (µg/m³)
    pub pm25: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
}

impl EnvironmentSnapshot {
    pub const DEFAULT_PM25: f64 = 150.0;
    pub const DEFAULT_TEMPERATURE: f64 = 20.0;
    pub const DEFAULT_HUMIDITY: f64 = 60.0;
    pub const DEFAULT_WIND_SPEED: f64 = 5.0;
    /// Highest accepted PM2.5 reading (µg/m³); well past any recorded ambient level
    pub const MAX_PM25: f64 = 10_000.0;

    /// Build a validated snapshot
    pub fn new(pm25: f64, temperature: f64, humidity: f64, wind_speed: f64) -> ForecastResult<Self> {
        let snapshot = Self {
            pm25,
            temperature,
            humidity,
            wind_speed,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check every reading against its physical domain
    pub fn validate(&self) -> ForecastResult<()> {
        let fields = [
            ("pm25", self.pm25),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("wind_speed", self.wind_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ForecastError::InvalidSnapshot(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        if !(0.0..=Self::MAX_PM25).contains(&self.pm25) {
            return Err(ForecastError::InvalidSnapshot(format!(
                "pm25 must be within 0..={}, got {}",
                Self::MAX_PM25,
                self.pm25
            )));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(ForecastError::InvalidSnapshot(format!(
                "humidity must be within 0..=100, got {}",
                self.humidity
            )));
        }
        if self.wind_speed <= 0.0 {
            return Err(ForecastError::InvalidSnapshot(format!(
                "wind_speed must be > 0, got {}",
                self.wind_speed
            )));
        }
        Ok(())
    }
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            pm25: Self::DEFAULT_PM25,
            temperature: Self::DEFAULT_TEMPERATURE,
            humidity: Self::DEFAULT_HUMIDITY,
            wind_speed: Self::DEFAULT_WIND_SPEED,
        }
    }
}

/// Projected conditions fed to the classifier.
///
/// Field order is fixed: pm25, temperature, humidity, wind speed. Trained models
/// index features positionally, so the order must never change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

const FEATURE_COUNT: usize = 4;

impl FeatureVector {
    pub const LEN: usize = FEATURE_COUNT;

    pub fn new(pm25: f64, temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self([pm25, temperature, humidity, wind_speed])
    }

    pub fn pm25(&self) -> f64 {
        self.0[0]
    }

    pub fn temperature(&self) -> f64 {
        self.0[1]
    }

    pub fn humidity(&self) -> f64 {
        self.0[2]
    }

    pub fn wind_speed(&self) -> f64 {
        self.0[3]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Ordinal severity bucket, 0 (good) through 5 (hazardous)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Category(u8);

impl Category {
    pub const MAX: u8 = 5;

    /// Accepts only values on the severity scale
    pub fn new(value: i64) -> Option<Self> {
        if (0..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Good",
            1 => "Moderate",
            2 => "Unhealthy for Sensitive Groups",
            3 => "Unhealthy",
            4 => "Very Unhealthy",
            _ => "Hazardous",
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Category::new(value).ok_or_else(|| format!("category {} outside 0..=5", value))
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> Self {
        category.0 as i64
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Requested horizon and sampling interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// 48 hours at 1 hour intervals
    #[default]
    Hourly,
    /// 7 days at 24 hour intervals
    Daily,
    /// 14 days at 24 hour intervals
    Extended,
}

impl Granularity {
    pub fn horizon_hours(self) -> u32 {
        match self {
            Granularity::Hourly => 48,
            Granularity::Daily => 7 * 24,
            Granularity::Extended => 14 * 24,
        }
    }

    pub fn interval_hours(self) -> u32 {
        match self {
            Granularity::Hourly => 1,
            Granularity::Daily | Granularity::Extended => 24,
        }
    }

    pub fn point_count(self) -> usize {
        (self.horizon_hours() / self.interval_hours()) as usize
    }

    /// Offsets in hours, increasing, covering `[0, horizon)`
    pub fn offsets(self) -> impl Iterator<Item = u32> {
        (0..self.horizon_hours()).step_by(self.interval_hours() as usize)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Extended => "extended",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Granularity::Hourly),
            "daily" => Ok(Granularity::Daily),
            "extended" => Ok(Granularity::Extended),
            other => Err(format!(
                "unknown forecast type '{}', expected hourly, daily or extended",
                other
            )),
        }
    }
}

/// One labeled point of a forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Point timestamp (ISO-8601)
    pub time: DateTime<FixedOffset>,
    /// Severity index within the category's range
    pub index: u32,
    /// Hour of day, hourly series only
    pub hour: Option<u32>,
    /// Abbreviated weekday, daily series only
    pub day: Option<String>,
    /// Month and day of month, daily series only
    pub date: Option<String>,
    pub category: Category,
    /// Projected PM2.5 rounded to one decimal
    pub pm25: f64,
}

/// An assembled forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub granularity: Granularity,
    pub generated_at: DateTime<FixedOffset>,
    pub points: Vec<ForecastPoint>,
}
