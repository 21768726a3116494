//! Forecast series assembly

use crate::classifier::CategoryClassifier;
use crate::error::{ForecastError, ForecastResult};
use crate::index::IndexMapper;
use crate::synthesis::FeatureSynthesizer;
use crate::types::{EnvironmentSnapshot, Forecast, ForecastPoint, Granularity};
use chrono::{DateTime, Duration, FixedOffset, Local, Timelike};
use rand::Rng;
use std::sync::Arc;

/// Drives synthesis, classification and index mapping across a horizon.
///
/// Holds the shared classifier; everything else is allocated per call.
#[derive(Clone)]
pub struct ForecastAssembler {
    classifier: Arc<dyn CategoryClassifier>,
    synthesizer: FeatureSynthesizer,
}

impl ForecastAssembler {
    pub fn new(classifier: Arc<dyn CategoryClassifier>) -> Self {
        Self {
            classifier,
            synthesizer: FeatureSynthesizer::new(),
        }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Assemble a forecast starting at the current local time
    pub fn assemble(
        &self,
        base: &EnvironmentSnapshot,
        granularity: Granularity,
    ) -> ForecastResult<Forecast> {
        let now: DateTime<FixedOffset> = Local::now().into();
        let mut mapper = IndexMapper::from_entropy();
        self.assemble_at(base, granularity, now, &mut mapper)
    }

    /// Assemble a forecast from an explicit reference time and random source.
    ///
    /// `now` is the timestamp of the first point; later points are offset from it,
    /// never from a fresh clock read. Any classification failure discards the
    /// whole series.
    pub fn assemble_at<R: Rng>(
        &self,
        base: &EnvironmentSnapshot,
        granularity: Granularity,
        now: DateTime<FixedOffset>,
        mapper: &mut IndexMapper<R>,
    ) -> ForecastResult<Forecast> {
        base.validate()?;

        let interval = granularity.interval_hours();
        let mut points = Vec::with_capacity(granularity.point_count());

        for offset in granularity.offsets() {
            let features = self.synthesizer.synthesize(base, offset);
            let category = self.classifier.classify(&features).map_err(|source| {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    offset_hours = offset,
                    error = %source,
                    "Classification failed, discarding forecast"
                );
                ForecastError::Classification {
                    offset_hours: offset,
                    source,
                }
            })?;
            let index = mapper.map_category(category);
            let time = now + Duration::hours(offset as i64);

            let (hour, day, date) = match interval {
                1 => (Some(time.hour()), None, None),
                24 => (
                    None,
                    Some(time.format("%a").to_string()),
                    Some(time.format("%b %d").to_string()),
                ),
                _ => (None, None, None),
            };

            points.push(ForecastPoint {
                time,
                index,
                hour,
                day,
                date,
                category,
                pm25: round_tenth(features.pm25()),
            });
        }

        tracing::debug!(
            granularity = %granularity,
            points = points.len(),
            classifier = self.classifier.name(),
            "Assembled forecast"
        );

        Ok(Forecast {
            granularity,
            generated_at: now,
            points,
        })
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
