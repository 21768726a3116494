//! Application state for API handlers

use airq_forecast::{CategoryClassifier, ForecastAssembler};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Forecast pipeline, absent when the classifier failed to load
    pub assembler: Option<Arc<ForecastAssembler>>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(classifier: Option<Arc<dyn CategoryClassifier>>) -> Self {
        Self {
            assembler: classifier.map(|c| Arc::new(ForecastAssembler::new(c))),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Whether forecasts can be served
    pub fn model_loaded(&self) -> bool {
        self.assembler.is_some()
    }

    pub fn classifier_name(&self) -> Option<&str> {
        self.assembler.as_deref().map(ForecastAssembler::classifier_name)
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        format_uptime(duration.num_seconds())
    }
}

fn format_uptime(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}
