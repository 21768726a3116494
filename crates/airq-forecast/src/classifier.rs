//! Severity classification contract

use crate::error::ClassifierError;
use crate::types::{Category, FeatureVector};

/// Buckets a projected feature vector into a severity category.
///
/// Implementations must be read-only after construction; a single instance is
/// shared by every concurrent request.
pub trait CategoryClassifier: Send + Sync {
    /// Identifier reported in health output and logs
    fn name(&self) -> &str;

    /// Classify one feature vector
    fn classify(&self, features: &FeatureVector) -> Result<Category, ClassifierError>;
}

/// Convert a raw model output into a category
pub(crate) fn category_from_raw(raw: i64) -> Result<Category, ClassifierError> {
    Category::new(raw).ok_or(ClassifierError::CategoryOutOfRange(raw))
}

/// Upper PM2.5 bound (µg/m³) of categories 0 through 4; anything above is 5
const PM25_BREAKPOINTS: [f64; 5] = [9.0, 35.4, 55.4, 125.4, 225.4];

/// Rule-based classifier using EPA PM2.5 breakpoints.
///
/// Only the projected PM2.5 participates; the other features are ignored.
#[derive(Debug, Clone, Default)]
pub struct Pm25BreakpointClassifier;

impl Pm25BreakpointClassifier {
    pub const NAME: &'static str = "pm25_breakpoints_v1";

    pub fn new() -> Self {
        Self
    }
}

impl CategoryClassifier for Pm25BreakpointClassifier {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn classify(&self, features: &FeatureVector) -> Result<Category, ClassifierError> {
        let pm25 = features.pm25();
        let raw = PM25_BREAKPOINTS
            .iter()
            .position(|upper| pm25 <= *upper)
            .unwrap_or(PM25_BREAKPOINTS.len());
        category_from_raw(raw as i64)
    }
}
