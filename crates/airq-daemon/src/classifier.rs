//! Startup-time classifier construction

use crate::config::{ClassifierConfig, ClassifierKind};
use airq_forecast::{
    CategoryClassifier, ModelLoadError, Pm25BreakpointClassifier, TreeEnsembleClassifier,
};
use std::sync::Arc;

/// Build the configured classifier.
///
/// A failure here is not retried; the daemon keeps serving health checks and
/// refuses forecasts.
pub fn load_classifier(
    config: &ClassifierConfig,
) -> Result<Arc<dyn CategoryClassifier>, ModelLoadError> {
    match config.kind {
        ClassifierKind::TreeEnsemble => {
            tracing::info!(path = %config.model_path.display(), "Loading forecast model");
            let model = TreeEnsembleClassifier::from_path(&config.model_path)?;
            tracing::info!(
                name = model.name(),
                trees = model.num_trees(),
                "Forecast model loaded"
            );
            Ok(Arc::new(model))
        }
        ClassifierKind::Pm25Breakpoints => {
            tracing::info!("Using PM2.5 breakpoint classifier");
            Ok(Arc::new(Pm25BreakpointClassifier::new()))
        }
    }
}
