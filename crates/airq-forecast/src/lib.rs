//! Air-quality forecast core
//!
//! This crate turns a single environmental snapshot into an ordered series of
//! forecast points:
//! - [`FeatureSynthesizer`] projects the snapshot forward in time
//! - a [`CategoryClassifier`] buckets each projection into a severity category
//! - [`IndexMapper`] turns the category into a bounded severity index
//! - [`ForecastAssembler`] drives the pipeline across a horizon
//!
//! The pipeline is synchronous and request-scoped. The classifier is the only
//! shared dependency and is read-only once constructed.

#![deny(unsafe_code)]

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod index;
pub mod model;
pub mod synthesis;
pub mod types;

pub use assembler::ForecastAssembler;
pub use classifier::{CategoryClassifier, Pm25BreakpointClassifier};
pub use error::{ClassifierError, ForecastError, ForecastResult, ModelLoadError};
pub use index::{IndexMapper, IndexRange, INDEX_CEILING, INDEX_FLOOR};
pub use model::TreeEnsembleClassifier;
pub use synthesis::FeatureSynthesizer;
pub use types::{Category, EnvironmentSnapshot, FeatureVector, Forecast, ForecastPoint, Granularity};
