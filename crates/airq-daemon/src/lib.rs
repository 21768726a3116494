//! AirQ daemon library
//!
//! This module provides the HTTP surface around the forecast core:
//! - Configuration loading
//! - Classifier construction at startup
//! - REST API handlers
//! - Server lifecycle management

#![deny(unsafe_code)]

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod server;

pub use api::{create_router, AppState};
pub use classifier::load_classifier;
pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
