//! AirQ Daemon - air-quality forecast service
//!
//! Endpoints:
//! - `GET /health` reports whether the classifier loaded
//! - `POST /forecast` returns an hourly, daily or extended forecast series

use airq_daemon::config::ClassifierKind;
use airq_daemon::error::{DaemonError, DaemonResult};
use airq_daemon::{DaemonConfig, Server};
use airq_forecast::{INDEX_CEILING, INDEX_FLOOR};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AirQ Daemon CLI
#[derive(Parser)]
#[command(name = "airqd")]
#[command(about = "AirQ Daemon - air-quality forecast service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "AIRQ_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides the configuration file
    #[arg(short, long, env = "AIRQ_LISTEN_ADDR")]
    listen: Option<String>,

    /// Serialized model path, overrides the configuration file
    #[arg(short, long, env = "AIRQ_MODEL")]
    model: Option<PathBuf>,

    /// Classifier implementation, overrides the configuration file
    #[arg(long, value_enum, env = "AIRQ_CLASSIFIER")]
    classifier: Option<ClassifierKind>,

    /// Log level
    #[arg(long, env = "AIRQ_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "AIRQ_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(model) = cli.model {
        config.classifier.model_path = model;
    }
    if let Some(kind) = cli.classifier {
        config.classifier.kind = kind;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let server = Server::new(config.clone());
    let classifier = server
        .state()
        .classifier_name()
        .unwrap_or("NOT LOADED")
        .to_string();

    // Print startup banner
    println!(
        r#"
  ============================================================
   AirQ - Air-Quality Forecast Service
  ============================================================
   Version:     {}
   Classifier:  {}
   Index range: {} - {}
   Listening:   http://{}

   Endpoints:
     GET  /health   - Health check
     POST /forecast - Forecast series (hourly | daily | extended)
  ============================================================
"#,
        env!("CARGO_PKG_VERSION"),
        classifier,
        INDEX_FLOOR,
        INDEX_CEILING,
        config.server.listen_addr
    );

    server.run().await
}
