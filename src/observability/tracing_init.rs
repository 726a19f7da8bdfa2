//! Tracing initialization with configurable logging formats.

use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install a global subscriber for the given configuration.
///
/// Output goes through libtest's capture, so it only shows for failing
/// tests or with `--nocapture`. `RUST_LOG` overrides the configured level
/// and filter.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    if tracing::dispatcher::has_been_set() {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = build_env_filter(config);
    let fmt_layer = build_fmt_layer(config);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| TracingError::Init(e.to_string()))?;

    tracing::debug!(
        level = config.level.as_str(),
        format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}

fn build_fmt_layer(config: &LoggingConfig) -> BoxedLayer {
    let base = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_file(config.file_line)
        .with_line_number(config.file_line);

    match (config.format, config.timestamps) {
        (LogFormat::Pretty, true) => base.pretty().boxed(),
        (LogFormat::Pretty, false) => base.pretty().without_time().boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Json, true) => base.json().boxed(),
        (LogFormat::Json, false) => base.json().without_time().boxed(),
    }
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    let base_level = config.level.as_str();

    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new(base_level))
    } else if let Some(filter) = config.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        let combined = format!("{base_level},{filter}");
        EnvFilter::try_new(combined).unwrap_or_else(|_| EnvFilter::new(base_level))
    } else {
        EnvFilter::new(base_level)
    }
}

/// Tracing initialization errors.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}
