//! Logging setup and step timing.

use crate::config::LoggingConfig;
use crate::{Error, Result};

use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so that stdout carries only step output.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.to_lowercase()))
        .map_err(|e| Error::config_key(format!("invalid log filter: {e}"), "logging.level"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::internal(format!("Failed to set logging subscriber: {e}")))
}

/// Wall-clock timer for one plugin step.
pub struct StepTimer {
    name: &'static str,
    start: Instant,
    attributes: Vec<(&'static str, String)>,
}

impl StepTimer {
    /// Start timing a step.
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            attributes: Vec::new(),
        }
    }

    /// Attach an attribute reported when the timer finishes.
    pub fn set_attribute(&mut self, key: &'static str, value: impl Into<String>) {
        self.attributes.push((key, value.into()));
    }

    /// Step name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Log the step duration with its attributes and return it in seconds.
    pub fn finish(self, outcome: &str) -> f64 {
        let elapsed = self.elapsed_secs();
        let attributes = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(
            step = self.name,
            outcome,
            elapsed_secs = elapsed,
            attributes = %attributes,
            "step finished"
        );
        elapsed
    }
}
