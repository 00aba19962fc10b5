//! Typed input and output schema of the plugin steps.

mod params;
mod results;
mod workload;

pub use params::{BenchmarkParams, CertifyParams, Iterations, TuneParams, DEFAULT_TARGET_RUN_TIME};
pub use results::{BenchmarkItem, CertifyResult, Scores, SuccessOutput};
pub use workload::{ResultKey, Workload, AGGREGATE_NAME};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error output of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// What went wrong
    pub error: String,
}

impl ErrorOutput {
    /// Create an error output.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Output of a step: either its success payload or an [`ErrorOutput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output_id", content = "output_data", rename_all = "lowercase")]
pub enum StepOutput<T> {
    /// The step completed
    Success(T),
    /// The step failed
    Error(ErrorOutput),
}

impl<T> StepOutput<T> {
    /// Identifier of the output variant.
    pub fn output_id(&self) -> &'static str {
        match self {
            StepOutput::Success(_) => "success",
            StepOutput::Error(_) => "error",
        }
    }

    /// Check if the step succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutput::Success(_))
    }

    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            StepOutput::Success(value) => Some(value),
            StepOutput::Error(_) => None,
        }
    }
}

/// Parse a step input from YAML.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> crate::Result<T> {
    serde_yaml::from_str(yaml).map_err(crate::Error::from)
}

/// Parse a step input from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> crate::Result<T> {
    serde_json::from_str(json).map_err(crate::Error::from)
}

/// Load a step input from a YAML or JSON file.
pub fn load_input<T: DeserializeOwned>(path: impl AsRef<Path>) -> crate::Result<T> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::Error::file_access(path, e))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => from_yaml(&content),
        "json" => from_json(&content),
        _ => from_yaml(&content).or_else(|_| from_json(&content)),
    }
}
