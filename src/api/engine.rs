//! Plugin engine: configuration, runner and step dispatch.

use super::StepId;
use crate::config::Config;
use crate::parser::LogFormat;
use crate::runner::{ProcessRunner, SystemRunner};
use crate::schema::{self, CertifyParams, StepOutput, SuccessOutput, TuneParams};
use crate::steps;
use crate::telemetry::StepTimer;
use crate::Result;

use serde::Serialize;
use std::future::Future;
use std::path::Path;
use tracing::Instrument;
use uuid::Uuid;

/// Output of any step, for callers that dispatch by [`StepId`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepResponse {
    /// Output of `tune-iterations`
    Tuned(StepOutput<CertifyParams>),
    /// Output of `certify-all`
    Certified(StepOutput<SuccessOutput>),
}

impl StepResponse {
    /// Identifier of the output variant.
    pub fn output_id(&self) -> &'static str {
        match self {
            StepResponse::Tuned(output) => output.output_id(),
            StepResponse::Certified(output) => output.output_id(),
        }
    }

    /// Check if the step succeeded.
    pub fn is_success(&self) -> bool {
        self.output_id() == "success"
    }
}

/// The CoreMark-PRO plugin.
pub struct CoreMarkPro {
    config: Config,
    runner: Box<dyn ProcessRunner>,
    format: LogFormat,
}

impl CoreMarkPro {
    /// Create a plugin builder.
    pub fn builder() -> CoreMarkProBuilder {
        CoreMarkProBuilder::new()
    }

    /// Create a plugin that runs the real suite.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            runner: Box::new(SystemRunner::new()),
            format: LogFormat::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tune per-workload iteration counts to the requested run time.
    pub async fn tune_iterations(&self, params: &TuneParams) -> Result<StepOutput<CertifyParams>> {
        self.instrumented(StepId::TuneIterations, async {
            steps::tune_iterations(&self.config.coremark, self.runner.as_ref(), &self.format, params).await
        })
        .await
    }

    /// Run and score every workload.
    pub async fn certify_all(&self, params: &CertifyParams) -> Result<StepOutput<SuccessOutput>> {
        self.instrumented(StepId::CertifyAll, async {
            steps::certify_all(&self.config.coremark, self.runner.as_ref(), &self.format, params).await
        })
        .await
    }

    /// Tune, then certify with the tuned iteration counts.
    pub async fn tune_and_certify(&self, params: &TuneParams) -> Result<StepOutput<SuccessOutput>> {
        match self.tune_iterations(params).await? {
            StepOutput::Success(tuned) => self.certify_all(&tuned).await,
            StepOutput::Error(error) => Ok(StepOutput::Error(error)),
        }
    }

    /// Run a step with its input read from a YAML or JSON file.
    pub async fn run_step(&self, step: StepId, input: impl AsRef<Path>) -> Result<StepResponse> {
        match step {
            StepId::TuneIterations => {
                let params: TuneParams = schema::load_input(input)?;
                Ok(StepResponse::Tuned(self.tune_iterations(&params).await?))
            }
            StepId::CertifyAll => {
                let params: CertifyParams = schema::load_input(input)?;
                Ok(StepResponse::Certified(self.certify_all(&params).await?))
            }
        }
    }

    async fn instrumented<T, F>(&self, step: StepId, fut: F) -> Result<StepOutput<T>>
    where
        F: Future<Output = Result<StepOutput<T>>>,
    {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("step", step = %step, run_id = %run_id);

        async move {
            let mut timer = StepTimer::start(step.id());
            timer.set_attribute("install_dir", self.config.coremark.install_dir.display().to_string());

            let result = fut.await;
            match &result {
                Ok(output) => {
                    timer.finish(output.output_id());
                }
                Err(e) => {
                    tracing::error!(category = e.category(), error = %e, "step aborted");
                    timer.finish("aborted");
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Builder for [`CoreMarkPro`].
pub struct CoreMarkProBuilder {
    config: Config,
    runner: Option<Box<dyn ProcessRunner>>,
    format: LogFormat,
}

impl CoreMarkProBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            runner: None,
            format: LogFormat::default(),
        }
    }

    /// Use the given configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Point at a suite installed in `install_dir`.
    pub fn with_install_dir(mut self, install_dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.coremark.install_dir = install_dir.into();
        self
    }

    /// Use a custom process runner.
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }

    /// Use a custom log layout.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate the configuration and build the plugin.
    pub fn build(self) -> Result<CoreMarkPro> {
        self.config.validate()?;
        Ok(CoreMarkPro {
            config: self.config,
            runner: self.runner.unwrap_or_else(|| Box::new(SystemRunner::new())),
            format: self.format,
        })
    }
}

impl Default for CoreMarkProBuilder {
    fn default() -> Self {
        Self::new()
    }
}
