//! Plugin configuration.
//!
//! Values come from built-in defaults, an optional config file, and
//! `COREMARK_PRO__*` environment variables, in increasing priority.

use crate::schema::Workload;
use crate::{Error, Result};

use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "COREMARK_PRO";

const DEFAULT_INSTALL_DIR: &str = "/root/coremark-pro";
const DEFAULT_LOG_PATH: &str = "builds/linux64/gcc64/logs/linux64.gcc64.log";
const DEFAULT_WORKLOADS_DIR: &str = "workloads";
const DEFAULT_MAKE_PROGRAM: &str = "make";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Location of the benchmark installation
    #[serde(default)]
    pub coremark: CoreMarkConfig,
    /// Logging options
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the CoreMark-PRO suite lives and how to drive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMarkConfig {
    /// Suite root; `make` runs here
    #[serde(default = "default_install_dir")]
    pub install_dir: PathBuf,
    /// Run log written by the suite; relative paths resolve against `install_dir`
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Directory holding `<workload>/<workload>.opt`, relative to `install_dir` unless absolute
    #[serde(default = "default_workloads_dir")]
    pub workloads_dir: PathBuf,
    /// Program used to run the suite
    #[serde(default = "default_make_program")]
    pub make_program: String,
}

fn default_install_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INSTALL_DIR)
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn default_workloads_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WORKLOADS_DIR)
}

fn default_make_program() -> String {
    DEFAULT_MAKE_PROGRAM.to_string()
}

impl Default for CoreMarkConfig {
    fn default() -> Self {
        Self {
            install_dir: default_install_dir(),
            log_path: default_log_path(),
            workloads_dir: default_workloads_dir(),
            make_program: default_make_program(),
        }
    }
}

impl CoreMarkConfig {
    /// Configuration rooted at `install_dir` with default relative layout.
    pub fn with_install_dir(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            ..Self::default()
        }
    }

    /// Absolute path of the run log.
    pub fn log_file(&self) -> PathBuf {
        self.install_dir.join(&self.log_path)
    }

    /// Absolute path of a workload's `.opt` file.
    pub fn opt_file(&self, workload: Workload) -> PathBuf {
        let name = workload.as_str();
        self.install_dir
            .join(&self.workloads_dir)
            .join(name)
            .join(format!("{name}.opt"))
    }
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults and the environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration from a file, with environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path.as_ref()))
    }

    fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .set_default("coremark.install_dir", DEFAULT_INSTALL_DIR)?
            .set_default("coremark.log_path", DEFAULT_LOG_PATH)?
            .set_default("coremark.workloads_dir", DEFAULT_WORKLOADS_DIR)?
            .set_default("coremark.make_program", DEFAULT_MAKE_PROGRAM)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.coremark.install_dir.as_os_str().is_empty() {
            return Err(Error::config_key(
                "install directory must not be empty",
                "coremark.install_dir",
            ));
        }
        if self.coremark.log_path.as_os_str().is_empty() {
            return Err(Error::config_key("log path must not be empty", "coremark.log_path"));
        }
        if self.coremark.make_program.trim().is_empty() {
            return Err(Error::config_key(
                "make program must not be empty",
                "coremark.make_program",
            ));
        }
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::config_key(
                format!("unknown log level '{}'", self.logging.level),
                "logging.level",
            ));
        }
        Ok(())
    }
}
