//! # CoreMark-PRO Plugin
//!
//! Workflow plugin around the CoreMark-PRO benchmark suite. It drives the
//! suite's `make certify-all` run, tunes per-workload iteration counts to a
//! target run time, and turns the suite's console output and run log into
//! typed results.
//!
//! ## Steps
//!
//! - **tune-iterations**: [`TuneParams`] → [`CertifyParams`] with tuned
//!   [`Iterations`]
//! - **certify-all**: [`CertifyParams`] → [`SuccessOutput`]
//!
//! Either step may instead produce an [`ErrorOutput`] when the benchmark run
//! exits non-zero.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coremark_pro_plugin::{CoreMarkPro, StepOutput, TuneParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let plugin = CoreMarkPro::builder()
//!         .with_install_dir("/root/coremark-pro")
//!         .build()?;
//!
//!     let params = TuneParams {
//!         target_run_time: 5,
//!         ..TuneParams::default()
//!     };
//!
//!     match plugin.tune_and_certify(&params).await? {
//!         StepOutput::Success(output) => {
//!             println!("CoreMark-PRO: {}", output.results.coremark_pro.multi_core)
//!         }
//!         StepOutput::Error(error) => eprintln!("{}", error.error),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod parser;
pub mod patcher;
pub mod runner;
pub mod schema;
pub mod steps;
pub mod telemetry;

// Re-export main types for convenience
pub use api::{all_steps, CoreMarkPro, CoreMarkProBuilder, StepId, StepResponse};
pub use config::Config;
pub use error::{Error, Result};
pub use schema::{
    BenchmarkItem, BenchmarkParams, CertifyParams, CertifyResult, ErrorOutput, Iterations,
    StepOutput, SuccessOutput, TuneParams, Workload,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
