//! `certify-all`: run every workload and collect the scores.

use crate::command::BenchmarkCommand;
use crate::config::CoreMarkConfig;
use crate::parser::{parse_results_table, read_log, LogFormat};
use crate::patcher::OptPatcher;
use crate::runner::ProcessRunner;
use crate::schema::{CertifyParams, CertifyResult, StepOutput, SuccessOutput};
use crate::Result;

use tracing::{info, warn};

/// Run a certification.
///
/// 1. Write requested iteration overrides into the `.opt` files
/// 2. Run `make -s certify-all` in the installation directory
/// 3. On a non-zero exit, return its error output without parsing anything
/// 4. Parse the result tables from the output and the iteration counts from the run log
///
/// # Errors
///
/// File access failures and malformed output or log lines.
pub async fn certify_all(
    config: &CoreMarkConfig,
    runner: &dyn ProcessRunner,
    format: &LogFormat,
    params: &CertifyParams,
) -> Result<StepOutput<SuccessOutput>> {
    if let Some(overrides) = params.overrides() {
        let patched = OptPatcher::new(config).apply(overrides)?;
        info!(files = patched.len(), "applied iteration overrides");
    }

    let command = BenchmarkCommand::certify_all(&config.make_program, &params.benchmark);
    info!(command = %command, workdir = %config.install_dir.display(), "running certification");

    let output = match runner.run(&command, &config.install_dir).await?.into_result() {
        Ok(output) => output,
        Err(error) => {
            warn!("certification run failed");
            return Ok(StepOutput::Error(error));
        }
    };

    let scores = parse_results_table(&output)?;
    let log = read_log(&config.log_file())?;
    let iterations = format.iteration_counts(&log)?;
    let results = CertifyResult::assemble(&scores, &iterations)?;

    info!(
        score = results.coremark_pro.multi_core,
        "certification complete"
    );

    Ok(StepOutput::Success(SuccessOutput {
        params: params.clone(),
        results,
    }))
}
