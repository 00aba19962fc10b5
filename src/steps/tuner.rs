//! `tune-iterations`: size each workload's iteration count to a target run time.

use super::certify_all;
use crate::config::CoreMarkConfig;
use crate::parser::{read_log, LogFormat};
use crate::runner::ProcessRunner;
use crate::schema::{BenchmarkParams, CertifyParams, Iterations, StepOutput, TuneParams};
use crate::{Error, Result};

use tracing::info;

/// Iterations needed to run for `target_secs` at `secs_per_iteration`.
pub fn target_iterations(target_secs: u64, secs_per_iteration: f64) -> Result<u64> {
    if !secs_per_iteration.is_finite() || secs_per_iteration <= 0.0 {
        return Err(Error::parse(format!(
            "per-iteration time must be a positive number of seconds, got {secs_per_iteration}"
        )));
    }
    Ok((target_secs as f64 / secs_per_iteration).ceil() as u64)
}

/// Tune iteration counts.
///
/// Runs one verification certification with default iterations to refresh
/// the run log, then computes `ceil(target_run_time / t)` for every workload
/// whose median time `t` appears in it. The result is a `certify-all` input
/// carrying the caller's run parameters.
///
/// A failed verification run is returned as the step's error output.
pub async fn tune_iterations(
    config: &CoreMarkConfig,
    runner: &dyn ProcessRunner,
    format: &LogFormat,
    params: &TuneParams,
) -> Result<StepOutput<CertifyParams>> {
    params.validate()?;

    let verification = CertifyParams {
        benchmark: BenchmarkParams::verification(),
        iterations: None,
    };
    if let StepOutput::Error(error) = certify_all(config, runner, format, &verification).await? {
        return Ok(StepOutput::Error(error));
    }

    let log = read_log(&config.log_file())?;
    let mut iterations = Iterations::default();
    for (workload, secs) in format.median_times(&log)? {
        let count = target_iterations(params.target_run_time, secs)?;
        info!(workload = %workload, secs_per_iteration = secs, iterations = count, "tuned");
        iterations.set(workload, count);
    }

    Ok(StepOutput::Success(CertifyParams {
        benchmark: params.benchmark.clone(),
        iterations: Some(iterations),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixtures::{CERTIFY_OUTPUT, RUN_LOG};
    use crate::runner::testing::ScriptedRunner;
    use crate::schema::Workload;
    use proptest::prelude::*;

    fn install() -> (tempfile::TempDir, CoreMarkConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreMarkConfig::with_install_dir(dir.path());
        (dir, config)
    }

    fn tune_params(target_run_time: u64) -> TuneParams {
        TuneParams {
            benchmark: BenchmarkParams {
                contexts: Some(1),
                workers: Some(1),
                verify: false,
            },
            target_run_time,
        }
    }

    #[tokio::test]
    async fn test_half_second_iteration_for_two_seconds() {
        let (_dir, config) = install();
        let runner = ScriptedRunner::completed(CERTIFY_OUTPUT)
            .writing_log(config.log_file(), "median single core 1 1 0 0.5 1 2.00\n");

        let output = tune_iterations(&config, &runner, &LogFormat::default(), &tune_params(2))
            .await
            .unwrap();

        let tuned = output.success().unwrap();
        let iterations = tuned.iterations.unwrap();
        assert_eq!(iterations.get(Workload::Core), Some(4));
        assert_eq!(iterations.entries().count(), 1);
        assert_eq!(tuned.benchmark.contexts, Some(1));
        assert_eq!(tuned.benchmark.workers, Some(1));
    }

    #[tokio::test]
    async fn test_every_logged_workload_is_tuned() {
        let (_dir, config) = install();
        let runner = ScriptedRunner::completed(CERTIFY_OUTPUT).writing_log(config.log_file(), RUN_LOG);

        let output = tune_iterations(&config, &runner, &LogFormat::default(), &tune_params(2))
            .await
            .unwrap();

        let iterations = output.success().unwrap().iterations.unwrap();
        let expected: Iterations = Workload::ALL.into_iter().zip(1..=9).collect();
        assert_eq!(iterations, expected);
    }

    #[tokio::test]
    async fn test_verification_run_uses_defaults() {
        let (_dir, config) = install();
        let runner = ScriptedRunner::completed(CERTIFY_OUTPUT).writing_log(config.log_file(), RUN_LOG);

        tune_iterations(&config, &runner, &LogFormat::default(), &tune_params(10))
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.args()[2], "XCMD=-v1");
    }

    #[tokio::test]
    async fn test_failed_verification_run() {
        let (_dir, config) = install();
        let runner = ScriptedRunner::failed("make", 2, "disk full");

        let output = tune_iterations(&config, &runner, &LogFormat::default(), &tune_params(2))
            .await
            .unwrap();
        assert_eq!(output.output_id(), "error");
    }

    #[tokio::test]
    async fn test_zero_target_rejected_before_run() {
        let (_dir, config) = install();
        let runner = ScriptedRunner::completed(CERTIFY_OUTPUT);

        let err = tune_iterations(&config, &runner, &LogFormat::default(), &tune_params(0))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "validation");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_time_in_log_is_fatal() {
        let (_dir, config) = install();
        let runner = ScriptedRunner::completed(CERTIFY_OUTPUT)
            .writing_log(config.log_file(), "median single core 1 1 0 0.000 1 0\n");

        let err = tune_iterations(&config, &runner, &LogFormat::default(), &tune_params(2))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_target_iterations() {
        assert_eq!(target_iterations(2, 0.5).unwrap(), 4);
        assert_eq!(target_iterations(10, 3.0).unwrap(), 4);
        assert_eq!(target_iterations(1, 5.0).unwrap(), 1);
        assert!(target_iterations(1, f64::NAN).is_err());
        assert!(target_iterations(1, -1.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_iterations_cover_target(target in 1u64..3600, secs in 0.001f64..100.0) {
            let count = target_iterations(target, secs).unwrap();
            let target = target as f64;
            prop_assert!(count >= 1);
            prop_assert!(count as f64 * secs >= target * (1.0 - 1e-9));
            prop_assert!((count - 1) as f64 * secs < target * (1.0 + 1e-9));
        }
    }
}
