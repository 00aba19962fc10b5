//! Step input types.

use super::Workload;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default target run time per workload, in seconds.
pub const DEFAULT_TARGET_RUN_TIME: u64 = 10;

/// Run-shape parameters forwarded to the benchmark tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkParams {
    /// Number of contexts per benchmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contexts: Option<u32>,
    /// Number of workers per benchmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u32>,
    /// Enable benchmark validation runs
    #[serde(default)]
    pub verify: bool,
}

impl BenchmarkParams {
    /// Parameters used for the tuning run: verification on, everything else default.
    pub fn verification() -> Self {
        Self {
            verify: true,
            ..Self::default()
        }
    }
}

/// Input of the `tune-iterations` step.
///
/// Include every `certify-all` parameter here as well: the step echoes them
/// so that its output can be handed straight to `certify-all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneParams {
    /// Parameters echoed into the produced certification request
    #[serde(flatten)]
    pub benchmark: BenchmarkParams,
    /// Target run time in seconds for each benchmark
    #[serde(default = "default_target_run_time")]
    pub target_run_time: u64,
}

fn default_target_run_time() -> u64 {
    DEFAULT_TARGET_RUN_TIME
}

impl Default for TuneParams {
    fn default() -> Self {
        Self {
            benchmark: BenchmarkParams::default(),
            target_run_time: DEFAULT_TARGET_RUN_TIME,
        }
    }
}

impl TuneParams {
    /// Reject inputs that cannot produce iteration counts.
    pub fn validate(&self) -> Result<()> {
        if self.target_run_time == 0 {
            return Err(Error::validation_field(
                "target run time must be at least one second",
                "target_run_time",
            ));
        }
        Ok(())
    }
}

/// Per-workload iteration overrides.
///
/// One optional count per workload; the key set is fixed by the struct, and
/// unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Iterations {
    /// Iterations for cjpeg-rose7-preset
    #[serde(rename = "cjpeg-rose7-preset", default, skip_serializing_if = "Option::is_none")]
    pub cjpeg_rose7_preset: Option<u64>,
    /// Iterations for core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<u64>,
    /// Iterations for linear_alg-mid-100x100-sp
    #[serde(rename = "linear_alg-mid-100x100-sp", default, skip_serializing_if = "Option::is_none")]
    pub linear_alg_mid_100x100_sp: Option<u64>,
    /// Iterations for loops-all-mid-10k-sp
    #[serde(rename = "loops-all-mid-10k-sp", default, skip_serializing_if = "Option::is_none")]
    pub loops_all_mid_10k_sp: Option<u64>,
    /// Iterations for nnet_test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nnet_test: Option<u64>,
    /// Iterations for parser-125k
    #[serde(rename = "parser-125k", default, skip_serializing_if = "Option::is_none")]
    pub parser_125k: Option<u64>,
    /// Iterations for radix2-big-64k
    #[serde(rename = "radix2-big-64k", default, skip_serializing_if = "Option::is_none")]
    pub radix2_big_64k: Option<u64>,
    /// Iterations for sha-test
    #[serde(rename = "sha-test", default, skip_serializing_if = "Option::is_none")]
    pub sha_test: Option<u64>,
    /// Iterations for zip-test
    #[serde(rename = "zip-test", default, skip_serializing_if = "Option::is_none")]
    pub zip_test: Option<u64>,
}

impl Iterations {
    fn slot(&self, workload: Workload) -> &Option<u64> {
        match workload {
            Workload::CjpegRose7Preset => &self.cjpeg_rose7_preset,
            Workload::Core => &self.core,
            Workload::LinearAlgMid100x100Sp => &self.linear_alg_mid_100x100_sp,
            Workload::LoopsAllMid10kSp => &self.loops_all_mid_10k_sp,
            Workload::NnetTest => &self.nnet_test,
            Workload::Parser125k => &self.parser_125k,
            Workload::Radix2Big64k => &self.radix2_big_64k,
            Workload::ShaTest => &self.sha_test,
            Workload::ZipTest => &self.zip_test,
        }
    }

    fn slot_mut(&mut self, workload: Workload) -> &mut Option<u64> {
        match workload {
            Workload::CjpegRose7Preset => &mut self.cjpeg_rose7_preset,
            Workload::Core => &mut self.core,
            Workload::LinearAlgMid100x100Sp => &mut self.linear_alg_mid_100x100_sp,
            Workload::LoopsAllMid10kSp => &mut self.loops_all_mid_10k_sp,
            Workload::NnetTest => &mut self.nnet_test,
            Workload::Parser125k => &mut self.parser_125k,
            Workload::Radix2Big64k => &mut self.radix2_big_64k,
            Workload::ShaTest => &mut self.sha_test,
            Workload::ZipTest => &mut self.zip_test,
        }
    }

    /// Iteration count for a workload, if set.
    pub fn get(&self, workload: Workload) -> Option<u64> {
        *self.slot(workload)
    }

    /// Set the iteration count for a workload.
    pub fn set(&mut self, workload: Workload, iterations: u64) {
        *self.slot_mut(workload) = Some(iterations);
    }

    /// Populated entries, in suite order.
    pub fn entries(&self) -> impl Iterator<Item = (Workload, u64)> + '_ {
        Workload::ALL
            .into_iter()
            .filter_map(|w| self.get(w).map(|n| (w, n)))
    }

    /// True when no workload has a count.
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

impl FromIterator<(Workload, u64)> for Iterations {
    fn from_iter<I: IntoIterator<Item = (Workload, u64)>>(iter: I) -> Self {
        let mut iterations = Iterations::default();
        for (workload, count) in iter {
            iterations.set(workload, count);
        }
        iterations
    }
}

/// Input of the `certify-all` step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertifyParams {
    /// Run-shape parameters
    #[serde(flatten)]
    pub benchmark: BenchmarkParams,
    /// Number of iterations for each benchmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<Iterations>,
}

impl CertifyParams {
    /// Overrides to write before the run, if any were requested.
    pub fn overrides(&self) -> Option<&Iterations> {
        self.iterations.as_ref().filter(|i| !i.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tune_params_defaults() {
        let params: TuneParams = serde_yaml::from_str("contexts: 1\nworkers: 1\n").unwrap();
        assert_eq!(params.target_run_time, DEFAULT_TARGET_RUN_TIME);
        assert_eq!(params.benchmark.contexts, Some(1));
        assert!(!params.benchmark.verify);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_target_run_time_rejected() {
        let params = TuneParams {
            target_run_time: 0,
            ..TuneParams::default()
        };
        match params.validate().unwrap_err() {
            Error::Validation { field, .. } => assert_eq!(field.as_deref(), Some("target_run_time")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_iterations_use_workload_names() {
        let iterations: Iterations = [(Workload::CjpegRose7Preset, 3), (Workload::Core, 4)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&iterations).unwrap();
        assert_eq!(json, serde_json::json!({"cjpeg-rose7-preset": 3, "core": 4}));

        let back: Iterations = serde_json::from_value(json).unwrap();
        assert_eq!(back, iterations);
    }

    #[test]
    fn test_iterations_reject_unknown_keys() {
        let result: std::result::Result<Iterations, _> =
            serde_json::from_str(r#"{"core": 1, "dhrystone": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_entries_and_emptiness() {
        let mut iterations = Iterations::default();
        assert!(iterations.is_empty());

        iterations.set(Workload::ZipTest, 9);
        iterations.set(Workload::Core, 2);
        let entries: Vec<_> = iterations.entries().collect();
        assert_eq!(entries, vec![(Workload::Core, 2), (Workload::ZipTest, 9)]);
    }

    #[test]
    fn test_certify_params_overrides() {
        let mut params = CertifyParams::default();
        assert!(params.overrides().is_none());

        params.iterations = Some(Iterations::default());
        assert!(params.overrides().is_none());

        params.iterations = Some([(Workload::ShaTest, 8)].into_iter().collect());
        assert_eq!(params.overrides().and_then(|i| i.get(Workload::ShaTest)), Some(8));
    }

    #[test]
    fn test_certify_params_flattened_layout() {
        let yaml = "verify: true\ncontexts: 1\nworkers: 2\niterations:\n  sha-test: 8\n";
        let params: CertifyParams = serde_yaml::from_str(yaml).unwrap();
        assert!(params.benchmark.verify);
        assert_eq!(params.benchmark.workers, Some(2));
        assert_eq!(params.iterations.unwrap().sha_test, Some(8));
    }
}
