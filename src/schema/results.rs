//! Step output types.

use super::{CertifyParams, ResultKey, Workload};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores reported for one row of the suite's result tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Multi-core score (iter/s)
    pub multi_core: f64,
    /// Single-core score (iter/s)
    pub single_core: f64,
    /// Multi-core over single-core
    pub scaling: f64,
}

/// One workload's measured result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkItem {
    /// Workload result - Multi-Core (iter/s)
    #[serde(rename = "MultiCore")]
    pub multi_core: f64,
    /// Workload result - Single-Core (iter/s)
    #[serde(rename = "SingleCore")]
    pub single_core: f64,
    /// Workload result - Scaling
    #[serde(rename = "Scaling")]
    pub scaling: f64,
    /// Iterations observed in the run log
    #[serde(rename = "Iterations", default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
}

impl From<Scores> for BenchmarkItem {
    fn from(scores: Scores) -> Self {
        Self {
            multi_core: scores.multi_core,
            single_core: scores.single_core,
            scaling: scores.scaling,
            iterations: None,
        }
    }
}

/// Results of a certification run: every workload plus the aggregate mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertifyResult {
    /// Workload: CJPEG Rose7 Preset
    #[serde(rename = "cjpeg-rose7-preset")]
    pub cjpeg_rose7_preset: BenchmarkItem,
    /// Workload: Core
    pub core: BenchmarkItem,
    /// Workload: Linear Alg Mid 100x100 SP
    #[serde(rename = "linear_alg-mid-100x100-sp")]
    pub linear_alg_mid_100x100_sp: BenchmarkItem,
    /// Workload: Loops All Mid 10k SP
    #[serde(rename = "loops-all-mid-10k-sp")]
    pub loops_all_mid_10k_sp: BenchmarkItem,
    /// Workload: NNet Test
    pub nnet_test: BenchmarkItem,
    /// Workload: Parser 125k
    #[serde(rename = "parser-125k")]
    pub parser_125k: BenchmarkItem,
    /// Workload: Radix2 Big 64k
    #[serde(rename = "radix2-big-64k")]
    pub radix2_big_64k: BenchmarkItem,
    /// Workload: SHA Test
    #[serde(rename = "sha-test")]
    pub sha_test: BenchmarkItem,
    /// Workload: ZIP Test
    #[serde(rename = "zip-test")]
    pub zip_test: BenchmarkItem,
    /// Benchmark: CoreMark-PRO
    #[serde(rename = "CoreMark-PRO")]
    pub coremark_pro: BenchmarkItem,
}

impl CertifyResult {
    /// Assemble the result from parsed table rows and log iteration counts.
    ///
    /// Every one of the ten rows must be present. Iteration counts are only
    /// attached to workloads, never to the aggregate.
    pub fn assemble(
        scores: &BTreeMap<ResultKey, Scores>,
        iterations: &BTreeMap<Workload, u64>,
    ) -> Result<Self> {
        let item = |key: ResultKey| -> Result<BenchmarkItem> {
            let scores = scores
                .get(&key)
                .ok_or_else(|| Error::parse(format!("benchmark output has no result row for {key}")))?;
            let mut item = BenchmarkItem::from(*scores);
            if let ResultKey::Workload(workload) = key {
                item.iterations = iterations.get(&workload).copied();
            }
            Ok(item)
        };
        let workload = |w: Workload| item(ResultKey::Workload(w));

        Ok(Self {
            cjpeg_rose7_preset: workload(Workload::CjpegRose7Preset)?,
            core: workload(Workload::Core)?,
            linear_alg_mid_100x100_sp: workload(Workload::LinearAlgMid100x100Sp)?,
            loops_all_mid_10k_sp: workload(Workload::LoopsAllMid10kSp)?,
            nnet_test: workload(Workload::NnetTest)?,
            parser_125k: workload(Workload::Parser125k)?,
            radix2_big_64k: workload(Workload::Radix2Big64k)?,
            sha_test: workload(Workload::ShaTest)?,
            zip_test: workload(Workload::ZipTest)?,
            coremark_pro: item(ResultKey::Aggregate)?,
        })
    }

    /// Result item for a key.
    pub fn get(&self, key: ResultKey) -> &BenchmarkItem {
        match key {
            ResultKey::Workload(Workload::CjpegRose7Preset) => &self.cjpeg_rose7_preset,
            ResultKey::Workload(Workload::Core) => &self.core,
            ResultKey::Workload(Workload::LinearAlgMid100x100Sp) => &self.linear_alg_mid_100x100_sp,
            ResultKey::Workload(Workload::LoopsAllMid10kSp) => &self.loops_all_mid_10k_sp,
            ResultKey::Workload(Workload::NnetTest) => &self.nnet_test,
            ResultKey::Workload(Workload::Parser125k) => &self.parser_125k,
            ResultKey::Workload(Workload::Radix2Big64k) => &self.radix2_big_64k,
            ResultKey::Workload(Workload::ShaTest) => &self.sha_test,
            ResultKey::Workload(Workload::ZipTest) => &self.zip_test,
            ResultKey::Aggregate => &self.coremark_pro,
        }
    }
}

/// Successful `certify-all` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessOutput {
    /// The parameters applied to the CoreMark-PRO tests
    #[serde(rename = "coremark_pro_params")]
    pub params: CertifyParams,
    /// The results of the CoreMark-PRO run
    #[serde(rename = "coremark_pro_results")]
    pub results: CertifyResult,
}
