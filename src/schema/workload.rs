//! The closed catalog of CoreMark-PRO workloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the aggregate score row and log entries.
pub const AGGREGATE_NAME: &str = "CoreMark-PRO";

/// One of the nine CoreMark-PRO workloads.
///
/// The string form is the workload's directory name inside the suite
/// (`workloads/<name>/<name>.opt`) and the row label it prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Workload {
    /// JPEG compression
    #[serde(rename = "cjpeg-rose7-preset")]
    CjpegRose7Preset,
    /// CoreMark
    #[serde(rename = "core")]
    Core,
    /// Linear algebra, single precision
    #[serde(rename = "linear_alg-mid-100x100-sp")]
    LinearAlgMid100x100Sp,
    /// Livermore loops, single precision
    #[serde(rename = "loops-all-mid-10k-sp")]
    LoopsAllMid10kSp,
    /// Neural net
    #[serde(rename = "nnet_test")]
    NnetTest,
    /// XML parser
    #[serde(rename = "parser-125k")]
    Parser125k,
    /// Radix-2 FFT
    #[serde(rename = "radix2-big-64k")]
    Radix2Big64k,
    /// SHA-256
    #[serde(rename = "sha-test")]
    ShaTest,
    /// zlib
    #[serde(rename = "zip-test")]
    ZipTest,
}

impl Workload {
    /// All workloads, in the order the suite reports them.
    pub const ALL: [Workload; 9] = [
        Workload::CjpegRose7Preset,
        Workload::Core,
        Workload::LinearAlgMid100x100Sp,
        Workload::LoopsAllMid10kSp,
        Workload::NnetTest,
        Workload::Parser125k,
        Workload::Radix2Big64k,
        Workload::ShaTest,
        Workload::ZipTest,
    ];

    /// The suite's name for this workload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Workload::CjpegRose7Preset => "cjpeg-rose7-preset",
            Workload::Core => "core",
            Workload::LinearAlgMid100x100Sp => "linear_alg-mid-100x100-sp",
            Workload::LoopsAllMid10kSp => "loops-all-mid-10k-sp",
            Workload::NnetTest => "nnet_test",
            Workload::Parser125k => "parser-125k",
            Workload::Radix2Big64k => "radix2-big-64k",
            Workload::ShaTest => "sha-test",
            Workload::ZipTest => "zip-test",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Workload::CjpegRose7Preset => "CJPEG Rose7 Preset",
            Workload::Core => "Core",
            Workload::LinearAlgMid100x100Sp => "Linear Alg Mid 100x100 SP",
            Workload::LoopsAllMid10kSp => "Loops All Mid 10k SP",
            Workload::NnetTest => "NNet Test",
            Workload::Parser125k => "Parser 125k",
            Workload::Radix2Big64k => "Radix2 Big 64k",
            Workload::ShaTest => "SHA Test",
            Workload::ZipTest => "ZIP Test",
        }
    }

    /// Look up a workload by the suite's name. Exact, case-sensitive match.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == name)
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a row in the certification results: a workload or the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResultKey {
    /// A single workload
    Workload(Workload),
    /// The overall CoreMark-PRO mark
    Aggregate,
}

impl ResultKey {
    /// Look up a result key by its row label.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == AGGREGATE_NAME {
            return Some(ResultKey::Aggregate);
        }
        Workload::from_name(label).map(ResultKey::Workload)
    }

    /// Row label as printed by the suite.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKey::Workload(w) => w.as_str(),
            ResultKey::Aggregate => AGGREGATE_NAME,
        }
    }

    /// All ten keys.
    pub fn all() -> impl Iterator<Item = ResultKey> {
        Workload::ALL
            .into_iter()
            .map(ResultKey::Workload)
            .chain(std::iter::once(ResultKey::Aggregate))
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
