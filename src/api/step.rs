//! Step registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A step the plugin exposes to the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    /// Tune per-workload iteration counts
    TuneIterations,
    /// Run and score every workload
    CertifyAll,
}

impl StepId {
    /// Stable step identifier.
    pub fn id(&self) -> &'static str {
        match self {
            StepId::TuneIterations => "tune-iterations",
            StepId::CertifyAll => "certify-all",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            StepId::TuneIterations => "Tune Iterations",
            StepId::CertifyAll => "Certify All",
        }
    }

    /// What the step does.
    pub fn description(&self) -> &'static str {
        match self {
            StepId::TuneIterations => {
                "Runs all nine workloads, checks their run times, calculates the number of \
                 iterations for each workload to roughly reach the target run time, and returns \
                 an object compatible with the certify-all step. Include every certify-all \
                 parameter in the input so that the generated object is complete."
            }
            StepId::CertifyAll => {
                "Runs all nine workloads, collects their scores, and processes them into the \
                 final CoreMark-PRO score."
            }
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StepId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        all_steps()
            .into_iter()
            .find(|step| step.id() == s)
            .ok_or_else(|| crate::Error::validation_field(format!("unknown step '{s}'"), "step"))
    }
}

/// Every registered step.
pub fn all_steps() -> Vec<StepId> {
    vec![StepId::TuneIterations, StepId::CertifyAll]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let steps = all_steps();
        let mut ids: Vec<&str> = steps.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), steps.len(), "All step IDs should be unique");
    }

    #[test]
    fn test_parse_round_trip() {
        for step in all_steps() {
            assert_eq!(step.id().parse::<StepId>().unwrap(), step);
            assert_eq!(serde_json::to_string(&step).unwrap(), format!("\"{}\"", step.id()));
        }
        assert!("certify".parse::<StepId>().is_err());
    }
}
