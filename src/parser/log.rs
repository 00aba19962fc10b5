//! Run log scraping.
//!
//! The suite's run log has one `median single` line per workload:
//!
//! ```text
//! median single core  1  1  0  0.500  4  8.00 ...
//! ```
//!
//! i.e. `<uid> <suite> <name> <ctx> <wrk> <fails> <t(s)> <iter> <iter/s> ...`.
//! All assumptions about that layout live in [`LogFormat`].

use crate::error::ErrorContext;
use crate::schema::{Workload, AGGREGATE_NAME};
use crate::{Error, Result};

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Markers and token positions of the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFormat {
    /// Substring identifying a per-workload median line
    pub marker: &'static str,
    /// Token index of the workload name
    pub name_token: usize,
    /// Token index of the per-iteration time in seconds
    pub time_token: usize,
    /// Token index of the observed iteration count
    pub iterations_token: usize,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self {
            marker: "median single",
            name_token: 2,
            time_token: 6,
            iterations_token: 7,
        }
    }
}

impl LogFormat {
    /// Median per-iteration time of every workload in the log.
    ///
    /// Names outside the workload catalog are skipped.
    pub fn median_times(&self, log: &str) -> Result<BTreeMap<Workload, f64>> {
        self.scan(log, false, self.time_token)
    }

    /// Iteration count of every workload in the log. Aggregate lines are skipped.
    pub fn iteration_counts(&self, log: &str) -> Result<BTreeMap<Workload, u64>> {
        self.scan(log, true, self.iterations_token)
    }

    fn scan<T>(&self, log: &str, skip_aggregate: bool, value_token: usize) -> Result<BTreeMap<Workload, T>>
    where
        T: FromStr,
    {
        let mut values = BTreeMap::new();

        for (index, line) in log.lines().enumerate() {
            if !line.contains(self.marker) {
                continue;
            }
            if skip_aggregate && line.contains(AGGREGATE_NAME) {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let parsed = token(&tokens, self.name_token, "workload name").and_then(|name| {
                let value = token(&tokens, value_token, "value")?;
                let value = value
                    .parse::<T>()
                    .map_err(|_| Error::parse(format!("malformed value '{value}' for {name}")))?;
                Ok((name, value))
            });
            let (name, value) = parsed.with_line(index + 1)?;

            match Workload::from_name(name) {
                Some(workload) => {
                    values.insert(workload, value);
                }
                None => tracing::debug!(name, line = index + 1, "skipping unknown log entry"),
            }
        }

        Ok(values)
    }
}

fn token<'a>(tokens: &[&'a str], index: usize, what: &str) -> Result<&'a str> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| Error::parse(format!("log line has no {what} at token {index}")))
}

/// Read the run log.
pub fn read_log(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::file_access(path, e))
}
