//! Iteration overrides in the workloads' `.opt` files.

use crate::config::CoreMarkConfig;
use crate::schema::Iterations;
use crate::{Error, Result};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Make variable holding the workload command-line flags.
pub const FLAGS_VARIABLE: &str = "WLD_CMD_FLAGS";

/// The rewritten form of `content`: every line mentioning
/// [`FLAGS_VARIABLE`] becomes `override WLD_CMD_FLAGS=-i<iterations>`, all
/// other lines are kept byte for byte.
pub fn rewrite_opt(content: &str, iterations: u64) -> String {
    content
        .split_inclusive('\n')
        .map(|line| {
            if line.contains(FLAGS_VARIABLE) {
                format!("override {FLAGS_VARIABLE}=-i{iterations}\n")
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Writes iteration overrides for the workloads of one installation.
pub struct OptPatcher<'a> {
    config: &'a CoreMarkConfig,
}

impl<'a> OptPatcher<'a> {
    /// Create a patcher for an installation.
    pub fn new(config: &'a CoreMarkConfig) -> Self {
        Self { config }
    }

    /// Patch every workload with a count in `iterations`.
    ///
    /// The rewritten content is appended to each file, so the last `override`
    /// wins when make reads it. Returns the patched files.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be read or written.
    pub fn apply(&self, iterations: &Iterations) -> Result<Vec<PathBuf>> {
        let mut patched = Vec::new();

        for (workload, count) in iterations.entries() {
            let path = self.config.opt_file(workload);
            let content = std::fs::read_to_string(&path).map_err(|e| Error::file_access(&path, e))?;

            let mut appended = String::new();
            if !content.is_empty() && !content.ends_with('\n') {
                appended.push('\n');
            }
            appended.push_str(&rewrite_opt(&content, count));

            OpenOptions::new()
                .append(true)
                .open(&path)
                .and_then(|mut file| file.write_all(appended.as_bytes()))
                .map_err(|e| Error::file_access(&path, e))?;

            tracing::debug!(workload = %workload, iterations = count, path = %path.display(), "patched iterations");
            patched.push(path);
        }

        Ok(patched)
    }
}
