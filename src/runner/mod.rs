//! Subprocess execution.
//!
//! Runs one command to completion and captures stdout and stderr as a single
//! blob, in the order the child wrote them.

use crate::command::BenchmarkCommand;
use crate::schema::ErrorOutput;
use crate::{Error, Result};

use async_trait::async_trait;
use std::io::Read;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Outcome of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit status 0; the combined output
    Completed(String),
    /// Non-zero exit
    Failed {
        /// Program that failed
        program: String,
        /// Exit code, or -1 when terminated by a signal
        exit_code: i32,
        /// Combined output, for diagnosis
        output: String,
    },
}

impl RunOutcome {
    /// The captured output, or the error output reported to the workflow.
    pub fn into_result(self) -> std::result::Result<String, ErrorOutput> {
        match self {
            RunOutcome::Completed(output) => Ok(output),
            RunOutcome::Failed {
                program,
                exit_code,
                output,
            } => Err(ErrorOutput::new(format!(
                "{program} failed with return code {exit_code}:\n{output}"
            ))),
        }
    }
}

/// Executes benchmark commands.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` in `workdir` and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error only when the process cannot be started or its
    /// output cannot be collected. A non-zero exit is a [`RunOutcome::Failed`].
    async fn run(&self, command: &BenchmarkCommand, workdir: &Path) -> Result<RunOutcome>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &BenchmarkCommand, workdir: &Path) -> Result<RunOutcome> {
        // Both streams share one pipe so the capture keeps their interleaving.
        let (mut reader, writer) = std::io::pipe()?;

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);

        tracing::debug!(command = %command, workdir = %workdir.display(), "spawning");
        let mut child = cmd.spawn().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to start {}: {e}", command.program()),
            ))
        })?;
        // Release our copies of the write end, or the read below never sees EOF.
        drop(cmd);

        let collector = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });

        let status = child.wait().await?;
        let bytes = collector
            .await
            .map_err(|e| Error::internal(format!("output collector failed: {e}")))??;
        let output = String::from_utf8_lossy(&bytes).into_owned();

        if status.success() {
            tracing::debug!(bytes = bytes.len(), "command completed");
            return Ok(RunOutcome::Completed(output));
        }

        let exit_code = status.code().unwrap_or(-1);
        tracing::warn!(command = %command, exit_code, "command failed");
        Ok(RunOutcome::Failed {
            program: command.program().to_string(),
            exit_code,
            output,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted runner for exercising the steps without the suite.

    use super::*;
    use parking_lot::Mutex;
    use std::path::PathBuf;

    /// Replays a fixed outcome and optionally writes a run log, like the suite does.
    pub struct ScriptedRunner {
        outcome: RunOutcome,
        log: Option<(PathBuf, String)>,
        calls: Mutex<Vec<(BenchmarkCommand, PathBuf)>>,
        snapshots: Mutex<Vec<(PathBuf, String)>>,
        watched: Vec<PathBuf>,
    }

    impl ScriptedRunner {
        pub fn completed(output: impl Into<String>) -> Self {
            Self::with_outcome(RunOutcome::Completed(output.into()))
        }

        pub fn failed(program: &str, exit_code: i32, output: &str) -> Self {
            Self::with_outcome(RunOutcome::Failed {
                program: program.to_string(),
                exit_code,
                output: output.to_string(),
            })
        }

        fn with_outcome(outcome: RunOutcome) -> Self {
            Self {
                outcome,
                log: None,
                calls: Mutex::new(Vec::new()),
                snapshots: Mutex::new(Vec::new()),
                watched: Vec::new(),
            }
        }

        /// Write `content` to `path` on every run.
        pub fn writing_log(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
            self.log = Some((path.into(), content.into()));
            self
        }

        /// Record the content of `path` at the moment each run starts.
        pub fn watching(mut self, path: impl Into<PathBuf>) -> Self {
            self.watched.push(path.into());
            self
        }

        pub fn calls(&self) -> Vec<(BenchmarkCommand, PathBuf)> {
            self.calls.lock().clone()
        }

        pub fn snapshots(&self) -> Vec<(PathBuf, String)> {
            self.snapshots.lock().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for ScriptedRunner {
        async fn run(&self, command: &BenchmarkCommand, workdir: &Path) -> Result<RunOutcome> {
            self.calls.lock().push((command.clone(), workdir.to_path_buf()));
            for path in &self.watched {
                let content = std::fs::read_to_string(path).unwrap_or_default();
                self.snapshots.lock().push((path.clone(), content));
            }
            if let Some((path, content)) = &self.log {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, content)?;
            }
            Ok(self.outcome.clone())
        }
    }
}
