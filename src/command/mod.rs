//! Builds the `make certify-all` invocation.

use crate::schema::BenchmarkParams;
use std::fmt;

/// Make target that runs and scores every workload.
pub const CERTIFY_TARGET: &str = "certify-all";

/// A program plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkCommand {
    program: String,
    args: Vec<String>,
}

impl BenchmarkCommand {
    /// Create a command from a program and arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `<make> -s certify-all XCMD=<flags>` for the given parameters.
    ///
    /// The suite hands everything in `XCMD` down to each workload binary.
    pub fn certify_all(make_program: &str, params: &BenchmarkParams) -> Self {
        let args = vec![
            "-s".to_string(),
            CERTIFY_TARGET.to_string(),
            format!("XCMD={}", xcmd_flags(params)),
        ];
        Self::new(make_program, args)
    }

    /// Program to execute.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Workload flags: `-v0|-v1`, then `-c<N>` and `-w<N>` when set.
pub fn xcmd_flags(params: &BenchmarkParams) -> String {
    let mut flags = vec![if params.verify { "-v1" } else { "-v0" }.to_string()];
    if let Some(contexts) = params.contexts.filter(|c| *c > 0) {
        flags.push(format!("-c{contexts}"));
    }
    if let Some(workers) = params.workers.filter(|w| *w > 0) {
        flags.push(format!("-w{workers}"));
    }
    flags.join(" ")
}

impl fmt::Display for BenchmarkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            match arg.split_once('=') {
                Some((name, value)) if value.contains(' ') => write!(f, " {name}='{value}'")?,
                _ => write!(f, " {arg}")?,
            }
        }
        Ok(())
    }
}
