//! CoreMark-PRO plugin command line.
//!
//! Runs a plugin step against a local CoreMark-PRO installation and prints
//! the step output on stdout.

use coremark_pro_plugin::{
    all_steps, schema, Config, CoreMarkPro, ErrorOutput, Result, StepId, StepOutput, StepResponse,
    TuneParams,
};

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// CoreMark-PRO plugin
#[derive(Parser, Debug)]
#[command(name = "coremark-pro-plugin")]
#[command(about = "Tune and certify CoreMark-PRO benchmark runs")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "COREMARK_PRO_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// CoreMark-PRO installation directory
    #[arg(long, env = "COREMARK_PRO_DIR", global = true)]
    install_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable JSON log format
    #[arg(long, env = "JSON_LOGS", global = true)]
    json_logs: bool,

    /// Print step output as JSON instead of YAML
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available steps
    List,
    /// Run one step
    Run {
        /// Step to run
        #[arg(short, long)]
        step: StepId,
        /// Step input (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Tune iterations, then certify with the tuned counts
    Pipeline {
        /// tune-iterations input (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let job = match &args.command {
        Command::List => {
            println!("Available steps:\n");
            for step in all_steps() {
                println!("  {} ({})\n      {}\n", step.id(), step.name(), step.description());
            }
            return ExitCode::SUCCESS;
        }
        Command::Run { step, file } => Job::Step(*step, file),
        Command::Pipeline { file } => Job::Pipeline(file),
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = coremark_pro_plugin::telemetry::init_logging(&config.logging) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    info!("Starting CoreMark-PRO plugin v{}", coremark_pro_plugin::VERSION);

    let response = match run(job, config).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(category = e.category(), "{e}");
            StepResponse::Certified(StepOutput::Error(ErrorOutput::new(e.to_string())))
        }
    };

    if let Err(e) = print_output(&response, args.json) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Apply command line overrides
    if let Some(install_dir) = &args.install_dir {
        config.coremark.install_dir = install_dir.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json = true;
    }

    config.validate()?;
    Ok(config)
}

/// Work that needs a built plugin.
enum Job<'a> {
    Step(StepId, &'a Path),
    Pipeline(&'a Path),
}

async fn run(job: Job<'_>, config: Config) -> Result<StepResponse> {
    let plugin = CoreMarkPro::builder().with_config(config).build()?;

    match job {
        Job::Step(step, file) => {
            info!("Running step {} with input {:?}", step, file);
            plugin.run_step(step, file).await
        }
        Job::Pipeline(file) => {
            info!("Running tune-iterations and certify-all with input {:?}", file);
            let params: TuneParams = schema::load_input(file)?;
            Ok(StepResponse::Certified(plugin.tune_and_certify(&params).await?))
        }
    }
}

fn print_output(response: &impl Serialize, json: bool) -> Result<()> {
    let text = if json {
        serde_json::to_string_pretty(response)?
    } else {
        serde_yaml::to_string(response)?
    };
    println!("{}", text.trim_end());
    Ok(())
}
