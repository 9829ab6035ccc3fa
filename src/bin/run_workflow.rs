//! CLI entry point for executing a workflow document.
//!
//! Out of scope for the core (`spec.md` §1 "CLI/config loading"); kept
//! here as the minimal driver the library is meant to be embedded
//! behind, in the same spirit as the teacher's own `src/bin` binaries.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tableflow::{Config, GlobalSettings, Workflow};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "run_workflow", about = "Execute a tableflow workflow document")]
struct Args {
    /// Path to the workflow JSON document.
    workflow: PathBuf,

    /// Path to a config.toml to use instead of the default search path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root folder for resolving read/write file paths; overrides config.
    #[arg(long)]
    root_folder: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging);

    match run(&args, &config.workflow) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "workflow failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config, figment::Error> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path.to_string_lossy().as_ref())?,
        None => Config::load()?,
    };
    if let Some(root_folder) = &args.root_folder {
        config.workflow.root_folder = root_folder.clone();
    }
    Ok(config)
}

fn init_logging(logging: &tableflow::config::LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn run(args: &Args, settings: &GlobalSettings) -> tableflow::WorkflowResult<()> {
    let document = std::fs::read_to_string(&args.workflow)?;
    let workflow = Workflow::from_json(&document)?;
    tracing::info!(steps = workflow.workflow.len(), "planning workflow");
    workflow.execute(settings)?;
    tracing::info!("workflow complete");
    Ok(())
}
