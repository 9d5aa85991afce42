//! landgen - one-shot landing page generator
//!
//! CLI entry point: load configuration, run the pipeline once, exit.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eyre::{Result, WrapErr};
use tracing::{debug, info};

use landgen::cli::Cli;
use landgen::config::Config;
use landgen::{ConsoleReporter, LocalStorage, Pipeline, ProcessEnv, RunOutcome};

/// Route tracing to `<data-local>/landgen/logs/landgen.log`, truncated per run
///
/// stdout and stderr carry only the reporter's lines. `RUST_LOG` directives
/// refine the filter; `--verbose` lowers the floor to debug.
fn setup_logging(verbose: bool) -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("landgen")
        .join("logs");
    fs::create_dir_all(&log_dir).wrap_err_with(|| format!("cannot create {}", log_dir.display()))?;

    let log_path = log_dir.join("landgen.log");
    let log_file = fs::File::create(&log_path).wrap_err_with(|| format!("cannot open {}", log_path.display()))?;

    let floor = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(floor.into()))
        .init();

    info!(verbose, version = env!("CARGO_PKG_VERSION"), "landgen run started");
    Ok(log_path)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_path = setup_logging(cli.verbose).wrap_err("logging unavailable")?;
    debug!(log = %log_path.display(), "log file ready");

    let config = cli.apply(Config::load(cli.config.as_ref())?);
    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        command = %config.paths.command.display(),
        output = %config.paths.output.display(),
        "configuration resolved"
    );

    let pipeline = Pipeline::new(config, ProcessEnv, LocalStorage, ConsoleReporter);
    match pipeline.run().await {
        Ok(RunOutcome::Completed(summary)) => {
            info!(
                output = %summary.output_path.display(),
                bytes = summary.bytes,
                input_tokens = summary.usage.input_tokens,
                output_tokens = summary.usage.output_tokens,
                "landgen: done"
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::CommandAbsent { .. }) => Ok(ExitCode::SUCCESS),
        // Already reported by the pipeline
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
