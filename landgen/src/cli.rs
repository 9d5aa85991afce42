//! CLI argument parsing for landgen

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "landgen")]
#[command(
    author,
    version,
    about = "Generate an HTML landing page from a JSON command using a generative model",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command file to read (default: protocol/command.json)
    #[arg(short = 'i', long)]
    pub command: Option<PathBuf>,

    /// Output HTML file (default: index.html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model identifier to request
    #[arg(short, long)]
    pub model: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(command) = &self.command {
            config.paths.command = command.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output = output.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        config
    }
}
