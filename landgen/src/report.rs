//! User-facing run reporting
//!
//! Tracing goes to the log file; these events are the console surface.

use std::fmt;
use std::path::Path;

use colored::Colorize;

use crate::pipeline::{PipelineError, Stage};

/// Something the user should see about the current run
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// About to call the model
    Generating { model: &'a str },
    /// Artifact written
    Saved { path: &'a Path },
    /// Bounded prefix of the artifact
    Preview { text: &'a str },
    /// No command file; nothing to do
    CommandAbsent { path: &'a Path },
    /// A stage failed and the run stopped
    Failed { stage: Stage, error: &'a PipelineError },
}

impl RunEvent<'_> {
    /// Diagnostics go to stderr
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, RunEvent::CommandAbsent { .. } | RunEvent::Failed { .. })
    }
}

impl fmt::Display for RunEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Generating { model } => write!(f, "Generating landing page with model {}...", model),
            RunEvent::Saved { path } => write!(f, "Landing page generated and saved to {}", path.display()),
            RunEvent::Preview { text } => write!(
                f,
                "\n--- Generated content ---\n{}\n-------------------------",
                text
            ),
            RunEvent::CommandAbsent { path } => write!(f, "Error: command file not found at {}", path.display()),
            RunEvent::Failed { stage, error } => write!(f, "Error while {}: {}", stage.activity(), error),
        }
    }
}

pub trait Reporter {
    fn report(&self, event: &RunEvent<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, event: &RunEvent<'_>) {
        (**self).report(event)
    }
}

/// Prints events to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &RunEvent<'_>) {
        match event {
            RunEvent::Generating { .. } => println!("{}", event.to_string().cyan()),
            RunEvent::Saved { .. } => println!("{} {}", "✓".green(), event),
            RunEvent::Preview { .. } => println!("{}", event.to_string().dimmed()),
            RunEvent::CommandAbsent { .. } => eprintln!("{} {}", "✗".yellow(), event),
            RunEvent::Failed { .. } => eprintln!("{} {}", "✗".red(), event.to_string().red()),
        }
    }
}
