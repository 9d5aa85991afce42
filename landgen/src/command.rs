//! Command source: the JSON record that describes the page to generate
//!
//! ```json
//! { "prompt": "organic coffee subscription" }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::Storage;

/// A generation command, read once per run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Command {
    /// Free-form description of the product or service and the page theme
    pub prompt: String,
}

/// Errors that can occur while loading a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read command file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("command file {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("command file {} is invalid: {message}", path.display())]
    Schema { path: PathBuf, message: String },
}

impl CommandError {
    /// Absence is the one recoverable condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::NotFound { .. })
    }
}

/// Loads the command record from a fixed location
pub struct CommandSource<'a, S: Storage> {
    storage: &'a S,
    path: &'a Path,
}

impl<'a, S: Storage> CommandSource<'a, S> {
    pub fn new(storage: &'a S, path: &'a Path) -> Self {
        Self { storage, path }
    }

    pub fn load(&self) -> Result<Command, CommandError> {
        debug!(path = ?self.path, "CommandSource::load: called");
        if !self.storage.exists(self.path) {
            debug!("CommandSource::load: not found");
            return Err(CommandError::NotFound {
                path: self.path.to_path_buf(),
            });
        }

        let content = self.storage.read_to_string(self.path).map_err(|source| CommandError::Read {
            path: self.path.to_path_buf(),
            source,
        })?;

        parse_command(&content).map_err(|e| match e {
            ParseFailure::Syntax(source) => CommandError::Parse {
                path: self.path.to_path_buf(),
                source,
            },
            ParseFailure::Schema(message) => CommandError::Schema {
                path: self.path.to_path_buf(),
                message,
            },
        })
    }
}

enum ParseFailure {
    Syntax(serde_json::Error),
    Schema(String),
}

fn parse_command(content: &str) -> Result<Command, ParseFailure> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(ParseFailure::Syntax)?;

    let Some(record) = value.as_object() else {
        return Err(ParseFailure::Schema("expected a JSON object".to_string()));
    };

    match record.get("prompt") {
        None | Some(serde_json::Value::Null) => {
            return Err(ParseFailure::Schema("missing required field `prompt`".to_string()));
        }
        Some(serde_json::Value::String(_)) => {}
        Some(_) => return Err(ParseFailure::Schema("field `prompt` must be a string".to_string())),
    }

    let command: Command = serde_json::from_value(value).map_err(|e| ParseFailure::Schema(e.to_string()))?;
    if command.prompt.trim().is_empty() {
        warn!("command prompt is empty; the model will only see the fixed template");
    }
    Ok(command)
}
