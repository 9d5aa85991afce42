//! landgen - one-shot landing page generator
//!
//! Reads a JSON command describing a product or service, wraps it in a fixed
//! instruction template, asks a generative model for a complete HTML landing
//! page and writes the answer to disk unchanged.
//!
//! # Flow
//!
//! ```text
//! GEMINI_API_KEY ──► credential
//! protocol/command.json ──► Command ──► ComposedPrompt ──► LlmClient ──► index.html
//! ```
//!
//! # Modules
//!
//! - [`command`] - command file loading and validation
//! - [`prompt`] - instruction template and prompt composition
//! - [`llm`] - generation client trait and Gemini implementation
//! - [`output`] - writing the artifact and previewing it
//! - [`pipeline`] - the orchestrating state machine
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod command;
pub mod config;
pub mod credential;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod storage;

// Re-export commonly used types
pub use command::{Command, CommandError, CommandSource};
pub use config::{Config, LlmConfig, PathsConfig};
pub use credential::{Credential, Env, ProcessEnv};
pub use llm::{GeminiClient, Generation, GenerationRequest, LlmClient, LlmError};
pub use pipeline::{FaultKind, Pipeline, PipelineError, RunOutcome, RunSummary, Stage};
pub use prompt::{ComposedPrompt, LANDING_PAGE_TEMPLATE, PromptTemplate, compose};
pub use report::{ConsoleReporter, Reporter, RunEvent};
pub use storage::{LocalStorage, Storage};
