//! Pipeline orchestrator
//!
//! One run walks a fixed sequence of stages:
//!
//! ```text
//! Init -> CredentialResolved -> CommandLoaded -> PromptComposed
//!      -> ArtifactGenerated -> Persisted -> Done
//! ```
//!
//! Each step returns its own `Result`. The first error moves the run to
//! `Failed`: it is reported once, with the stage it happened in, and no later
//! stage runs. The output file is only written after generation succeeded.
//! A missing command file is not an error: the run halts early and reports it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::command::{Command, CommandError, CommandSource};
use crate::config::{Config, LlmConfig};
use crate::credential::{Credential, Env};
use crate::llm::{self, Generation, GenerationRequest, LlmClient, LlmError, TokenUsage};
use crate::output::{self, WriteError};
use crate::prompt::{self, ComposedPrompt, LANDING_PAGE_TEMPLATE};
use crate::report::{Reporter, RunEvent};
use crate::storage::Storage;

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    CredentialResolved,
    CommandLoaded,
    PromptComposed,
    ArtifactGenerated,
    Persisted,
    Done,
    Failed,
}

impl Stage {
    /// What the pipeline is doing while entering this stage
    pub fn activity(&self) -> &'static str {
        match self {
            Stage::Init => "starting",
            Stage::CredentialResolved => "resolving the API credential",
            Stage::CommandLoaded => "loading the command",
            Stage::PromptComposed => "composing the prompt",
            Stage::ArtifactGenerated => "generating the landing page",
            Stage::Persisted => "saving the landing page",
            Stage::Done => "finishing",
            Stage::Failed => "failing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::CredentialResolved => "credential-resolved",
            Stage::CommandLoaded => "command-loaded",
            Stage::PromptComposed => "prompt-composed",
            Stage::ArtifactGenerated => "artifact-generated",
            Stage::Persisted => "persisted",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Faults that end a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("API key not found. Set the {key} environment variable.")]
    MissingCredential { key: String },

    #[error("invalid model client configuration: {0}")]
    Client(#[source] LlmError),

    #[error(transparent)]
    CommandMalformed(CommandError),

    #[error("model call failed: {0}")]
    Generation(#[source] LlmError),

    #[error(transparent)]
    Persistence(#[from] WriteError),
}

/// Broad fault classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Configuration,
    CommandMalformed,
    Generation,
    Persistence,
}

impl PipelineError {
    pub fn kind(&self) -> FaultKind {
        match self {
            PipelineError::MissingCredential { .. } | PipelineError::Client(_) => FaultKind::Configuration,
            PipelineError::CommandMalformed(_) => FaultKind::CommandMalformed,
            PipelineError::Generation(_) => FaultKind::Generation,
            PipelineError::Persistence(_) => FaultKind::Persistence,
        }
    }

    /// Stage the run was trying to enter when it failed
    pub fn stage(&self) -> Stage {
        match self.kind() {
            FaultKind::Configuration => Stage::CredentialResolved,
            FaultKind::CommandMalformed => Stage::CommandLoaded,
            FaultKind::Generation => Stage::ArtifactGenerated,
            FaultKind::Persistence => Stage::Persisted,
        }
    }
}

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The artifact was generated and written
    Completed(RunSummary),
    /// No command file; nothing was generated or written
    CommandAbsent { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub bytes: usize,
    pub model: String,
    pub usage: TokenUsage,
}

/// Builds the generation client once the credential is known
pub type ClientFactory = Box<dyn Fn(&LlmConfig, Credential) -> Result<Arc<dyn LlmClient>, LlmError> + Send + Sync>;

/// Run state, carrying what the next stage needs
enum State {
    Init,
    CredentialResolved {
        client: Arc<dyn LlmClient>,
    },
    CommandLoaded {
        client: Arc<dyn LlmClient>,
        command: Command,
    },
    PromptComposed {
        client: Arc<dyn LlmClient>,
        prompt: ComposedPrompt,
    },
    ArtifactGenerated {
        model: String,
        generation: Generation,
    },
    Persisted {
        model: String,
        generation: Generation,
    },
}

impl State {
    fn stage(&self) -> Stage {
        match self {
            State::Init => Stage::Init,
            State::CredentialResolved { .. } => Stage::CredentialResolved,
            State::CommandLoaded { .. } => Stage::CommandLoaded,
            State::PromptComposed { .. } => Stage::PromptComposed,
            State::ArtifactGenerated { .. } => Stage::ArtifactGenerated,
            State::Persisted { .. } => Stage::Persisted,
        }
    }
}

enum Step {
    Next(State),
    Halt(RunOutcome),
}

/// Sequences credential lookup, command loading, prompt composition,
/// generation and persistence for a single run
pub struct Pipeline<E, S, R> {
    config: Config,
    env: E,
    storage: S,
    reporter: R,
    connect: ClientFactory,
}

impl<E: Env, S: Storage, R: Reporter> Pipeline<E, S, R> {
    pub fn new(config: Config, env: E, storage: S, reporter: R) -> Self {
        Self {
            config,
            env,
            storage,
            reporter,
            connect: Box::new(llm::create_client),
        }
    }

    /// Replace how the generation client is built
    pub fn with_client_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&LlmConfig, Credential) -> Result<Arc<dyn LlmClient>, LlmError> + Send + Sync + 'static,
    {
        self.connect = Box::new(factory);
        self
    }

    /// Execute one run to completion or failure
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        info!(
            command = %self.config.paths.command.display(),
            output = %self.config.paths.output.display(),
            "run: starting"
        );
        let mut state = State::Init;
        loop {
            let from = state.stage();
            match self.advance(state).await {
                Ok(Step::Next(next)) => {
                    info!(%from, to = %next.stage(), "run: stage complete");
                    state = next;
                }
                Ok(Step::Halt(outcome)) => {
                    info!(%from, to = %Stage::Done, ?outcome, "run: finished");
                    return Ok(outcome);
                }
                Err(e) => {
                    let stage = e.stage();
                    error!(%from, failed = %stage, to = %Stage::Failed, error = %e, "run: failed");
                    self.reporter.report(&RunEvent::Failed { stage, error: &e });
                    return Err(e);
                }
            }
        }
    }

    async fn advance(&self, state: State) -> Result<Step, PipelineError> {
        match state {
            State::Init => {
                let client = self.resolve_client()?;
                Ok(Step::Next(State::CredentialResolved { client }))
            }
            State::CredentialResolved { client } => {
                let path = &self.config.paths.command;
                match CommandSource::new(&self.storage, path).load() {
                    Ok(command) => Ok(Step::Next(State::CommandLoaded { client, command })),
                    Err(e) if e.is_not_found() => {
                        warn!(path = %path.display(), "advance: command file not found, nothing to do");
                        self.reporter.report(&RunEvent::CommandAbsent { path });
                        Ok(Step::Halt(RunOutcome::CommandAbsent { path: path.clone() }))
                    }
                    Err(e) => Err(PipelineError::CommandMalformed(e)),
                }
            }
            State::CommandLoaded { client, command } => {
                let prompt = prompt::compose(&LANDING_PAGE_TEMPLATE, &command);
                debug!(prompt_len = prompt.as_str().len(), "advance: prompt composed");
                Ok(Step::Next(State::PromptComposed { client, prompt }))
            }
            State::PromptComposed { client, prompt } => {
                let model = client.model().to_string();
                self.reporter.report(&RunEvent::Generating { model: &model });
                let request = GenerationRequest::new(prompt.into_inner(), self.config.llm.max_tokens);
                let generation = client.generate(request).await.map_err(PipelineError::Generation)?;
                debug!(bytes = generation.text.len(), usage = ?generation.usage, "advance: artifact generated");
                Ok(Step::Next(State::ArtifactGenerated { model, generation }))
            }
            State::ArtifactGenerated { model, generation } => {
                let path = &self.config.paths.output;
                output::save(&self.storage, path, &generation.text)?;
                self.reporter.report(&RunEvent::Saved { path });
                Ok(Step::Next(State::Persisted { model, generation }))
            }
            State::Persisted { model, generation } => {
                let preview = output::preview(&generation.text, self.config.preview_chars);
                self.reporter.report(&RunEvent::Preview { text: &preview });
                Ok(Step::Halt(RunOutcome::Completed(RunSummary {
                    output_path: self.config.paths.output.clone(),
                    bytes: generation.text.len(),
                    model,
                    usage: generation.usage,
                })))
            }
        }
    }

    fn resolve_client(&self) -> Result<Arc<dyn LlmClient>, PipelineError> {
        let key = &self.config.llm.api_key_env;
        let credential = Credential::resolve(&self.env, key)
            .ok_or_else(|| PipelineError::MissingCredential { key: key.clone() })?;
        (self.connect)(&self.config.llm, credential).map_err(PipelineError::Client)
    }
}
