//! Error and control-flow types shared by the shell and command handlers.

use std::io;

use expense_config::ConfigError;
use expense_core::CoreError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command. The shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {usage}"))
    }
}

/// Failure that ends the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::Config(inner) => CliError::Config(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}
