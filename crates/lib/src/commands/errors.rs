//! Error types for command registration and dispatch.

use thiserror::Error;

/// Structured error types for the command registry.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommandError {
    /// No command with this name or alias was declared
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// A command or alias with this name is already declared
    #[error("Command already declared: {name}")]
    AlreadyDeclared { name: String },

    /// The command was declared but nothing handles it
    #[error("Command '{name}' has no handler")]
    NoHandler { name: String },

    /// Command names must be non-blank single words
    #[error("Invalid command name '{name}'")]
    InvalidName { name: String },
}

impl CommandError {
    /// Check if this error indicates a command was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::UnknownCommand { .. })
    }

    /// Check if this error indicates a name conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, CommandError::AlreadyDeclared { .. })
    }

    /// The command name this error refers to
    pub fn name(&self) -> &str {
        match self {
            CommandError::UnknownCommand { name }
            | CommandError::AlreadyDeclared { name }
            | CommandError::NoHandler { name }
            | CommandError::InvalidName { name } => name,
        }
    }
}

impl From<CommandError> for crate::Error {
    fn from(err: CommandError) -> Self {
        crate::Error::Command(err)
    }
}
