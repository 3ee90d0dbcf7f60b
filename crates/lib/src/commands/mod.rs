//! Command handlers and the registry that dispatches to them.
//!
//! A plugin declares its commands with their usage strings up front, then
//! binds a [`CommandHandler`] to each one with
//! [`CommandMap::setup_command`]. A handler executes the command and offers
//! tab completions. When it reports misuse by returning `false`, the sender
//! is shown the usage hint.

pub mod errors;
pub mod map;

pub use errors::CommandError;
pub use map::{CommandMap, Dispatch};

/// Placeholder in usage strings replaced by the label the command was invoked with.
pub const LABEL_PLACEHOLDER: &str = "<command>";

/// Whoever ran a command: a player, the console, or a test double.
pub trait CommandSender {
    fn name(&self) -> &str;

    fn send_message(&self, message: &str);

    fn has_permission(&self, _permission: &str) -> bool {
        true
    }
}

/// A declared command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    usage: String,
    description: String,
    aliases: Vec<String>,
    permission: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            description: String::new(),
            aliases: Vec::new(),
            permission: None,
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }
}

/// Executes one command and completes its arguments.
pub trait CommandHandler {
    /// Runs the command. Returning `false` means the command was misused,
    /// and the sender is shown the usage hint.
    fn execute(&self, sender: &dyn CommandSender, command: &Command, label: &str, args: &[&str]) -> bool;

    /// Suggestions for the last argument in `args`.
    fn tab_complete(
        &self,
        _sender: &dyn CommandSender,
        _command: &Command,
        _label: &str,
        _args: &[&str],
    ) -> Vec<String> {
        Vec::new()
    }
}
