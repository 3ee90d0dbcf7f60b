//! The command registry.

use std::{collections::BTreeMap, rc::Rc};

use tracing::debug;

use super::{Command, CommandError, CommandHandler, CommandSender, LABEL_PLACEHOLDER};
use crate::Result;

/// What happened when a command line was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler ran and accepted its arguments.
    Handled,
    /// The handler rejected its arguments; the sender was sent this hint.
    Usage(String),
    /// The sender lacks the command's permission; the handler did not run.
    Denied,
}

struct Registration {
    command: Command,
    handler: Option<Rc<dyn CommandHandler>>,
    usage: Option<String>,
}

/// Declared commands, their aliases and their handlers.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use paperkit::commands::{Command, CommandHandler, CommandMap, CommandSender, Dispatch};
///
/// struct Console(RefCell<Vec<String>>);
/// impl CommandSender for Console {
///     fn name(&self) -> &str { "CONSOLE" }
///     fn send_message(&self, message: &str) { self.0.borrow_mut().push(message.to_string()) }
/// }
///
/// struct Heal;
/// impl CommandHandler for Heal {
///     fn execute(&self, _: &dyn CommandSender, _: &Command, _: &str, args: &[&str]) -> bool {
///         args.len() == 1
///     }
/// }
///
/// let mut commands = CommandMap::new();
/// commands.declare(Command::new("heal").with_usage("/<command> <player>"))?;
/// commands.setup_command("heal", Rc::new(Heal))?;
///
/// let console = Console(RefCell::new(Vec::new()));
/// assert_eq!(commands.dispatch(&console, "heal Alex")?, Dispatch::Handled);
/// assert_eq!(
///     commands.dispatch(&console, "heal")?,
///     Dispatch::Usage("/heal <player>".to_string())
/// );
/// # Ok::<(), paperkit::Error>(())
/// ```
#[derive(Default)]
pub struct CommandMap {
    commands: BTreeMap<String, Registration>,
    aliases: BTreeMap<String, String>,
}

fn key(name: &str) -> String {
    name.trim().trim_start_matches('/').to_lowercase()
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `command` and its aliases.
    pub fn declare(&mut self, command: Command) -> Result<()> {
        let name = key(command.name());
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(CommandError::InvalidName {
                name: command.name().to_string(),
            }
            .into());
        }
        let labels: Vec<String> = std::iter::once(name.clone())
            .chain(command.aliases().iter().map(|a| key(a)))
            .collect();
        if let Some(taken) = labels
            .iter()
            .find(|label| self.commands.contains_key(*label) || self.aliases.contains_key(*label))
        {
            return Err(CommandError::AlreadyDeclared {
                name: taken.clone(),
            }
            .into());
        }

        for alias in labels.iter().skip(1) {
            self.aliases.insert(alias.clone(), name.clone());
        }
        debug!(command = %name, aliases = labels.len() - 1, "Declared command");
        self.commands.insert(
            name,
            Registration {
                command,
                handler: None,
                usage: None,
            },
        );
        Ok(())
    }

    fn resolve(&self, label: &str) -> Option<&Registration> {
        let label = key(label);
        let name = self.aliases.get(&label).unwrap_or(&label);
        self.commands.get(name)
    }

    fn resolve_mut(&mut self, label: &str) -> Result<&mut Registration> {
        let label = key(label);
        let name = self.aliases.get(&label).cloned().unwrap_or(label);
        self.commands
            .get_mut(&name)
            .ok_or_else(|| CommandError::UnknownCommand { name }.into())
    }

    /// Binds `handler` as the executor and tab completer of a declared command.
    ///
    /// The handler's usage override is reset to the declared usage.
    pub fn setup_command(&mut self, name: &str, handler: Rc<dyn CommandHandler>) -> Result<()> {
        let registration = self.resolve_mut(name)?;
        registration.handler = Some(handler);
        registration.usage = Some(registration.command.usage().to_string());
        Ok(())
    }

    /// Overrides the usage hint of a command. `None` or an empty string
    /// restores the declared usage.
    pub fn set_usage(&mut self, name: &str, usage: Option<&str>) -> Result<()> {
        self.resolve_mut(name)?.usage = usage.map(str::to_string);
        Ok(())
    }

    /// The usage hint for `name`: the override if set, else the declared usage.
    pub fn usage(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|registration| match registration.usage.as_deref() {
            Some(usage) if !usage.is_empty() => usage,
            _ => registration.command.usage(),
        })
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.resolve(name).map(|registration| &registration.command)
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|registration| registration.handler.is_some())
    }

    /// Declared command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    fn handler_for(&self, label: &str) -> Result<(&Registration, &Rc<dyn CommandHandler>)> {
        let registration = self.resolve(label).ok_or_else(|| CommandError::UnknownCommand {
            name: key(label),
        })?;
        let handler = registration
            .handler
            .as_ref()
            .ok_or_else(|| CommandError::NoHandler {
                name: registration.command.name().to_string(),
            })?;
        Ok((registration, handler))
    }

    /// Runs a command line such as `heal Alex` (a leading `/` is allowed).
    pub fn dispatch(&self, sender: &dyn CommandSender, line: &str) -> Result<Dispatch> {
        let mut words = line.split_whitespace();
        let label = words.next().unwrap_or_default().trim_start_matches('/');
        let args: Vec<&str> = words.collect();
        let (registration, handler) = self.handler_for(label)?;
        let command = &registration.command;

        if let Some(permission) = command.permission() {
            if !sender.has_permission(permission) {
                debug!(command = %command.name(), sender = %sender.name(), "Command denied");
                return Ok(Dispatch::Denied);
            }
        }

        if handler.execute(sender, command, label, &args) {
            return Ok(Dispatch::Handled);
        }

        let usage = self
            .usage(command.name())
            .unwrap_or_default()
            .replace(LABEL_PLACEHOLDER, label);
        if !usage.is_empty() {
            sender.send_message(&usage);
        }
        Ok(Dispatch::Usage(usage))
    }

    /// Completions for a partial command line. A trailing space starts a new,
    /// empty argument.
    pub fn tab_complete(&self, sender: &dyn CommandSender, line: &str) -> Result<Vec<String>> {
        let line = line.trim_start().trim_start_matches('/');
        let mut words = line.split(' ');
        let label = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let (registration, handler) = self.handler_for(label)?;
        let command = &registration.command;

        if let Some(permission) = command.permission() {
            if !sender.has_permission(permission) {
                return Ok(Vec::new());
            }
        }
        Ok(handler.tab_complete(sender, command, label, &args))
    }
}
