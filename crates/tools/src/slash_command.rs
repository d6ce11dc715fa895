//! SlashCommandRegistry (§4.15): a name/alias → handler map for `/command
//! args…` chat messages, plus the message parser those handlers are fed
//! from. Kept deliberately separate from [`crate::registry::BuiltinToolRegistry`]:
//! slash commands are a client-facing chat convenience, not a tool the model
//! calls.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// A parsed `/cmd args…` or `/(cmd args…)` invocation (§8 scenario 4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSlashCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Parse a raw chat message as a slash command, or `None` if it isn't one.
///
/// Accepts `/cmd args…` and the parenthesized `/(cmd args…)` form (useful
/// when an argument itself needs to start with a word that could be
/// mistaken for another command), is case-insensitive on the name, strips
/// leading whitespace, and rejects the bare `/`.
pub fn parse_slash_message(input: &str) -> Option<ParsedSlashCommand> {
    let trimmed = input.trim_start();
    let rest = trimmed.strip_prefix('/')?;
    if rest.is_empty() {
        return None;
    }
    let body = match rest.strip_prefix('(') {
        Some(inner) => inner.strip_suffix(')').unwrap_or(inner),
        None => rest,
    };
    let mut parts = body.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let args = parts.map(str::to_string).collect();
    Some(ParsedSlashCommand { name, args })
}

pub type SlashCommandHandler = Arc<dyn Fn(&[String]) -> String + Send + Sync>;

#[derive(Clone)]
pub struct SlashCommand {
    pub name: String,
    pub aliases: Vec<String>,
    /// Builtins survive [`SlashCommandRegistry::clear_user_commands`].
    pub builtin: bool,
    pub handler: SlashCommandHandler,
}

/// Name/alias → handler map. Every alias (and the primary name) is indexed
/// identically, so lookup never needs to distinguish the two.
#[derive(Default)]
pub struct SlashCommandRegistry {
    commands: Mutex<HashMap<String, SlashCommand>>,
}

impl SlashCommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, command: SlashCommand) {
        let mut commands = self.commands.lock();
        for key in std::iter::once(command.name.clone()).chain(command.aliases.iter().cloned()) {
            commands.insert(key.to_lowercase(), command.clone());
        }
    }

    pub fn resolve(&self, name: &str) -> Option<SlashCommand> {
        self.commands.lock().get(&name.to_lowercase()).cloned()
    }

    /// Drop every registered command except builtins (§4.15).
    pub fn clear_user_commands(&self) {
        self.commands.lock().retain(|_, command| command.builtin);
    }

    /// Parse `input` and, if it names a registered command, run its
    /// handler. Returns `None` both for non-slash input and for a slash
    /// message naming an unregistered command.
    pub fn dispatch(&self, input: &str) -> Option<String> {
        let parsed = parse_slash_message(input)?;
        let command = self.resolve(&parsed.name)?;
        Some((command.handler)(&parsed.args))
    }
}

#[cfg(test)]
#[path = "slash_command_tests.rs"]
mod tests;
