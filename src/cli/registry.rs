//! Command table for the shell: canonical names, aliases, usage strings, and
//! the nearest-name lookup used when input matches nothing.

use std::collections::HashMap;

use strsim::levenshtein;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

/// Largest edit distance still offered as a suggestion.
const SUGGESTION_DISTANCE: usize = 3;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub aliases: &'static [&'static str],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            aliases: &[],
            handler,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// One row of the command overview.
    pub fn summary_line(&self) -> String {
        format!("  {:<20} {}", self.name, self.description)
    }

    /// Description, usage, and aliases for `help <command>`.
    pub fn help_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}: {}", self.name, self.description),
            format!("Usage: {}", self.usage),
        ];
        if !self.aliases.is_empty() {
            lines.push(format!("Aliases: {}", self.aliases.join(", ")));
        }
        lines
    }

    pub fn usage_error(&self) -> CommandError {
        CommandError::InvalidArguments(format!("Usage: {}", self.usage))
    }
}

/// Commands in registration order, addressable by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry` unless its name is taken. Aliases never shadow an
    /// existing name or alias.
    pub fn register(&mut self, entry: CommandEntry) {
        if self.lookup.contains_key(entry.name) {
            tracing::warn!(command = entry.name, "duplicate command ignored");
            return;
        }
        let index = self.entries.len();
        self.lookup.insert(entry.name, index);
        for &alias in entry.aliases {
            self.lookup.entry(alias).or_insert(index);
        }
        self.entries.push(entry);
    }

    /// Looks up a command by name or alias, ignoring case.
    pub fn resolve(&self, input: &str) -> Option<&CommandEntry> {
        let key = input.trim().to_ascii_lowercase();
        self.lookup
            .get(key.as_str())
            .and_then(|index| self.entries.get(*index))
    }

    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Usage error for `name`, falling back to the bare name.
    pub fn usage_error(&self, name: &str) -> CommandError {
        self.resolve(name)
            .map(CommandEntry::usage_error)
            .unwrap_or_else(|| CommandError::InvalidArguments(format!("Usage: {name}")))
    }

    /// Canonical name of the closest command or alias, if any is near enough.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let needle = input.trim().to_ascii_lowercase();
        self.lookup
            .iter()
            .map(|(key, index)| (levenshtein(key, &needle), *index))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, index)| (*distance, *index))
            .and_then(|(_, index)| self.entries.get(index))
            .map(|entry| entry.name)
    }
}
