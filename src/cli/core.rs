//! Shell context, argument helpers, and error reporting for the CLI.

use std::{collections::HashMap, env, io};

use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::store::BudgetStore,
    core::time::{Clock, FixedClock, SystemClock},
    currency::format_currency,
    domain::{Category, EntryType, SavingsGoal, Transaction},
    errors::FinanceError,
};

use super::commands;
use super::output;
use super::registry::CommandRegistry;

/// Environment variable switching the shell to line-by-line stdin mode.
pub const SCRIPT_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";
/// Environment variable pinning the shell's notion of today (`YYYY-MM-DD`).
pub const TODAY_ENV: &str = "BUDGET_TRACKER_TODAY";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid {TODAY_ENV} value `{0}`, expected YYYY-MM-DD")]
    InvalidToday(String),
}

pub struct ShellContext {
    pub(crate) registry: CommandRegistry,
    pub(crate) store: BudgetStore,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Loads configuration and seeds the store with the demo ledger.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let clock: Box<dyn Clock> = match env::var(TODAY_ENV) {
            Ok(raw) => {
                let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                    .map_err(|_| CliError::InvalidToday(raw.clone()))?;
                Box::new(FixedClock(date))
            }
            Err(_) => Box::new(SystemClock),
        };
        Ok(Self::with_store(
            mode,
            config_manager,
            config,
            BudgetStore::sample_with_clock(clock),
        ))
    }

    pub fn with_store(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        store: BudgetStore,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_color_enabled(mode == CliMode::Interactive);
        tracing::debug!(?mode, currency = %config.currency, "shell context ready");
        Self {
            registry,
            store,
            config,
            config_manager,
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn prompt(&self) -> String {
        "budget> ".to_string()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.resolve(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        if let Some(name) = self.registry.suggest(input) {
            output::hint(format!("Suggestion: `{name}`?"));
        }
    }

    pub(crate) fn usage(&self, command: &str) -> CommandError {
        self.registry.usage_error(command)
    }

    pub(crate) fn show_config(&self) {
        output::section("Configuration");
        for (key, value) in self.config.entries() {
            output::info(format!("  {key:<16} {value}"));
        }
        output::info(format!("  Stored at {}", self.config_manager.path().display()));
    }

    /// Applies one preference and persists it; the live config only changes
    /// once the file is written.
    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut next = self.config.clone();
        next.set(key, value)?;
        self.config_manager.save(&next)?;
        tracing::info!(key, path = %self.config_manager.path().display(), "configuration saved");
        self.config = next;
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        tracing::debug!(command = ?self.last_command, error = %err, "command failed");
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency(
            amount,
            &self.config.currency_code(),
            &self.config.locale_config(),
        )
    }

    pub(crate) fn category_label(&self, category_id: Uuid) -> &str {
        self.store
            .ledger()
            .category_name(category_id)
            .unwrap_or("(deleted)")
    }

    pub(crate) fn find_category(
        &self,
        name: &str,
        entry_type: Option<EntryType>,
    ) -> Result<&Category, CommandError> {
        let ledger = self.store.ledger();
        // Names are unique per entry type only.
        if entry_type.is_none()
            && ledger.category_by_name(name, Some(EntryType::Income)).is_some()
            && ledger.category_by_name(name, Some(EntryType::Expense)).is_some()
        {
            return Err(CommandError::InvalidArguments(format!(
                "Both an income and an expense category are named `{name}`; add `income` or `expense`."
            )));
        }
        ledger
            .category_by_name(name, entry_type)
            .ok_or_else(|| CommandError::InvalidArguments(format!("No category named `{name}`.")))
    }

    pub(crate) fn find_goal(&self, name: &str) -> Result<&SavingsGoal, CommandError> {
        self.store
            .ledger()
            .goal_by_name(name)
            .ok_or_else(|| CommandError::InvalidArguments(format!("No goal named `{name}`.")))
    }

    /// Resolves a transaction from a unique prefix of its id.
    pub(crate) fn find_transaction(&self, prefix: &str) -> Result<&Transaction, CommandError> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments(
                "Transaction id must not be empty.".into(),
            ));
        }
        let mut matches = self
            .store
            .ledger()
            .transactions
            .iter()
            .filter(|txn| txn.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (None, _) => Err(CommandError::InvalidArguments(format!(
                "No transaction with id `{prefix}`."
            ))),
            (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
                "Id prefix `{prefix}` is ambiguous; type more characters."
            ))),
        }
    }
}

/// First eight characters of an id, enough to address it in the shell.
pub(crate) fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Positional arguments plus `--flag value` pairs.
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub flags: HashMap<&'a str, &'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn parse(args: &[&'a str], known: &[&str]) -> Result<Self, CommandError> {
        let mut positional = Vec::new();
        let mut flags = HashMap::new();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                positional.push(arg);
                continue;
            };
            if !known.contains(&flag) {
                return Err(CommandError::InvalidArguments(format!(
                    "Unknown option `--{flag}`."
                )));
            }
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("Option `--{flag}` needs a value."))
            })?;
            flags.insert(flag, value);
        }
        Ok(Self { positional, flags })
    }

    pub fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags.get(name).copied()
    }
}

pub(crate) fn parse_amount(raw: &str, field: &str) -> Result<f64, CommandError> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid {field}.")))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date (expected YYYY-MM-DD)."))
    })
}

pub(crate) fn parse_entry_type(raw: &str) -> Result<EntryType, CommandError> {
    EntryType::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not `income` or `expense`."))
    })
}
