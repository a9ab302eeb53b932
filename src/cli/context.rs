//! Shell state, command dispatch, and error reporting.

use std::io;

use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::warn;

use crate::{
    config::{Config, ConfigManager},
    errors::{BudgetError, CliError},
    format::format_month,
    ledger::Ledger,
};

use super::{
    commands, output,
    output::OutputPreferences,
    registry::{CommandEntry, CommandRegistry},
    shell::parse_command_line,
    view,
};

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

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Everything a command handler can touch. Holds the one ledger instance for
/// the lifetime of the session.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
    config_manager: Option<ConfigManager>,
}

impl ShellContext {
    /// Opens the config in the data directory. Neither a missing data
    /// directory nor an unreadable config file stops the shell.
    pub fn new(mode: CliMode) -> Self {
        Self::from_manager(mode, ConfigManager::new())
    }

    pub(crate) fn from_manager(
        mode: CliMode,
        manager: Result<ConfigManager, BudgetError>,
    ) -> Self {
        let manager = match manager {
            Ok(manager) => manager,
            Err(err) => {
                warn!(error = %err, "data directory unavailable, settings will not be saved");
                output::warning(format!(
                    "Could not open data directory ({err}); settings will not be saved."
                ));
                return Self::with_config(mode, Config::default(), None);
            }
        };
        let config = match manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %manager.path().display(), error = %err, "ignoring unreadable config");
                output::warning(format!("Could not read config ({err}); using defaults."));
                Config::default()
            }
        };
        Self::with_config(mode, config, Some(manager))
    }

    /// Builds a context around an already-loaded config. Without a manager,
    /// config changes live only for the session.
    pub fn with_config(mode: CliMode, config: Config, manager: Option<ConfigManager>) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let context = Self {
            mode,
            registry,
            ledger: Ledger::with_id_policy(config.id_policy),
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
            config_manager: manager,
        };
        context.apply_output_preferences();
        context
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color: self.config.color && self.mode == CliMode::Interactive,
            quiet_mode: false,
        });
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        match &self.config_manager {
            Some(manager) => manager.save(&self.config).map_err(CommandError::from),
            None => Ok(()),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        format!("budget ({} items)> ", self.ledger.len())
    }

    /// Re-derives totals and then per-expense percentages, in that order.
    pub fn refresh(&mut self) {
        self.ledger.recompute_budget();
        self.ledger.recompute_percentages();
    }

    pub(crate) fn month_label(&self) -> Option<String> {
        self.config
            .show_month
            .then(|| format_month(Local::now().date_naive()))
    }

    pub(crate) fn print_summary(&self) {
        let month = self.month_label();
        output::lines(view::render_summary(
            &self.ledger.budget_snapshot(),
            &self.config.locale,
            month.as_deref(),
        ));
    }

    pub(crate) fn handle_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(&err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(name) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{}`?", name));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit? All entries will be discarded.")
            .default(false)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(BudgetError::InvalidInput(message)) => {
                output::error(format!("Invalid input: {message}"));
            }
            other => output::error(other),
        }
    }
}
