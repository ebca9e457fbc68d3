//! Shared runtime state for CLI interactions and command execution.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use dialoguer::theme::ColorfulTheme;
use expense_config::{default_base_dir, Config, ConfigManager};
use expense_core::{Clock, CoreError, ExpenseTracker};
use expense_storage_json::{JsonExpenseStore, StoragePaths};
use strsim::levenshtein;
use tracing::info;

use super::{
    commands,
    core::{CliError, CommandError, CommandResult, LoopControl},
    formatters::CliFormatters,
    io as cli_io,
    registry::{CommandEntry, CommandRegistry},
    shell::parse_command_line,
    system_clock::SystemClock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: ExpenseTracker,
    pub storage: JsonExpenseStore,
    pub theme: ColorfulTheme,
    pub formatters: CliFormatters,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub base_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the default base directory with the system clock.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, default_base_dir(), Arc::new(SystemClock))
    }

    pub fn with_base_dir(
        mode: CliMode,
        base_dir: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let storage = open_storage(&config, &base_dir)?;
        let tracker = ExpenseTracker::open(Box::new(storage.clone()), clock)?;
        info!(
            base = %base_dir.display(),
            store = %storage.store_path().display(),
            "shell context ready"
        );

        Ok(ShellContext {
            mode,
            registry,
            tracker,
            formatters: CliFormatters::from_config(&config),
            storage,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            base_dir,
            last_command: None,
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        match self.tracker.editing() {
            Some(id) => format!("expenses (editing {id})> "),
            None => "expenses> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn dispatch(
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

    /// Tokenizes and dispatches one line of input.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{best}`?"));
            }
        }
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    /// Saves the config and re-derives everything that depends on it.
    pub fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        self.formatters = CliFormatters::from_config(&self.config);
        cli_io::apply_config(&self.config);
        Ok(())
    }

    /// Reopens the store after a change to its location, key or retention.
    pub fn reopen_storage(&mut self) -> CommandResult {
        let storage = open_storage(&self.config, &self.base_dir)?;
        let clock = self.tracker.clock();
        self.tracker = ExpenseTracker::open(Box::new(storage.clone()), clock)?;
        self.storage = storage;
        Ok(())
    }
}

fn open_storage(config: &Config, base_dir: &Path) -> Result<JsonExpenseStore, CoreError> {
    let paths = StoragePaths::new(
        config.resolve_data_root(base_dir),
        config.resolve_backup_root(base_dir),
    );
    JsonExpenseStore::with_retention(paths, &config.store_key, config.backup_retention)
}
