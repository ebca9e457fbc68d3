pub mod commands;
pub mod core;
pub mod formatters;
pub mod forms;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod system_clock;
pub mod table;

pub use shell::{run_cli, SCRIPT_ENV_VAR};
pub use shell_context::{CliMode, ShellContext};
