pub mod analytics;
pub mod config;
pub mod expense;
pub mod storage;
pub mod system;
pub mod view;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(view::definitions());
    commands.extend(analytics::definitions());
    commands.extend(storage::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
