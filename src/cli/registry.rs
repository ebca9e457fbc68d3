//! Name-to-handler table for shell commands.

use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
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
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Commands in registration order, reachable by name or alias.
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    aliases: HashMap<&'static str, &'static str>,
    order: Vec<&'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        for alias in entry.aliases {
            self.aliases.insert(*alias, name);
        }
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        let canonical = self.aliases.get(name).copied().unwrap_or(name);
        self.commands.get(canonical)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    /// Primary names followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied().chain(self.aliases.keys().copied())
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn aliases_resolve_to_primary_entry() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("edit", "Edit", "edit <id>", noop).with_aliases(&["update"]));
        registry.register(CommandEntry::new("list", "List", "list", noop));

        assert_eq!(registry.get("update").map(|entry| entry.name), Some("edit"));
        assert!(registry.handler("list").is_some());
        assert!(registry.get("missing").is_none());
        let listed: Vec<_> = registry.list().iter().map(|entry| entry.name).collect();
        assert_eq!(listed, vec!["edit", "list"]);
        assert!(registry.names().any(|name| name == "update"));
    }
}
