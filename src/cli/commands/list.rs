//! List command implementation.
//!
//! The `jswitch list` command shows the recorded installations and which
//! one is active.

use console::style;

use crate::config::ConfigStore;
use crate::error::Result;
use crate::ui::installation_table;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    store: &'a ConfigStore,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(store: &'a ConfigStore) -> Self {
        Self { store }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self) -> Result<CommandResult> {
        let inventory = self.store.load()?;

        if inventory.installations.is_empty() {
            println!("No Java installations recorded. Run 'jswitch scan' first.");
            return Ok(CommandResult::success());
        }

        println!("{}", installation_table(&inventory).render());

        if inventory.current_version.is_empty() {
            println!("No active version. Run 'jswitch use <version>' to pick one.");
        } else {
            println!(
                "Active version: {}",
                style(&inventory.current_version).green()
            );
        }

        Ok(CommandResult::success())
    }
}
