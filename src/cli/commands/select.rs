//! Select command implementation.
//!
//! The `jswitch select` command is the interactive variant of `use`: it
//! shows a picker over the inventory and activates the chosen version.

use console::Term;

use crate::config::ConfigStore;
use crate::error::Result;
use crate::models::Inventory;
use crate::ui::select_installation;

use super::activate::switch_to;
use super::dispatcher::{Command, CommandResult};

/// The select command implementation.
pub struct SelectCommand<'a> {
    store: &'a ConfigStore,
}

impl<'a> SelectCommand<'a> {
    /// Create a new select command.
    pub fn new(store: &'a ConfigStore) -> Self {
        Self { store }
    }
}

impl Command for SelectCommand<'_> {
    fn execute(&self) -> Result<CommandResult> {
        let inventory = self.store.load()?;

        if inventory.installations.is_empty() {
            println!("No Java installations recorded. Run 'jswitch scan' first.");
            return Ok(CommandResult::success());
        }

        let term = Term::stderr();
        let selection = select_installation(&inventory, &term)?;
        activate_selection(self.store, &inventory, selection)
    }
}

/// Apply the picker's outcome. An aborted prompt (Esc/q) is a clean no-op,
/// not an error.
fn activate_selection(
    store: &ConfigStore,
    inventory: &Inventory,
    selection: Option<usize>,
) -> Result<CommandResult> {
    match selection {
        Some(index) => switch_to(store, &inventory.installations[index].version),
        None => Ok(CommandResult::success()),
    }
}
