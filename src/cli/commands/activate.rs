//! Use command implementation.
//!
//! The `jswitch use` command makes a recorded installation the active one.
//! Activation is a two-step transaction: the selection is persisted first,
//! then the OS-level switch is attempted. A failed switch leaves the
//! persisted selection in place; re-running `use` is the recovery path.

use console::style;

use crate::cli::args::UseArgs;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::switcher::{platform_switcher, SwitchOutcome};

use super::dispatcher::{Command, CommandResult};

/// The use command implementation.
pub struct UseCommand<'a> {
    store: &'a ConfigStore,
    args: UseArgs,
}

impl<'a> UseCommand<'a> {
    /// Create a new use command.
    pub fn new(store: &'a ConfigStore, args: UseArgs) -> Self {
        Self { store, args }
    }
}

impl Command for UseCommand<'_> {
    fn execute(&self) -> Result<CommandResult> {
        switch_to(self.store, &self.args.version)
    }
}

/// Shared activation path, also used by the interactive picker.
pub(crate) fn switch_to(store: &ConfigStore, version: &str) -> Result<CommandResult> {
    let mut inventory = store.load()?;

    let install_root = match inventory.resolve_path(version) {
        Some(path) => path.to_path_buf(),
        None => {
            println!(
                "Version '{}' is not recorded. Run 'jswitch list' to see what is.",
                version
            );
            return Ok(CommandResult::success());
        }
    };

    inventory.current_version = version.to_string();
    store.save(&inventory)?;
    tracing::debug!(version, "selection persisted");

    match platform_switcher(store).switch(&install_root) {
        Ok(outcome) => {
            println!("Now using Java {}", style(version).green());
            print_outcome(&outcome);
        }
        Err(err) => {
            // The selection is already saved; only the OS-level step failed.
            println!(
                "Selected Java {} but the environment switch failed: {}",
                version, err
            );
            println!("Re-run 'jswitch use {}' to retry.", version);
        }
    }

    Ok(CommandResult::success())
}

fn print_outcome(outcome: &SwitchOutcome) {
    match outcome {
        SwitchOutcome::Symlink { link } => {
            println!();
            println!("Add these lines to your shell profile once:");
            println!("  export JAVA_HOME=\"{}\"", link.display());
            println!("  export PATH=\"$JAVA_HOME/bin:$PATH\"");
        }
        SwitchOutcome::Registry { broadcast_ok } => {
            if !*broadcast_ok {
                println!("Open terminals need a restart to see the change.");
            }
        }
    }
}
