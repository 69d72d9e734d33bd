//! Scan command implementation.
//!
//! The `jswitch scan` command walks the filesystem for Java installations
//! and records what it verified.

use crate::cli::args::ScanArgs;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::scanner;

use super::dispatcher::{Command, CommandResult};

/// The scan command implementation.
pub struct ScanCommand<'a> {
    store: &'a ConfigStore,
    args: ScanArgs,
}

impl<'a> ScanCommand<'a> {
    /// Create a new scan command.
    pub fn new(store: &'a ConfigStore, args: ScanArgs) -> Self {
        Self { store, args }
    }
}

impl Command for ScanCommand<'_> {
    fn execute(&self) -> Result<CommandResult> {
        let roots = if self.args.paths.is_empty() {
            scanner::default_scan_roots()
        } else {
            self.args.paths.clone()
        };

        tracing::info!("scanning {} root(s)", roots.len());
        let found = scanner::scan(&roots);

        // The scan result replaces the recorded installations wholesale;
        // the active selection is kept even if its entry disappeared.
        let mut inventory = self.store.load()?;
        inventory.installations = found;
        self.store.save(&inventory)?;

        if inventory.installations.is_empty() {
            println!("No Java installations found.");
            return Ok(CommandResult::success());
        }

        println!(
            "Found {} installation(s):",
            inventory.installations.len()
        );
        for install in &inventory.installations {
            println!("  {}", install);
        }

        Ok(CommandResult::success())
    }
}
