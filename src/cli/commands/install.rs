//! Install command implementation.
//!
//! The `jswitch install` command downloads the latest GA build of a major
//! Java version from Adoptium, extracts it under the managed versions
//! directory, and records it in the inventory.

use std::thread;

use console::style;

use crate::cli::args::InstallArgs;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::fetcher::{fetch_and_extract, progress_channel, AdoptiumClient, ProgressEvent, PROGRESS_CAPACITY};
use crate::models::{Installation, Vendor};
use crate::ui::download_bar;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'a> {
    store: &'a ConfigStore,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(store: &'a ConfigStore, args: InstallArgs) -> Self {
        Self { store, args }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self) -> Result<CommandResult> {
        let client = AdoptiumClient::new();

        println!("Resolving latest Java {} release...", self.args.major);
        let release = client.latest_release(self.args.major)?;

        let mut inventory = self.store.load()?;
        if inventory
            .installations
            .iter()
            .any(|i| i.version == release.semver)
        {
            println!("Java {} is already installed.", release.semver);
            return Ok(CommandResult::success());
        }

        println!("Downloading Java {}...", style(&release.semver).green());
        let dest = self.store.versions_dir();
        let url = release.download_url.clone();
        let (reporter, events) = progress_channel(PROGRESS_CAPACITY);

        let worker = thread::spawn(move || fetch_and_extract(&url, &dest, reporter));

        // Fractions are rendered on a 0..100 scale; the channel closing is
        // the end-of-stream signal, whether or not Completed got through.
        let bar = download_bar();
        for event in events {
            match event {
                ProgressEvent::Fraction(fraction) => {
                    bar.set_position((fraction * 100.0).round() as u64);
                }
                ProgressEvent::Completed => bar.set_position(100),
            }
        }
        bar.finish_and_clear();

        let install_root = worker
            .join()
            .unwrap_or_else(|_| {
                Err(crate::error::JswitchError::Fetch {
                    message: "download worker panicked".to_string(),
                })
            })?;

        inventory.installations.push(Installation {
            version: release.semver.clone(),
            major_version: self.args.major,
            path: install_root,
            vendor: Vendor::Adoptium,
        });
        self.store.save(&inventory)?;

        println!("Installed Java {}.", release.semver);
        println!("Run 'jswitch use {}' to activate it.", release.semver);

        Ok(CommandResult::success())
    }
}
