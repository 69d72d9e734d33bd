//! Terminal output and interactive selection.

pub mod table;

pub use table::{installation_table, Table};

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{JswitchError, Result};
use crate::models::Inventory;

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Interactive picker over the inventory. Returns the index of the chosen
/// installation, or `None` when the prompt was aborted; the cursor starts on
/// the currently active version.
pub fn select_installation(inventory: &Inventory, term: &Term) -> Result<Option<usize>> {
    let labels: Vec<String> = inventory
        .installations
        .iter()
        .map(|i| format!("[{}] {} @ {}", i.vendor, i.version, i.path.display()))
        .collect();

    let default_idx = inventory
        .installations
        .iter()
        .position(|i| i.version == inventory.current_version)
        .unwrap_or(0);

    Select::with_theme(&prompt_theme())
        .with_prompt("Select a Java version")
        .items(&labels)
        .default(default_idx)
        .interact_on_opt(term)
        .map_err(|e| JswitchError::Io(e.into()))
}

/// Progress bar for a download, rendered on a 0..100 percentage scale.
/// The feed is fractional progress, not byte counts, so the template must
/// not pretend to know sizes.
pub fn download_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {percent}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}
