//! OS-level activation of a verified installation.
//!
//! Exactly one of two mutually exclusive strategies exists for a given
//! target: a symlink swap on POSIX, a registry mutation plus best-effort
//! broadcast on Windows. [`platform_switcher`] is the startup probe that
//! picks the variant; the two are never combined.
//!
//! Selection itself is a two-step transaction owned by the `use` command:
//! the intended version is persisted first, then the switch is attempted.
//! A failed switch does not roll back the persisted selection — re-running
//! `use` is the recovery path.

#[cfg(unix)]
pub mod symlink;

#[cfg(windows)]
pub mod registry;

use std::path::{Path, PathBuf};

use crate::config::ConfigStore;
use crate::error::Result;

/// The `Path` token injected ahead of everything else on Windows.
pub const JAVA_HOME_BIN: &str = r"%JAVA_HOME%\bin";

/// What a successful switch actually did, for the command layer to report.
#[derive(Debug)]
pub enum SwitchOutcome {
    /// POSIX: the fixed symlink now points at the new install root. The
    /// user still needs the two env lines in their shell profile, once.
    Symlink { link: PathBuf },

    /// Windows: `JAVA_HOME` and `Path` rewritten under `HKCU\Environment`.
    /// `broadcast_ok` is false when the settings-change notification could
    /// not be delivered; running processes then see the change only after
    /// a restart.
    Registry { broadcast_ok: bool },
}

/// Capability interface for making one installation active at the OS level.
pub trait EnvironmentSwitch {
    fn switch(&self, install_root: &Path) -> Result<SwitchOutcome>;
}

/// Construct the switch strategy for the current platform.
#[cfg(unix)]
pub fn platform_switcher(store: &ConfigStore) -> Box<dyn EnvironmentSwitch> {
    Box::new(symlink::SymlinkSwitch::new(store.current_link()))
}

/// Construct the switch strategy for the current platform.
#[cfg(windows)]
pub fn platform_switcher(store: &ConfigStore) -> Box<dyn EnvironmentSwitch> {
    let _ = store;
    Box::new(registry::RegistrySwitch::new())
}

/// Rebuild a semicolon-delimited path list around one injected token.
///
/// The token is always prepended fresh. Existing entries are kept verbatim
/// and in order, except empty entries and any entry case-insensitively equal
/// to the injected token, so repeated switches never accumulate duplicates.
///
/// Pure and platform-neutral so the invariant is testable everywhere, even
/// though only the Windows strategy consumes it.
pub fn rebuild_path_list(existing: &str, token: &str) -> String {
    let mut parts = vec![token.to_string()];

    for part in existing.split(';') {
        let part = part.trim();
        if part.is_empty() || part.eq_ignore_ascii_case(token) {
            continue;
        }
        parts.push(part.to_string());
    }

    parts.join(";")
}
