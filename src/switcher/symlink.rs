//! POSIX switch strategy: a single fixed symlink.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{JswitchError, Result};

use super::{EnvironmentSwitch, SwitchOutcome};

/// Maintains one symlink (`~/.jswitch/current` by default) pointing at the
/// active install root. The link target changes; the link path never does,
/// so a one-time `JAVA_HOME` export in the shell profile keeps working
/// across switches.
#[derive(Debug)]
pub struct SymlinkSwitch {
    link_path: PathBuf,
}

impl SymlinkSwitch {
    pub fn new(link_path: PathBuf) -> Self {
        Self { link_path }
    }

    pub fn link_path(&self) -> &Path {
        &self.link_path
    }
}

impl EnvironmentSwitch for SymlinkSwitch {
    /// Replace whatever sits at the link path (file, live link, or stale
    /// link) with a fresh symlink to `install_root`. Idempotent: repeated
    /// switches always leave exactly one link with no dangling leftovers.
    fn switch(&self, install_root: &Path) -> Result<SwitchOutcome> {
        if let Some(parent) = self.link_path.parent() {
            fs::create_dir_all(parent).map_err(|err| JswitchError::Switch {
                message: format!("failed to create {}: {}", parent.display(), err),
            })?;
        }

        // symlink_metadata (not metadata) so a dangling link is still seen.
        if fs::symlink_metadata(&self.link_path).is_ok() {
            fs::remove_file(&self.link_path).map_err(|err| JswitchError::Switch {
                message: format!(
                    "failed to remove existing link {}: {}",
                    self.link_path.display(),
                    err
                ),
            })?;
        }

        std::os::unix::fs::symlink(install_root, &self.link_path).map_err(|err| {
            JswitchError::Switch {
                message: format!(
                    "failed to create symlink {} -> {}: {}",
                    self.link_path.display(),
                    install_root.display(),
                    err
                ),
            }
        })?;

        Ok(SwitchOutcome::Symlink {
            link: self.link_path.clone(),
        })
    }
}
