//! Persisted inventory storage.
//!
//! The inventory lives in a single JSON document at a fixed per-user
//! location (`~/.jswitch/config.json`). It is read fresh by every operation
//! that needs it and written back in full by every mutating command. There
//! is deliberately no atomic replace and no locking: concurrent invocations
//! racing on `save` are last-writer-wins, an accepted weakness.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{JswitchError, Result};
use crate::models::Inventory;

/// Environment variable overriding the base directory, mainly for tests and
/// non-standard setups.
pub const HOME_ENV: &str = "JSWITCH_HOME";

const CONFIG_DIR_NAME: &str = ".jswitch";
const CONFIG_FILE_NAME: &str = "config.json";

/// Handle on the per-user jswitch directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at the default per-user location, honoring [`HOME_ENV`].
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var(HOME_ENV) {
            return Self::new(dir);
        }
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        Self::new(home.join(CONFIG_DIR_NAME))
    }

    /// Base directory (`~/.jswitch` unless overridden).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the persisted inventory document.
    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Directory downloaded toolchains are extracted into.
    pub fn versions_dir(&self) -> PathBuf {
        self.dir.join("versions")
    }

    /// Path of the active-selection symlink on POSIX systems.
    pub fn current_link(&self) -> PathBuf {
        self.dir.join("current")
    }

    /// Read the inventory from disk.
    ///
    /// A missing file is not an error and yields an empty inventory; a
    /// malformed file is fatal and surfaced to the caller.
    pub fn load(&self) -> Result<Inventory> {
        let path = self.config_file();

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Inventory::default());
            }
            Err(err) => {
                return Err(JswitchError::ConfigLoad {
                    path,
                    message: err.to_string(),
                });
            }
        };

        serde_json::from_str(&data).map_err(|err| JswitchError::ConfigLoad {
            path,
            message: err.to_string(),
        })
    }

    /// Write the full inventory document, creating the directory first.
    ///
    /// Failures are surfaced and never retried; a partial overwrite is
    /// possible on a crashed write.
    pub fn save(&self, inventory: &Inventory) -> Result<()> {
        let path = self.config_file();

        fs::create_dir_all(&self.dir).map_err(|err| JswitchError::ConfigSave {
            path: path.clone(),
            message: err.to_string(),
        })?;

        let data = serde_json::to_string_pretty(inventory).map_err(|err| {
            JswitchError::ConfigSave {
                path: path.clone(),
                message: err.to_string(),
            }
        })?;

        fs::write(&path, data).map_err(|err| JswitchError::ConfigSave {
            path,
            message: err.to_string(),
        })
    }
}
