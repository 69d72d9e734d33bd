//! Core data model: discovered installations and the persisted inventory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Java distribution identified from a version banner.
///
/// Serialized as the human-readable label so the persisted inventory stays
/// greppable (`"Azul Zulu"`, not `"Zulu"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vendor {
    #[serde(rename = "OpenJDK")]
    OpenJdk,
    Oracle,
    #[serde(rename = "Azul Zulu")]
    Zulu,
    /// Assigned to installations downloaded through `jswitch install`.
    #[serde(rename = "Eclipse Adoptium")]
    Adoptium,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Vendor::OpenJdk => "OpenJDK",
            Vendor::Oracle => "Oracle",
            Vendor::Zulu => "Azul Zulu",
            Vendor::Adoptium => "Eclipse Adoptium",
            Vendor::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// One discovered, verified Java toolchain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    /// Raw vendor-reported version string (e.g. `17.0.2`, `1.8.0_202`).
    pub version: String,

    /// Primary version number (8, 11, 17, ...) for sorting and filtering.
    pub major_version: u32,

    /// Absolute path to the installation root, one level above `bin`.
    pub path: PathBuf,

    /// Distribution label parsed from the version banner.
    pub vendor: Vendor,
}

impl fmt::Display for Installation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) @ {}",
            self.vendor,
            self.version,
            self.major_version,
            self.path.display()
        )
    }
}

/// Persisted record of known installations plus the current selection.
///
/// Loaded fresh at the start of every operation that needs it and written
/// back in full by every mutating command. There is no schema version; an
/// absent backing file simply yields `Inventory::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Raw version string of the active selection; empty when none.
    #[serde(default)]
    pub current_version: String,

    /// Known installations in discovery order.
    #[serde(default)]
    pub installations: Vec<Installation>,
}

impl Inventory {
    /// Resolve a version string to its install root.
    ///
    /// Linear scan; the first structural match wins. The raw version string
    /// is the only selection key, so two installations from different vendors
    /// sharing an identical version are disambiguated by list order alone.
    pub fn resolve_path(&self, version: &str) -> Option<&Path> {
        self.installations
            .iter()
            .find(|inst| inst.version == version)
            .map(|inst| inst.path.as_path())
    }
}
