//! Adoptium release lookup.
//!
//! Queries the Adoptium v3 API for the latest GA release of a major Java
//! version, filtered to the current platform. The base URL is injectable so
//! tests can point the client at a local mock server.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{JswitchError, Result};

/// Production API endpoint, completed as `{base}/{major}/ga`.
pub const ADOPTIUM_BASE_URL: &str = "https://api.adoptium.net/v3/assets/feature_releases";

const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved release: where to fetch it and what it calls itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub download_url: String,
    pub semver: String,
}

#[derive(Debug, Deserialize)]
struct Release {
    binaries: Vec<Binary>,
    version_data: VersionData,
}

#[derive(Debug, Deserialize)]
struct VersionData {
    semver: String,
}

#[derive(Debug, Deserialize)]
struct Binary {
    package: Package,
}

#[derive(Debug, Deserialize)]
struct Package {
    link: String,
}

/// Blocking client for the Adoptium release API.
pub struct AdoptiumClient {
    client: Client,
    base_url: String,
}

impl AdoptiumClient {
    pub fn new() -> Self {
        Self::with_base_url(ADOPTIUM_BASE_URL)
    }

    /// Client against a custom endpoint (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("jswitch")
                .timeout(API_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// Look up the latest GA release of `major` for this OS and
    /// architecture.
    pub fn latest_release(&self, major: u32) -> Result<ReleaseInfo> {
        let url = format!("{}/{}/ga", self.base_url, major);
        let os = os_param();
        let arch = arch_param();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("os", os),
                ("architecture", arch),
                ("image_type", "jdk"),
                ("jvm_impl", "hotspot"),
                ("vendor", "eclipse"),
                ("page_size", "1"),
                ("sort_order", "DESC"),
            ])
            .send()
            .map_err(|err| JswitchError::Fetch {
                message: format!("release lookup failed: {}", err),
            })?;

        if !response.status().is_success() {
            return Err(JswitchError::Fetch {
                message: format!("release lookup returned HTTP {}", response.status()),
            });
        }

        let releases: Vec<Release> = response.json().map_err(|err| JswitchError::Fetch {
            message: format!("failed to decode release list: {}", err),
        })?;

        let release = releases.into_iter().next().ok_or_else(|| JswitchError::Fetch {
            message: format!("no GA release found for Java {} on {}/{}", major, os, arch),
        })?;

        let binary = release
            .binaries
            .into_iter()
            .next()
            .ok_or_else(|| JswitchError::Fetch {
                message: "release has no binaries for this platform".to_string(),
            })?;

        Ok(ReleaseInfo {
            download_url: binary.package.link,
            semver: release.version_data.semver,
        })
    }
}

impl Default for AdoptiumClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Adoptium's name for the current operating system.
fn os_param() -> &'static str {
    match std::env::consts::OS {
        "macos" => "mac",
        "windows" => "windows",
        "linux" => "linux",
        other => other,
    }
}

/// Adoptium's name for the current architecture.
fn arch_param() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "aarch64",
        "x86" => "x32",
        other => other,
    }
}
