//! Windows switch strategy: `HKCU\Environment` mutation plus broadcast.

use std::path::Path;

use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};
use winreg::RegKey;

use crate::error::{JswitchError, Result};

use super::{rebuild_path_list, EnvironmentSwitch, SwitchOutcome, JAVA_HOME_BIN};

/// How long the settings-change broadcast may block, in milliseconds.
const BROADCAST_TIMEOUT_MS: u32 = 5000;

/// Sets `JAVA_HOME` directly and keeps exactly one `%JAVA_HOME%\bin` token
/// at the front of the user `Path` value. Machine-wide values are never
/// touched.
#[derive(Debug, Default)]
pub struct RegistrySwitch;

impl RegistrySwitch {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentSwitch for RegistrySwitch {
    fn switch(&self, install_root: &Path) -> Result<SwitchOutcome> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let env = hkcu
            .open_subkey_with_flags("Environment", KEY_READ | KEY_WRITE)
            .map_err(|err| JswitchError::Switch {
                message: format!("failed to open HKCU\\Environment: {}", err),
            })?;

        let home = install_root.to_string_lossy().to_string();
        env.set_value("JAVA_HOME", &home)
            .map_err(|err| JswitchError::Switch {
                message: format!("failed to set JAVA_HOME: {}", err),
            })?;

        let current_path: String = env.get_value("Path").unwrap_or_default();
        let new_path = rebuild_path_list(&current_path, JAVA_HOME_BIN);
        env.set_value("Path", &new_path)
            .map_err(|err| JswitchError::Switch {
                message: format!("failed to set Path: {}", err),
            })?;

        // Already-running processes only pick the change up via this
        // notification; failure means they see it after a restart, which is
        // a warning rather than a failed switch.
        let broadcast_ok = broadcast_settings_change();
        if !broadcast_ok {
            tracing::warn!("failed to broadcast environment change; restart terminals to pick it up");
        }

        Ok(SwitchOutcome::Registry { broadcast_ok })
    }
}

/// Tell every top-level window the environment changed, waiting at most
/// [`BROADCAST_TIMEOUT_MS`] per hung recipient.
fn broadcast_settings_change() -> bool {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        SendMessageTimeoutW, HWND_BROADCAST, SMTO_ABORTIFHUNG, WM_SETTINGCHANGE,
    };

    let section: Vec<u16> = "Environment\0".encode_utf16().collect();

    // SAFETY: HWND_BROADCAST with WM_SETTINGCHANGE and a NUL-terminated
    // UTF-16 section name is the documented calling convention; the buffer
    // outlives the call because SMTO waits for delivery.
    let result = unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            0,
            section.as_ptr() as isize,
            SMTO_ABORTIFHUNG,
            BROADCAST_TIMEOUT_MS,
            std::ptr::null_mut(),
        )
    };

    result != 0
}
