//! Candidate verification and version banner parsing.
//!
//! A candidate executable is only trusted after it has been run with
//! `-version` and its banner parsed. Vendors disagree on which stream the
//! banner lands on (HotSpot historically prints to stderr), so both streams
//! are captured and searched as one blob.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use wait_timeout::ChildExt;

use crate::models::{Installation, Vendor};

/// Upper bound on how long a candidate may take to report its version.
/// A hung or malformed binary must not stall the whole scan.
const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version "([^"]+)""#).expect("version pattern is valid"));

/// Why a candidate was rejected. All variants are recoverable: the scanner
/// drops the candidate and moves on.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("failed to launch candidate: {0}")]
    Launch(#[from] std::io::Error),

    #[error("candidate exited with status {code:?}")]
    Exit { code: Option<i32> },

    #[error("candidate did not exit within {0:?}")]
    Timeout(Duration),

    #[error("no version string in banner output")]
    Parse,
}

/// Run a candidate launcher and parse its banner into an [`Installation`].
///
/// The child is waited on with a bounded timeout; expiry kills it and yields
/// [`VerifyError::Timeout`]. No side effects beyond the child process.
pub fn verify(executable: &Path, install_root: &Path) -> Result<Installation, VerifyError> {
    verify_with_timeout(executable, install_root, VERIFY_TIMEOUT)
}

/// [`verify`] with an explicit timeout.
pub fn verify_with_timeout(
    executable: &Path,
    install_root: &Path,
    timeout: Duration,
) -> Result<Installation, VerifyError> {
    let mut child = Command::new(executable)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain both pipes concurrently with the wait. A child writing more
    // banner than the OS pipe buffer holds would otherwise block on write
    // and run into the timeout.
    let stdout_reader = drain(child.stdout.take());
    let stderr_reader = drain(child.stderr.take());

    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            // Killing the child closes the pipes and unblocks the readers.
            let _ = child.kill();
            let _ = child.wait();
            return Err(VerifyError::Timeout(timeout));
        }
    };

    let mut banner = stdout_reader.join().unwrap_or_default();
    banner.push_str(&stderr_reader.join().unwrap_or_default());

    if !status.success() {
        return Err(VerifyError::Exit {
            code: status.code(),
        });
    }

    parse_banner(&banner, install_root)
}

/// Read a child pipe to EOF on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

/// Parse a captured version banner into an [`Installation`].
pub fn parse_banner(banner: &str, install_root: &Path) -> Result<Installation, VerifyError> {
    let version = extract_version(banner).ok_or(VerifyError::Parse)?;

    Ok(Installation {
        major_version: major_version_of(&version),
        vendor: classify_vendor(banner),
        path: install_root.to_path_buf(),
        version,
    })
}

/// First `version "<raw>"` occurrence in the banner, if any.
fn extract_version(banner: &str) -> Option<String> {
    VERSION_RE
        .captures(banner)
        .map(|caps| caps[1].to_string())
}

/// Derive the major version from a raw version string.
///
/// Legacy numbering (`1.8.0_202`) takes the second dot-component; modern
/// numbering (`17.0.2`) takes the first. A non-numeric component yields 0
/// rather than an error.
pub fn major_version_of(version: &str) -> u32 {
    let component = if version.starts_with("1.") {
        version.split('.').nth(1)
    } else {
        version.split('.').next()
    };

    component
        .and_then(|c| c.parse().ok())
        .unwrap_or(0)
}

/// Classify the distribution from the full banner.
///
/// Case-insensitive substring checks in fixed priority order; first match
/// wins, so a banner carrying both "openjdk" and "hotspot" is OpenJDK.
fn classify_vendor(banner: &str) -> Vendor {
    let lower = banner.to_lowercase();
    if lower.contains("openjdk") {
        Vendor::OpenJdk
    } else if lower.contains("java(tm)") || lower.contains("hotspot") {
        Vendor::Oracle
    } else if lower.contains("zulu") {
        Vendor::Zulu
    } else {
        Vendor::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_modern_openjdk_banner() {
        let banner = "openjdk version \"17.0.2\" 2022-01-18\nOpenJDK Runtime Environment";
        let inst = parse_banner(banner, Path::new("/jvm/jdk-17")).unwrap();
        assert_eq!(inst.version, "17.0.2");
        assert_eq!(inst.major_version, 17);
        assert_eq!(inst.vendor, Vendor::OpenJdk);
        assert_eq!(inst.path, PathBuf::from("/jvm/jdk-17"));
    }

    #[test]
    fn parses_legacy_numbering_without_vendor_tokens() {
        let inst = parse_banner("java version \"1.8.0_202\"", Path::new("/jvm/jdk8")).unwrap();
        assert_eq!(inst.version, "1.8.0_202");
        assert_eq!(inst.major_version, 8);
        assert_eq!(inst.vendor, Vendor::Unknown);
    }

    #[test]
    fn oracle_classified_by_hotspot_token() {
        let banner = "java version \"1.8.0_202\"\nJava HotSpot(TM) 64-Bit Server VM";
        let inst = parse_banner(banner, Path::new("/jvm")).unwrap();
        assert_eq!(inst.vendor, Vendor::Oracle);
    }

    #[test]
    fn openjdk_wins_over_hotspot_in_priority_order() {
        let banner = "openjdk version \"11.0.1\"\nOpenJDK 64-Bit Server VM (HotSpot)";
        let inst = parse_banner(banner, Path::new("/jvm")).unwrap();
        assert_eq!(inst.vendor, Vendor::OpenJdk);
    }

    #[test]
    fn zulu_classified_case_insensitively() {
        let banner = "openjdk version \"11.0.1\"";
        assert_eq!(classify_vendor(banner), Vendor::OpenJdk);
        let banner = "java version \"11.0.1\" Zulu11.2+3";
        assert_eq!(classify_vendor(banner), Vendor::Zulu);
    }

    #[test]
    fn banner_without_version_is_parse_error() {
        let result = parse_banner("no banner here", Path::new("/jvm"));
        assert!(matches!(result, Err(VerifyError::Parse)));
    }

    #[test]
    fn major_version_modern() {
        assert_eq!(major_version_of("17.0.2"), 17);
        assert_eq!(major_version_of("21"), 21);
    }

    #[test]
    fn major_version_legacy() {
        assert_eq!(major_version_of("1.8.0_202"), 8);
        assert_eq!(major_version_of("1.7.0"), 7);
    }

    #[test]
    fn major_version_non_numeric_is_zero() {
        assert_eq!(major_version_of("beta.1"), 0);
        assert_eq!(major_version_of("1.beta"), 0);
    }

    #[test]
    fn extract_version_takes_first_occurrence() {
        let banner = "java version \"11.0.1\"\nbuilt from version \"irrelevant\"";
        assert_eq!(extract_version(banner), Some("11.0.1".to_string()));
    }

    #[test]
    fn verify_rejects_missing_executable() {
        let result = verify(
            Path::new("/nonexistent/bin/java-does-not-exist"),
            Path::new("/nonexistent"),
        );
        assert!(matches!(result, Err(VerifyError::Launch(_))));
    }

    #[cfg(unix)]
    #[test]
    fn verify_reads_banner_from_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("java");
        std::fs::write(
            &exe,
            "#!/bin/sh\necho 'openjdk version \"17.0.2\" 2022-01-18' 1>&2\n",
        )
        .unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let inst = verify(&exe, dir.path()).unwrap();
        assert_eq!(inst.version, "17.0.2");
        assert_eq!(inst.vendor, Vendor::OpenJdk);
    }

    #[cfg(unix)]
    #[test]
    fn verify_survives_banner_larger_than_pipe_buffer() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("java");
        // 1 MiB of extra output on stdout, well past the pipe buffer.
        std::fs::write(
            &exe,
            "#!/bin/sh\n\
             echo 'openjdk version \"17.0.2\" 2022-01-18' 1>&2\n\
             dd if=/dev/zero bs=1024 count=1024 2>/dev/null | tr '\\0' 'x'\n",
        )
        .unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let inst = verify(&exe, dir.path()).unwrap();
        assert_eq!(inst.version, "17.0.2");
    }

    #[cfg(unix)]
    #[test]
    fn verify_times_out_on_hung_candidate() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("java");
        std::fs::write(&exe, "#!/bin/sh\nsleep 30\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let timeout = Duration::from_millis(200);
        let result = verify_with_timeout(&exe, dir.path(), timeout);
        assert!(matches!(result, Err(VerifyError::Timeout(t)) if t == timeout));
    }

    #[cfg(unix)]
    #[test]
    fn verify_rejects_nonzero_exit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("java");
        std::fs::write(&exe, "#!/bin/sh\nexit 3\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = verify(&exe, dir.path());
        assert!(matches!(result, Err(VerifyError::Exit { code: Some(3) })));
    }
}
