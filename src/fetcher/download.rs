//! Streaming download plus extraction.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::error::{JswitchError, Result};

use super::archive::extract_archive;
use super::progress::ProgressReporter;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const CHUNK_SIZE: usize = 64 * 1024;

/// Download `url` into a temp file, extract it under `dest_dir`, and return
/// the extracted install root.
///
/// Progress fractions are reported only when the server advertises a content
/// length; either way the reporter is completed (and thereby closed) before
/// this function returns successfully.
pub fn fetch_and_extract(
    url: &str,
    dest_dir: &Path,
    reporter: ProgressReporter,
) -> Result<PathBuf> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("jswitch")
        .connect_timeout(CONNECT_TIMEOUT)
        // Large archives over slow links; the per-request timeout would
        // abort a legitimate transfer.
        .timeout(None)
        .build()
        .map_err(|err| JswitchError::Fetch {
            message: format!("failed to build HTTP client: {}", err),
        })?;

    let mut response = client.get(url).send().map_err(|err| JswitchError::Fetch {
        message: format!("download failed: {}", err),
    })?;

    if !response.status().is_success() {
        return Err(JswitchError::Fetch {
            message: format!("download returned HTTP {}", response.status()),
        });
    }

    let total = response.content_length();
    let mut archive = NamedTempFile::new().map_err(|err| JswitchError::Fetch {
        message: format!("failed to create temp file: {}", err),
    })?;

    let mut downloaded: u64 = 0;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = response.read(&mut buf).map_err(|err| JswitchError::Fetch {
            message: format!("download interrupted: {}", err),
        })?;
        if n == 0 {
            break;
        }
        archive.write_all(&buf[..n]).map_err(|err| JswitchError::Fetch {
            message: format!("failed to write archive: {}", err),
        })?;
        downloaded += n as u64;
        if let Some(total) = total {
            if total > 0 {
                reporter.update(downloaded as f64 / total as f64);
            }
        }
    }
    archive.flush().map_err(|err| JswitchError::Fetch {
        message: format!("failed to flush archive: {}", err),
    })?;

    let root = extract_archive(archive.path(), dest_dir).map_err(|err| JswitchError::Fetch {
        message: format!("extraction failed: {:#}", err),
    })?;

    reporter.complete();
    Ok(root)
}
