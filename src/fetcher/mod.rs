//! Acquiring new installations from the Adoptium release API.
//!
//! Three pieces: [`client`] resolves the latest GA release for a major
//! version, [`download`] streams the archive and hands it to [`archive`] for
//! extraction, and [`progress`] carries lossy progress fractions from the
//! download thread to the UI.

pub mod archive;
pub mod client;
pub mod download;
pub mod progress;

pub use archive::extract_archive;
pub use client::{AdoptiumClient, ReleaseInfo};
pub use download::fetch_and_extract;
pub use progress::{progress_channel, ProgressEvent, ProgressReporter, PROGRESS_CAPACITY};
