//! jswitch - Java version discovery and switching.
//!
//! Library crate backing the `jswitch` binary:
//! - [`scanner`] walks the filesystem and verifies candidate installations
//! - [`config`] persists the inventory under `~/.jswitch`
//! - [`switcher`] makes one installation active at the OS level
//! - [`fetcher`] downloads new JDKs from Adoptium
//! - [`cli`] and [`ui`] wire it all into the command line

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod scanner;
pub mod switcher;
pub mod ui;

pub use error::{JswitchError, Result};
