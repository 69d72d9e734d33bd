//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// jswitch - Java version discovery and switching.
#[derive(Debug, Parser)]
#[command(name = "jswitch")]
// No propagate_version: the auto --version flag would collide with the
// `use` subcommand's positional argument id.
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan the filesystem for Java installations
    Scan(ScanArgs),

    /// List known installations (default if no command specified)
    List,

    /// Make a version the active one
    Use(UseArgs),

    /// Download and register a JDK from Adoptium
    Install(InstallArgs),

    /// Pick the active version interactively
    Select,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `scan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScanArgs {
    /// Directories to scan instead of the platform defaults
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `use` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UseArgs {
    /// Version string as listed by `jswitch list`
    pub version: String,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Major Java version to install (e.g. 17, 21)
    pub major: u32,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
