//! CLI subcommand implementations.

pub mod activate;
pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod list;
pub mod scan;
pub mod select;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
