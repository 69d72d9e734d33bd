//! Inventory persistence.

pub mod store;

pub use store::{ConfigStore, HOME_ENV};
