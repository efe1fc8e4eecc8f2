//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`validation`]: Checks run after parsing, reporting every problem found

mod defaults;
mod types;
mod validation;

pub use types::{AccessSeed, ChannelSeed, Config, ConfigError, DialectConfig, LogConfig};
pub use validation::{ValidationError, validate};
