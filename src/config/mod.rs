//! Configuration layer for device-ip.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - `any` / `both`, auto classifier, probe enabled, JSON output
//!
//! Probe targets given with `--probe-target` **replace** the TOML list entirely.
//!
//! # Boolean Flag Semantics
//!
//! `--skip-connectivity-check` only disables: if either the flag is set or the
//! TOML has `connectivity.check = false`, no probe runs.
//!
//! # TOML-Only Options
//!
//! The regex lists `classifier.wifi` and `classifier.mobile` are only read from
//! the config file. When they are present and no style is chosen, the pattern
//! classifier is used.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{ClassifierArg, Cli, Command, FormatArg, IpVersionArg, NetworkTypeArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{
    ClassifierChoice, Connectivity, OutputFormat, ValidatedConfig, write_default_config,
};
