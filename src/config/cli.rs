//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::defaults;

/// device-ip: resolve this device's local IP addresses
///
/// Prints the first non-loopback, non-link-local IPv4 and IPv6 address
/// found on interfaces of the requested network type.
#[derive(Debug, Parser)]
#[command(name = "device-ip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: get)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Network type the address must come from
    #[arg(long = "network-type", value_enum, global = true)]
    pub network_type: Option<NetworkTypeArg>,

    /// IP version(s) to return
    #[arg(long = "ip-version", value_enum, global = true)]
    pub ip_version: Option<IpVersionArg>,

    /// Interface name heuristic
    #[arg(long, value_enum, global = true)]
    pub classifier: Option<ClassifierArg>,

    /// Do not probe for an internet route before enumerating interfaces
    #[arg(long = "skip-connectivity-check", global = true)]
    pub skip_connectivity_check: bool,

    /// Socket address used to probe for an internet route (can be specified multiple times)
    #[arg(long = "probe-target", value_name = "ADDR", global = true)]
    pub probe_targets: Vec<String>,

    /// Read interfaces from a JSON snapshot file instead of the OS
    #[arg(long, value_name = "PATH", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for device-ip
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve and print the device's addresses
    Get,

    /// Dispatch a raw method call, as a host bridge would
    Call {
        /// Method name (e.g. getIpAddress)
        method: String,

        /// Method arguments as a JSON object
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },

    /// List enumerated interfaces with their classification
    Interfaces,

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Network type argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkTypeArg {
    /// Any non-loopback interface
    Any,
    /// Wi-Fi interfaces only
    Wifi,
    /// Cellular data interfaces only
    Mobile,
}

impl From<NetworkTypeArg> for crate::network::NetworkType {
    fn from(arg: NetworkTypeArg) -> Self {
        match arg {
            NetworkTypeArg::Any => Self::Any,
            NetworkTypeArg::Wifi => Self::Wifi,
            NetworkTypeArg::Mobile => Self::Mobile,
        }
    }
}

/// IP version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpVersionArg {
    /// IPv4 addresses only
    #[value(name = "ipv4")]
    V4,
    /// IPv6 addresses only
    #[value(name = "ipv6")]
    V6,
    /// Both IPv4 and IPv6 addresses
    #[value(name = "both")]
    Both,
}

impl From<IpVersionArg> for crate::network::IpVersion {
    fn from(arg: IpVersionArg) -> Self {
        match arg {
            IpVersionArg::V4 => Self::V4,
            IpVersionArg::V6 => Self::V6,
            IpVersionArg::Both => Self::Both,
        }
    }
}

/// Classifier style argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierArg {
    /// Built-in heuristic of the build target
    Auto,
    /// Android-style name substrings (wlan, rmnet, ...)
    Substring,
    /// Apple-style name prefixes (en, `pdp_ip`)
    Prefix,
    /// Regex patterns from the config file
    Pattern,
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// The `{ipv4, ipv6, error}` record as JSON
    Json,
    /// Human-readable lines
    Text,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
