//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Default request filters
    #[serde(default)]
    pub request: RequestSection,

    /// Interface name classification
    #[serde(default)]
    pub classifier: ClassifierSection,

    /// Connectivity probe configuration
    #[serde(default)]
    pub connectivity: ConnectivitySection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Request defaults section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestSection {
    /// Network type: "any", "wifi", or "mobile"
    pub network_type: Option<String>,

    /// IP version: "ipv4", "ipv6", or "both"
    pub ip_version: Option<String>,
}

/// Interface classification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierSection {
    /// Style: "auto", "substring", "prefix", or "pattern"
    pub style: Option<String>,

    /// Regex patterns for Wi-Fi interface names
    #[serde(default)]
    pub wifi: Vec<String>,

    /// Regex patterns for cellular interface names
    #[serde(default)]
    pub mobile: Vec<String>,
}

/// Connectivity probe section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectivitySection {
    /// Whether to probe for an internet route before enumerating
    pub check: Option<bool>,

    /// Socket addresses to probe
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "json" or "text"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# device-ip Configuration File

[request]
# Network type to take addresses from (default: "any")
# Accepted values: "any", "wifi", "mobile"
# network_type = "any"

# IP version(s) to return (default: "both")
# Accepted values: "ipv4"/"v4"/"4", "ipv6"/"v6"/"6", or "both"/"all"/"dual"
# ip_version = "both"

[classifier]
# How interface names are mapped to Wi-Fi / mobile (default: "auto")
#   auto      - built-in heuristic for this platform
#   substring - Android names: wlan*/wifi*, rmnet*/mobile*/cellular*/radio*
#   prefix    - Apple names: en*, pdp_ip*
#   pattern   - the regex lists below
# style = "auto"

# Regex patterns for Wi-Fi interfaces (used by style = "pattern")
# wifi = ["^wlan", "^wlp"]

# Regex patterns for cellular interfaces (used by style = "pattern")
# mobile = ["^rmnet", "^ccmni", "^pdp_ip"]

[connectivity]
# Probe for an internet route before enumerating (default: true)
# check = true

# Socket addresses used for the probe (no traffic is sent)
# targets = ["8.8.8.8:53", "[2001:4860:4860::8888]:53"]

[output]
# Output format: "json" or "text" (default: "json")
# format = "json"
"#
    .to_string()
}
