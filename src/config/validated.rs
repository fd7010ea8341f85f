//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::network::classifier::{PatternClassifier, PrefixClassifier, SubstringClassifier};
use crate::network::{
    ConnectivityProbe, InterfaceClassifier, IpVersion, NetworkType, RouteProbe, default_targets,
};
use crate::resolver::ResolveRequest;

use super::cli::{ClassifierArg, Cli, FormatArg};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// The interface classifier selected by configuration.
///
/// Enum dispatch keeps the resolver free of boxing.
#[derive(Debug, Clone)]
pub enum ClassifierChoice {
    /// Android-style substrings.
    Substring(SubstringClassifier),
    /// Apple-style prefixes.
    Prefix(PrefixClassifier),
    /// User-supplied regex patterns.
    Pattern(PatternClassifier),
}

impl ClassifierChoice {
    /// The built-in style for the build target.
    #[must_use]
    pub const fn platform() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Self::Prefix(PrefixClassifier)
        } else {
            Self::Substring(SubstringClassifier)
        }
    }

    /// Short name of the style, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Substring(_) => "substring",
            Self::Prefix(_) => "prefix",
            Self::Pattern(_) => "pattern",
        }
    }
}

impl InterfaceClassifier for ClassifierChoice {
    fn is_wifi(&self, name: &str) -> bool {
        match self {
            Self::Substring(c) => c.is_wifi(name),
            Self::Prefix(c) => c.is_wifi(name),
            Self::Pattern(c) => c.is_wifi(name),
        }
    }

    fn is_mobile(&self, name: &str) -> bool {
        match self {
            Self::Substring(c) => c.is_mobile(name),
            Self::Prefix(c) => c.is_mobile(name),
            Self::Pattern(c) => c.is_mobile(name),
        }
    }
}

/// Connectivity check selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    /// Probe the routing table before enumerating.
    Probe(RouteProbe),
    /// Assume connectivity.
    Skip,
}

impl ConnectivityProbe for Connectivity {
    fn is_connected(&self) -> bool {
        match self {
            Self::Probe(probe) => probe.is_connected(),
            Self::Skip => true,
        }
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON record.
    #[default]
    Json,
    /// Human-readable lines.
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Text => Self::Text,
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Request used by `get` and `interfaces`
    pub request: ResolveRequest,

    /// Interface name classifier
    pub classifier: ClassifierChoice,

    /// Connectivity check
    pub connectivity: Connectivity,

    /// Interface snapshot file replacing OS enumeration
    pub snapshot: Option<PathBuf>,

    /// Output format
    pub format: OutputFormat,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connectivity = match &self.connectivity {
            Connectivity::Probe(probe) => format!("probe({} targets)", probe.targets().len()),
            Connectivity::Skip => "skip".to_string(),
        };
        let snapshot = self
            .snapshot
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ network_type: {}, ip_version: {}, classifier: {}, connectivity: {}, snapshot: {} }}",
            self.request.network_type,
            self.request.ip_version,
            self.classifier.name(),
            connectivity,
            snapshot,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An enum value (network type, IP version, classifier, format) is unknown
    /// - Regex patterns are invalid, or the pattern style has none
    /// - A probe target is not a socket address
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let request = ResolveRequest::new(
            Self::resolve_network_type(cli, toml)?,
            Self::resolve_ip_version(cli, toml)?,
        );

        let classifier = Self::build_classifier(cli, toml)?;
        let connectivity = Self::build_connectivity(cli, toml)?;
        let format = Self::resolve_format(cli, toml)?;

        Ok(Self {
            request,
            classifier,
            connectivity,
            snapshot: cli.snapshot.clone(),
            format,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_network_type(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<NetworkType, ConfigError> {
        if let Some(network_type) = cli.network_type {
            return Ok(network_type.into());
        }

        let value = toml
            .and_then(|t| t.request.network_type.as_deref())
            .unwrap_or(defaults::NETWORK_TYPE);

        value
            .parse()
            .map_err(|_| ConfigError::InvalidNetworkType {
                value: value.to_string(),
            })
    }

    fn resolve_ip_version(cli: &Cli, toml: Option<&TomlConfig>) -> Result<IpVersion, ConfigError> {
        if let Some(version) = cli.ip_version {
            return Ok(version.into());
        }

        let value = toml
            .and_then(|t| t.request.ip_version.as_deref())
            .unwrap_or(defaults::IP_VERSION);

        value.parse().map_err(|_| ConfigError::InvalidIpVersion {
            value: value.to_string(),
        })
    }

    fn build_classifier(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ClassifierChoice, ConfigError> {
        let section = toml.map(|t| &t.classifier);
        let wifi = section.map_or(&[][..], |s| s.wifi.as_slice());
        let mobile = section.map_or(&[][..], |s| s.mobile.as_slice());
        let has_patterns = !wifi.is_empty() || !mobile.is_empty();

        // Priority: CLI explicit > TOML > pattern lists present > auto
        let style = match cli.classifier {
            Some(arg) => arg,
            None => match section.and_then(|s| s.style.as_deref()) {
                Some(value) => parse_classifier(value)?,
                None if has_patterns => ClassifierArg::Pattern,
                None => parse_classifier(defaults::CLASSIFIER)?,
            },
        };

        match style {
            ClassifierArg::Auto => Ok(ClassifierChoice::platform()),
            ClassifierArg::Substring => Ok(ClassifierChoice::Substring(SubstringClassifier)),
            ClassifierArg::Prefix => Ok(ClassifierChoice::Prefix(PrefixClassifier)),
            ClassifierArg::Pattern if !has_patterns => Err(ConfigError::missing(
                field::CLASSIFIER_PATTERNS,
                "The pattern classifier needs classifier.wifi or classifier.mobile in the config file",
            )),
            ClassifierArg::Pattern => {
                validate_patterns(wifi)?;
                validate_patterns(mobile)?;
                PatternClassifier::new(wifi, mobile)
                    .map(ClassifierChoice::Pattern)
                    .map_err(|e| ConfigError::InvalidRegex {
                        pattern: String::new(),
                        source: e,
                    })
            }
        }
    }

    fn build_connectivity(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Connectivity, ConfigError> {
        let section = toml.map(|t| &t.connectivity);

        // Flags only disable: --skip wins, TOML `check = false` also disables
        let check = !cli.skip_connectivity_check
            && section
                .and_then(|s| s.check)
                .unwrap_or(defaults::CONNECTIVITY_CHECK);

        if !check {
            return Ok(Connectivity::Skip);
        }

        // CLI targets replace TOML targets entirely
        let raw_targets: &[String] = if cli.probe_targets.is_empty() {
            section.map_or(&[][..], |s| s.targets.as_slice())
        } else {
            &cli.probe_targets
        };

        let targets = if raw_targets.is_empty() {
            default_targets()
        } else {
            raw_targets
                .iter()
                .map(String::as_str)
                .map(parse_probe_target)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Connectivity::Probe(RouteProbe::new(targets)))
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        if let Some(format) = cli.format {
            return Ok(format.into());
        }

        let value = toml
            .and_then(|t| t.output.format.as_deref())
            .unwrap_or(defaults::FORMAT);

        match value.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(ConfigError::InvalidFormat {
                value: value.to_string(),
            }),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_classifier(s: &str) -> Result<ClassifierArg, ConfigError> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(ClassifierArg::Auto),
        "substring" | "android" => Ok(ClassifierArg::Substring),
        "prefix" | "apple" | "ios" => Ok(ClassifierArg::Prefix),
        "pattern" | "regex" => Ok(ClassifierArg::Pattern),
        _ => Err(ConfigError::InvalidClassifier {
            value: s.to_string(),
        }),
    }
}

/// Compiles each pattern on its own so the error names the culprit.
fn validate_patterns(patterns: &[String]) -> Result<(), ConfigError> {
    for pattern in patterns {
        regex::Regex::new(pattern).map_err(|e| ConfigError::InvalidRegex {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

fn parse_probe_target(s: &str) -> Result<SocketAddr, ConfigError> {
    s.trim()
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidProbeTarget {
            value: s.to_string(),
            reason: e.to_string(),
        })
}
