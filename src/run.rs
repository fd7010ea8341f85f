//! Application execution logic.
//!
//! This module wires the validated configuration into a resolver and
//! runs a single command against it: resolve, dispatch a method call or
//! list interfaces.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use device_ip::channel::{MethodCall, MethodChannel, MethodResponse};
use device_ip::config::{Command, OutputFormat, ValidatedConfig};
use device_ip::network::platform::PlatformFetcher;
use device_ip::network::{
    FetchError, InterfaceAddress, InterfaceClassifier, InterfaceFetcher, InterfaceSnapshot,
    StaticFetcher,
};
use device_ip::resolver::{AddressResolver, ResolveResult};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read the snapshot file.
    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot file is not a JSON interface list.
    #[error("Failed to parse snapshot {path}: {source}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Interface enumeration failed outside of a resolve.
    #[error("Failed to enumerate interfaces: {0}")]
    Fetch(#[source] FetchError),

    /// `--args` is not valid JSON.
    #[error("Invalid call arguments: {0}")]
    CallArgs(#[source] serde_json::Error),

    /// The method is unknown to the channel.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// The result record carried an error.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Failed to serialize output.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Failed to write output.
    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),
}

type AppFetcher = Box<dyn InterfaceFetcher>;

/// Executes one command and prints its output to stdout.
///
/// `None` behaves like `get`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded, the result carries an
/// error, the method is unknown or output cannot be written.
pub fn execute(config: ValidatedConfig, command: Option<&Command>) -> Result<(), RunError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_to(config, command, &mut out)
}

/// Executes one command, writing its output to `out`.
fn execute_to<W: Write>(
    config: ValidatedConfig,
    command: Option<&Command>,
    out: &mut W,
) -> Result<(), RunError> {
    let fetcher = create_fetcher(config.snapshot.as_deref())?;
    let format = config.format;
    let request = config.request;
    let resolver = AddressResolver::new(fetcher, config.connectivity, config.classifier);

    match command {
        None | Some(Command::Get) => {
            let result = resolver.resolve(&request);
            write_result(out, &result, format)
        }
        Some(Command::Call { method, args }) => {
            let arguments = parse_call_args(args.as_deref())?;
            let call = MethodCall::new(method.as_str(), arguments);
            let channel = MethodChannel::new(resolver);

            match channel.handle(&call) {
                MethodResponse::Success(result) => write_result(out, &result, format),
                MethodResponse::NotImplemented { method } => Err(RunError::NotImplemented(method)),
            }
        }
        Some(Command::Interfaces) => {
            let interfaces = resolver.fetcher().fetch().map_err(RunError::Fetch)?;
            let rendered = render_interfaces(&interfaces, resolver.classifier(), format)?;
            writeln!(out, "{rendered}")?;
            Ok(())
        }
        Some(Command::Init { .. }) => {
            tracing::debug!("init is handled before configuration is loaded");
            Ok(())
        }
    }
}

/// Builds the fetcher: the snapshot file when given, the OS otherwise.
fn create_fetcher(snapshot: Option<&Path>) -> Result<AppFetcher, RunError> {
    let Some(path) = snapshot else {
        return Ok(Box::new(PlatformFetcher::new()));
    };

    let json = std::fs::read_to_string(path).map_err(|e| RunError::SnapshotRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let fetcher = StaticFetcher::from_json(&json).map_err(|e| RunError::SnapshotParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        "Loaded {} interface(s) from {}",
        fetcher.interfaces().len(),
        path.display()
    );
    Ok(Box::new(fetcher))
}

/// Parses `--args`; absent means `null`.
fn parse_call_args(args: Option<&str>) -> Result<Value, RunError> {
    args.map_or(Ok(Value::Null), |s| {
        serde_json::from_str(s).map_err(RunError::CallArgs)
    })
}

fn write_result<W: Write>(
    out: &mut W,
    result: &ResolveResult,
    format: OutputFormat,
) -> Result<(), RunError> {
    writeln!(out, "{}", render_result(result, format)?)?;

    match result.error() {
        Some(error) => Err(RunError::Lookup(error.to_string())),
        None => Ok(()),
    }
}

fn render_result(result: &ResolveResult, format: OutputFormat) -> Result<String, RunError> {
    match format {
        OutputFormat::Json => serde_json::to_string(result).map_err(RunError::Serialize),
        OutputFormat::Text => Ok(result.to_string()),
    }
}

/// One line of the `interfaces` listing.
#[derive(Debug, Serialize)]
struct InterfaceReport<'a> {
    name: &'a str,
    kind: &'static str,
    is_up: bool,
    is_loopback: bool,
    addresses: &'a [InterfaceAddress],
}

impl<'a> InterfaceReport<'a> {
    fn new(interface: &'a InterfaceSnapshot, classifier: &impl InterfaceClassifier) -> Self {
        let kind = if classifier.is_wifi(&interface.name) {
            "wifi"
        } else if classifier.is_mobile(&interface.name) {
            "mobile"
        } else {
            "other"
        };

        Self {
            name: &interface.name,
            kind,
            is_up: interface.is_up,
            is_loopback: interface.is_loopback,
            addresses: &interface.addresses,
        }
    }
}

fn render_interfaces(
    interfaces: &[InterfaceSnapshot],
    classifier: &impl InterfaceClassifier,
    format: OutputFormat,
) -> Result<String, RunError> {
    let reports: Vec<_> = interfaces
        .iter()
        .map(|iface| InterfaceReport::new(iface, classifier))
        .collect();

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports).map_err(RunError::Serialize),
        OutputFormat::Text => Ok(reports
            .iter()
            .map(|r| {
                let state = match (r.is_up, r.is_loopback) {
                    (_, true) => "loopback",
                    (true, false) => "up",
                    (false, false) => "down",
                };
                let addresses: Vec<_> = r.addresses.iter().map(ToString::to_string).collect();
                format!("{} [{}] {}: {}", r.name, r.kind, state, addresses.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
