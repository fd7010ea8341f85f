//! Method-call dispatch for host bridges.
//!
//! A host bridge (mobile plugin channel, IPC, CLI) forwards a named method
//! call with loosely typed arguments. [`MethodChannel`] validates the
//! arguments, runs the resolver and answers with either a result record or
//! "not implemented". Transport and lifecycle are the host's concern.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::network::{IpVersion, NetworkType};
use crate::resolver::{IpResolver, ResolveError, ResolveRequest, ResolveResult};

/// Name of the only supported method.
pub const GET_IP_ADDRESS: &str = "getIpAddress";

/// Argument key selecting the network type.
pub const ARG_NETWORK_TYPE: &str = "networkType";

/// Argument key selecting the IP version.
pub const ARG_IP_VERSION: &str = "ipVersion";

/// A method invocation as received from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, e.g. `getIpAddress`.
    pub method: String,
    /// Method arguments; `null` when the host sent none.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    /// Creates a call with the given arguments.
    #[must_use]
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Creates a call without arguments.
    #[must_use]
    pub fn without_arguments(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

/// The channel's answer to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodResponse {
    /// The method ran; the record may still carry an error.
    Success(ResolveResult),
    /// The method is unknown to this channel.
    NotImplemented {
        /// The method name that was called.
        method: String,
    },
}

impl MethodResponse {
    /// Returns the result record of a successful call.
    #[must_use]
    pub const fn result(&self) -> Option<&ResolveResult> {
        match self {
            Self::Success(result) => Some(result),
            Self::NotImplemented { .. } => None,
        }
    }

    /// Returns true if the method was not recognized.
    #[must_use]
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}

/// Dispatches method calls to an [`IpResolver`].
///
/// # Example
///
/// ```
/// use device_ip::channel::{MethodCall, MethodChannel, MethodResponse};
/// use device_ip::network::classifier::SubstringClassifier;
/// use device_ip::network::{StaticFetcher, StaticProbe};
/// use device_ip::resolver::AddressResolver;
///
/// let resolver = AddressResolver::new(StaticFetcher::default(), StaticProbe::OFFLINE, SubstringClassifier);
/// let channel = MethodChannel::new(resolver);
///
/// let response = channel.handle(&MethodCall::without_arguments("getIpAddress"));
/// let record = response.result().unwrap();
/// assert_eq!(record.error(), Some("No internet connection"));
///
/// let response = channel.handle(&MethodCall::without_arguments("getBatteryLevel"));
/// assert!(response.is_not_implemented());
/// ```
#[derive(Debug)]
pub struct MethodChannel<R> {
    resolver: R,
}

impl<R> MethodChannel<R> {
    /// Creates a channel dispatching to `resolver`.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Returns a reference to the resolver.
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: IpResolver> MethodChannel<R> {
    /// Handles a single call. Never fails: errors land in the record.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            GET_IP_ADDRESS => MethodResponse::Success(self.get_ip_address(&call.arguments)),
            other => {
                tracing::debug!("Method not implemented: {other}");
                MethodResponse::NotImplemented {
                    method: other.to_string(),
                }
            }
        }
    }

    fn get_ip_address(&self, arguments: &Value) -> ResolveResult {
        match parse_request(arguments) {
            Ok(request) => self.resolver.resolve(&request),
            Err(e) => {
                tracing::warn!("Rejected {GET_IP_ADDRESS} arguments: {arguments}");
                ResolveResult::failed(&e)
            }
        }
    }
}

/// Builds a [`ResolveRequest`] from `getIpAddress` arguments.
///
/// `null` arguments and absent or `null` keys fall back to `any` / `both`.
/// Unknown keys are ignored.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidArguments`] when the arguments are not an
/// object, or a value is not a string or not a recognized name.
pub fn parse_request(arguments: &Value) -> Result<ResolveRequest, ResolveError> {
    let map = match arguments {
        Value::Null => return Ok(ResolveRequest::default()),
        Value::Object(map) => map,
        _ => return Err(ResolveError::InvalidArguments),
    };

    let network_type = optional_arg::<NetworkType>(map.get(ARG_NETWORK_TYPE))?;
    let ip_version = optional_arg::<IpVersion>(map.get(ARG_IP_VERSION))?;

    Ok(ResolveRequest::new(
        network_type.unwrap_or_default(),
        ip_version.unwrap_or_default(),
    ))
}

fn optional_arg<T: std::str::FromStr>(value: Option<&Value>) -> Result<Option<T>, ResolveError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| ResolveError::InvalidArguments),
        Some(_) => Err(ResolveError::InvalidArguments),
    }
}
