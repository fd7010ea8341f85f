//! Result record and error taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::FetchError;

/// Why a resolve call produced no addresses.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The device has no internet-capable route.
    #[error("No internet connection")]
    NoConnectivity,

    /// The OS interface listing failed.
    #[error("Failed to retrieve IP address: {0}")]
    Enumeration(#[source] FetchError),

    /// The invocation arguments were malformed.
    #[error("Invalid arguments")]
    InvalidArguments,
}

/// Addresses picked by a successful resolve; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddresses {
    /// First qualifying IPv4 address, zone stripped.
    pub ipv4: Option<String>,
    /// First qualifying IPv6 address, zone stripped.
    pub ipv6: Option<String>,
}

impl ResolvedAddresses {
    /// Returns true if neither family produced an address.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }
}

/// The record handed back to callers: `{ipv4, ipv6, error}`.
///
/// Construction goes through [`ResolveResult::found`] or
/// [`ResolveResult::failed`], so an error never carries addresses.
/// All three keys are always serialized, `null` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResult {
    ipv4: Option<String>,
    ipv6: Option<String>,
    error: Option<String>,
}

impl ResolveResult {
    /// A successful result. Both addresses may be `None`.
    #[must_use]
    pub const fn found(ipv4: Option<String>, ipv6: Option<String>) -> Self {
        Self {
            ipv4,
            ipv6,
            error: None,
        }
    }

    /// A failed result with both addresses absent.
    #[must_use]
    pub fn failed(error: &ResolveError) -> Self {
        Self {
            ipv4: None,
            ipv6: None,
            error: Some(error.to_string()),
        }
    }

    /// The selected IPv4 address.
    #[must_use]
    pub fn ipv4(&self) -> Option<&str> {
        self.ipv4.as_deref()
    }

    /// The selected IPv6 address.
    #[must_use]
    pub fn ipv6(&self) -> Option<&str> {
        self.ipv6.as_deref()
    }

    /// The error description, if the call failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns true if the call failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<ResolvedAddresses> for ResolveResult {
    fn from(addresses: ResolvedAddresses) -> Self {
        Self::found(addresses.ipv4, addresses.ipv6)
    }
}

impl From<ResolveError> for ResolveResult {
    fn from(error: ResolveError) -> Self {
        Self::failed(&error)
    }
}

impl From<Result<ResolvedAddresses, ResolveError>> for ResolveResult {
    fn from(result: Result<ResolvedAddresses, ResolveError>) -> Self {
        result.map_or_else(Self::from, Self::from)
    }
}

impl fmt::Display for ResolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "error: {error}");
        }

        write!(
            f,
            "ipv4: {}, ipv6: {}",
            self.ipv4.as_deref().unwrap_or("none"),
            self.ipv6.as_deref().unwrap_or("none")
        )
    }
}
