//! Local address resolution.
//!
//! [`AddressResolver`] answers "what is this device's IP address on network
//! X?" with at most one IPv4 and one IPv6 address, chosen strictly in the
//! order the OS enumerates interfaces and addresses.
//!
//! # Outcomes
//!
//! - addresses found: `{ipv4, ipv6, error: null}`, either address may be null
//! - no connectivity: `{null, null, "No internet connection"}`
//! - enumeration failed: `{null, null, "Failed to retrieve IP address: ..."}`
//!
//! "Nothing qualified" and "no connectivity" stay distinguishable: the first
//! is a successful result with null addresses.

mod result;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use result::{ResolveError, ResolveResult, ResolvedAddresses};

use serde::{Deserialize, Serialize};

use crate::network::{
    AddressFamily, ConnectivityProbe, InterfaceClassifier, InterfaceFetcher, InterfaceSnapshot,
    IpVersion, NetworkType, strip_zone,
};

/// What the caller asked for.
///
/// Defaults to [`NetworkType::Any`] and [`IpVersion::Both`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Interface type the address must come from.
    pub network_type: NetworkType,
    /// Address families to return.
    pub ip_version: IpVersion,
}

impl ResolveRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(network_type: NetworkType, ip_version: IpVersion) -> Self {
        Self {
            network_type,
            ip_version,
        }
    }
}

/// Anything that can answer a [`ResolveRequest`].
///
/// The method channel depends on this seam rather than on the concrete
/// resolver so it can be exercised with canned results.
pub trait IpResolver: Send + Sync {
    /// Resolves the request into a result record. Never fails.
    fn resolve(&self, request: &ResolveRequest) -> ResolveResult;
}

/// Resolves local addresses from an interface fetcher, a connectivity probe
/// and an interface classifier.
///
/// # Type Parameters
///
/// - `F`: the interface source (implements [`InterfaceFetcher`])
/// - `P`: the connectivity source (implements [`ConnectivityProbe`])
/// - `C`: the name heuristic (implements [`InterfaceClassifier`])
///
/// # Examples
///
/// ```
/// use device_ip::network::classifier::SubstringClassifier;
/// use device_ip::network::{InterfaceSnapshot, NetworkType, IpVersion, StaticFetcher, StaticProbe};
/// use device_ip::resolver::{AddressResolver, ResolveRequest};
///
/// let fetcher = StaticFetcher::new(vec![InterfaceSnapshot::new(
///     "wlan0",
///     vec!["192.168.1.20".parse().unwrap(), "2001:db8::20".parse().unwrap()],
/// )]);
/// let resolver = AddressResolver::new(fetcher, StaticProbe::ONLINE, SubstringClassifier);
///
/// let result = resolver.resolve(&ResolveRequest::new(NetworkType::Wifi, IpVersion::V4));
/// assert_eq!(result.ipv4(), Some("192.168.1.20"));
/// assert_eq!(result.ipv6(), None);
/// assert_eq!(result.error(), None);
/// ```
#[derive(Debug)]
pub struct AddressResolver<F, P, C> {
    fetcher: F,
    probe: P,
    classifier: C,
}

impl<F, P, C> AddressResolver<F, P, C> {
    /// Creates a resolver from its three collaborators.
    #[must_use]
    pub const fn new(fetcher: F, probe: P, classifier: C) -> Self {
        Self {
            fetcher,
            probe,
            classifier,
        }
    }

    /// Returns a reference to the fetcher.
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns a reference to the connectivity probe.
    pub const fn probe(&self) -> &P {
        &self.probe
    }

    /// Returns a reference to the classifier.
    pub const fn classifier(&self) -> &C {
        &self.classifier
    }
}

impl<F, P, C> AddressResolver<F, P, C>
where
    F: InterfaceFetcher,
    P: ConnectivityProbe,
    C: InterfaceClassifier,
{
    /// Resolves the request, converting every failure into the result record.
    #[must_use]
    pub fn resolve(&self, request: &ResolveRequest) -> ResolveResult {
        let result = ResolveResult::from(self.try_resolve(request));
        tracing::info!(
            network_type = %request.network_type,
            ip_version = %request.ip_version,
            "Resolved {result}"
        );
        result
    }

    /// Resolves the request, returning the typed error on failure.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NoConnectivity`] when the probe reports no route
    /// - [`ResolveError::Enumeration`] when the fetcher fails
    pub fn try_resolve(&self, request: &ResolveRequest) -> Result<ResolvedAddresses, ResolveError> {
        if !self.probe.is_connected() {
            tracing::warn!("No internet connection, skipping interface enumeration");
            return Err(ResolveError::NoConnectivity);
        }

        let interfaces = self.fetcher.fetch().map_err(|e| {
            tracing::warn!("Interface enumeration failed: {e}");
            ResolveError::Enumeration(e)
        })?;

        Ok(select_addresses(&interfaces, request, &self.classifier))
    }
}

impl<F, P, C> IpResolver for AddressResolver<F, P, C>
where
    F: InterfaceFetcher,
    P: ConnectivityProbe,
    C: InterfaceClassifier,
{
    fn resolve(&self, request: &ResolveRequest) -> ResolveResult {
        Self::resolve(self, request)
    }
}

/// Picks the first qualifying IPv4 and IPv6 address in enumeration order.
///
/// Interfaces that are down, loopback, or not of the requested network type
/// are skipped, as are loopback and link-local addresses. Zone identifiers
/// are stripped. Scanning stops as soon as every requested family is filled.
#[must_use]
pub fn select_addresses(
    interfaces: &[InterfaceSnapshot],
    request: &ResolveRequest,
    classifier: &impl InterfaceClassifier,
) -> ResolvedAddresses {
    let version = request.ip_version;
    let mut selected = ResolvedAddresses::default();

    for interface in interfaces {
        if !interface.is_candidate() {
            tracing::debug!(
                "Skipping {} (up: {}, loopback: {})",
                interface.name,
                interface.is_up,
                interface.is_loopback
            );
            continue;
        }

        if !classifier.matches(request.network_type, &interface.name) {
            tracing::debug!("Skipping {}: not {}", interface.name, request.network_type);
            continue;
        }

        for address in &interface.addresses {
            if address.is_loopback() || address.is_link_local() {
                continue;
            }

            let slot = match address.family() {
                AddressFamily::V4 if version.includes_v4() => &mut selected.ipv4,
                AddressFamily::V6 if version.includes_v6() => &mut selected.ipv6,
                _ => continue,
            };

            if slot.is_none() {
                let host_address = address.host_address();
                tracing::debug!("Selected {host_address} from {}", interface.name);
                *slot = Some(strip_zone(&host_address).to_string());
            }

            if version.is_satisfied(selected.ipv4.is_some(), selected.ipv6.is_some()) {
                return selected;
            }
        }
    }

    selected
}
