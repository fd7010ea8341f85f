//! Core network types for interface representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a textual enum value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct ParseEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// IP version(s) requested from the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    /// IPv4 addresses only.
    #[serde(rename = "ipv4")]
    V4,
    /// IPv6 addresses only.
    #[serde(rename = "ipv6")]
    V6,
    /// Both IPv4 and IPv6 addresses.
    #[default]
    Both,
}

impl IpVersion {
    /// Returns true if this version includes IPv4.
    #[must_use]
    pub const fn includes_v4(self) -> bool {
        matches!(self, Self::V4 | Self::Both)
    }

    /// Returns true if this version includes IPv6.
    #[must_use]
    pub const fn includes_v6(self) -> bool {
        matches!(self, Self::V6 | Self::Both)
    }

    /// Returns true once every requested family has been captured.
    #[must_use]
    pub const fn is_satisfied(self, has_v4: bool, has_v6: bool) -> bool {
        match self {
            Self::V4 => has_v4,
            Self::V6 => has_v6,
            Self::Both => has_v4 && has_v6,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "ipv4"),
            Self::V6 => write!(f, "ipv6"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl FromStr for IpVersion {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ipv4" | "v4" | "4" => Ok(Self::V4),
            "ipv6" | "v6" | "6" => Ok(Self::V6),
            "both" | "all" | "dual" => Ok(Self::Both),
            _ => Err(ParseEnumError {
                kind: "ip version",
                value: s.to_string(),
            }),
        }
    }
}

/// Network type an interface must belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Any non-loopback interface.
    #[default]
    Any,
    /// Wireless LAN interfaces.
    Wifi,
    /// Cellular data interfaces.
    Mobile,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Wifi => write!(f, "wifi"),
            Self::Mobile => write!(f, "mobile"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "wifi" | "wi-fi" | "wlan" => Ok(Self::Wifi),
            "mobile" | "cellular" => Ok(Self::Mobile),
            _ => Err(ParseEnumError {
                kind: "network type",
                value: s.to_string(),
            }),
        }
    }
}

/// Address family of an [`InterfaceAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

/// A single address bound to an interface.
///
/// The textual form is `addr` or `addr%zone`, and is also how the
/// address (de)serializes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterfaceAddress {
    /// The IP address itself.
    pub ip: IpAddr,
    /// Zone identifier (`%zone` suffix), usually only on IPv6 link-local.
    pub zone: Option<String>,
}

impl InterfaceAddress {
    /// Creates an address without a zone identifier.
    #[must_use]
    pub const fn new(ip: IpAddr) -> Self {
        Self { ip, zone: None }
    }

    /// Creates an address carrying a zone identifier.
    #[must_use]
    pub fn with_zone(ip: IpAddr, zone: impl Into<String>) -> Self {
        Self {
            ip,
            zone: Some(zone.into()),
        }
    }

    /// Returns the address family.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        match self.ip {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    /// Returns the textual form as the OS reports it, zone included.
    #[must_use]
    pub fn host_address(&self) -> String {
        match &self.zone {
            Some(zone) => format!("{}%{zone}", self.ip),
            None => self.ip.to_string(),
        }
    }

    /// Returns true for `127.0.0.0/8` and `::1`.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        self.ip.is_loopback()
    }

    /// Returns true for `169.254.0.0/16` and `fe80::/10`.
    #[must_use]
    pub const fn is_link_local(&self) -> bool {
        match self.ip {
            IpAddr::V4(v4) => v4.is_link_local(),
            IpAddr::V6(v6) => v6.is_unicast_link_local(),
        }
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host_address())
    }
}

impl From<IpAddr> for InterfaceAddress {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

impl From<Ipv4Addr> for InterfaceAddress {
    fn from(ip: Ipv4Addr) -> Self {
        Self::new(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for InterfaceAddress {
    fn from(ip: Ipv6Addr) -> Self {
        Self::new(IpAddr::V6(ip))
    }
}

/// Error returned when an `addr[%zone]` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interface address '{0}'")]
pub struct ParseAddressError(pub String);

impl FromStr for InterfaceAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, zone) = match s.split_once('%') {
            Some((addr, zone)) if !zone.is_empty() => (addr, Some(zone.to_string())),
            Some(_) => return Err(ParseAddressError(s.to_string())),
            None => (s, None),
        };

        let ip = addr
            .parse::<IpAddr>()
            .map_err(|_| ParseAddressError(s.to_string()))?;

        Ok(Self { ip, zone })
    }
}

impl TryFrom<String> for InterfaceAddress {
    type Error = ParseAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InterfaceAddress> for String {
    fn from(addr: InterfaceAddress) -> Self {
        addr.host_address()
    }
}

/// Strips a `%zone` suffix from a textual address.
#[must_use]
pub fn strip_zone(host_address: &str) -> &str {
    host_address
        .split_once('%')
        .map_or(host_address, |(addr, _)| addr)
}

/// A snapshot of a single network interface at the time of the query.
///
/// Address order matters: it is the order the OS reported them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSnapshot {
    /// The OS interface name (e.g., "wlan0", "pdp_ip0").
    pub name: String,
    /// Whether the interface is administratively and operationally up.
    #[serde(default = "default_up")]
    pub is_up: bool,
    /// Whether this is a loopback interface.
    #[serde(default)]
    pub is_loopback: bool,
    /// Addresses bound to the interface, in OS order.
    #[serde(default)]
    pub addresses: Vec<InterfaceAddress>,
}

const fn default_up() -> bool {
    true
}

impl InterfaceSnapshot {
    /// Creates an up, non-loopback interface snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<InterfaceAddress>) -> Self {
        Self {
            name: name.into(),
            is_up: true,
            is_loopback: false,
            addresses,
        }
    }

    /// Marks the interface as down.
    #[must_use]
    pub const fn down(mut self) -> Self {
        self.is_up = false;
        self
    }

    /// Marks the interface as loopback.
    #[must_use]
    pub const fn loopback(mut self) -> Self {
        self.is_loopback = true;
        self
    }

    /// Returns true if the interface may supply addresses at all.
    #[must_use]
    pub const fn is_candidate(&self) -> bool {
        self.is_up && !self.is_loopback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ip_version {
        use super::*;

        #[test]
        fn v4_includes_only_v4() {
            assert!(IpVersion::V4.includes_v4());
            assert!(!IpVersion::V4.includes_v6());
        }

        #[test]
        fn v6_includes_only_v6() {
            assert!(!IpVersion::V6.includes_v4());
            assert!(IpVersion::V6.includes_v6());
        }

        #[test]
        fn both_includes_both() {
            assert!(IpVersion::Both.includes_v4());
            assert!(IpVersion::Both.includes_v6());
        }

        #[test]
        fn satisfied_depends_on_requested_families() {
            assert!(IpVersion::V4.is_satisfied(true, false));
            assert!(!IpVersion::V4.is_satisfied(false, true));
            assert!(IpVersion::V6.is_satisfied(false, true));
            assert!(!IpVersion::Both.is_satisfied(true, false));
            assert!(IpVersion::Both.is_satisfied(true, true));
        }

        #[test]
        fn parses_channel_values_and_aliases() {
            assert_eq!("ipv4".parse::<IpVersion>(), Ok(IpVersion::V4));
            assert_eq!("IPv6".parse::<IpVersion>(), Ok(IpVersion::V6));
            assert_eq!("both".parse::<IpVersion>(), Ok(IpVersion::Both));
            assert_eq!("dual".parse::<IpVersion>(), Ok(IpVersion::Both));
            assert!("ipv5".parse::<IpVersion>().is_err());
        }

        #[test]
        fn default_is_both() {
            assert_eq!(IpVersion::default(), IpVersion::Both);
        }

        #[test]
        fn display_matches_channel_values() {
            assert_eq!(IpVersion::V4.to_string(), "ipv4");
            assert_eq!(IpVersion::V6.to_string(), "ipv6");
            assert_eq!(IpVersion::Both.to_string(), "both");
        }
    }

    mod network_type {
        use super::*;

        #[test]
        fn parses_channel_values() {
            assert_eq!("any".parse::<NetworkType>(), Ok(NetworkType::Any));
            assert_eq!("wifi".parse::<NetworkType>(), Ok(NetworkType::Wifi));
            assert_eq!("mobile".parse::<NetworkType>(), Ok(NetworkType::Mobile));
        }

        #[test]
        fn rejects_unknown_value() {
            let err = "ethernet".parse::<NetworkType>().unwrap_err();
            assert_eq!(err.value, "ethernet");
            assert!(err.to_string().contains("network type"));
        }

        #[test]
        fn default_is_any() {
            assert_eq!(NetworkType::default(), NetworkType::Any);
        }
    }

    mod interface_address {
        use super::*;

        #[test]
        fn parses_plain_address() {
            let addr: InterfaceAddress = "192.168.1.10".parse().unwrap();
            assert_eq!(addr.family(), AddressFamily::V4);
            assert_eq!(addr.zone, None);
        }

        #[test]
        fn parses_zone_suffix() {
            let addr: InterfaceAddress = "fe80::1%wlan0".parse().unwrap();
            assert_eq!(addr.family(), AddressFamily::V6);
            assert_eq!(addr.zone.as_deref(), Some("wlan0"));
            assert_eq!(addr.host_address(), "fe80::1%wlan0");
        }

        #[test]
        fn rejects_empty_zone_and_garbage() {
            assert!("fe80::1%".parse::<InterfaceAddress>().is_err());
            assert!("not-an-ip".parse::<InterfaceAddress>().is_err());
        }

        #[test]
        fn loopback_detection() {
            let v4: InterfaceAddress = "127.0.0.5".parse().unwrap();
            let v6: InterfaceAddress = "::1".parse().unwrap();
            let global: InterfaceAddress = "10.0.0.1".parse().unwrap();
            assert!(v4.is_loopback());
            assert!(v6.is_loopback());
            assert!(!global.is_loopback());
        }

        #[test]
        fn link_local_detection() {
            let v4: InterfaceAddress = "169.254.3.4".parse().unwrap();
            let v6: InterfaceAddress = "fe80::abcd".parse().unwrap();
            let v6_upper: InterfaceAddress = "febf::1".parse().unwrap();
            let global: InterfaceAddress = "2001:db8::1".parse().unwrap();
            assert!(v4.is_link_local());
            assert!(v6.is_link_local());
            assert!(v6_upper.is_link_local());
            assert!(!global.is_link_local());
        }

        #[test]
        fn serde_uses_textual_form() {
            let addr: InterfaceAddress = "2001:db8::1%en0".parse().unwrap();
            let json = serde_json::to_string(&addr).unwrap();
            assert_eq!(json, r#""2001:db8::1%en0""#);

            let back: InterfaceAddress = serde_json::from_str(&json).unwrap();
            assert_eq!(back, addr);
        }
    }

    #[test]
    fn strip_zone_removes_suffix() {
        assert_eq!(strip_zone("2001:db8::1%en0"), "2001:db8::1");
        assert_eq!(strip_zone("10.0.0.1"), "10.0.0.1");
    }

    mod interface_snapshot {
        use super::*;

        #[test]
        fn new_is_up_and_not_loopback() {
            let snapshot = InterfaceSnapshot::new("wlan0", vec![]);
            assert!(snapshot.is_up);
            assert!(!snapshot.is_loopback);
            assert!(snapshot.is_candidate());
        }

        #[test]
        fn down_and_loopback_are_not_candidates() {
            assert!(!InterfaceSnapshot::new("wlan0", vec![]).down().is_candidate());
            assert!(!InterfaceSnapshot::new("lo", vec![]).loopback().is_candidate());
        }

        #[test]
        fn deserializes_with_defaults() {
            let json = r#"{"name": "rmnet0", "addresses": ["10.1.2.3"]}"#;
            let snapshot: InterfaceSnapshot = serde_json::from_str(json).unwrap();

            assert_eq!(snapshot.name, "rmnet0");
            assert!(snapshot.is_up);
            assert!(!snapshot.is_loopback);
            assert_eq!(snapshot.addresses.len(), 1);
        }
    }
}
