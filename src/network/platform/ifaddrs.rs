//! Interface enumeration on top of the `if-addrs` crate.
//!
//! `if_addrs::get_if_addrs` reports one entry per bound address (the
//! `getifaddrs(3)` model on Unix, `GetAdaptersAddresses` on Windows). Entries
//! are folded back into one [`InterfaceSnapshot`] per interface name, keeping
//! the order in which names and addresses first appear.

use std::net::IpAddr;

use crate::network::{FetchError, InterfaceAddress, InterfaceFetcher, InterfaceSnapshot};

/// [`InterfaceFetcher`] backed by the OS interface table.
///
/// # Example
///
/// ```no_run
/// use device_ip::network::{InterfaceFetcher, platform::IfAddrsFetcher};
///
/// let fetcher = IfAddrsFetcher::new();
/// for interface in fetcher.fetch().expect("enumeration failed") {
///     println!("{}: {:?}", interface.name, interface.addresses);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IfAddrsFetcher {
    _private: (),
}

impl IfAddrsFetcher {
    /// Creates a new fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceFetcher for IfAddrsFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let entries = if_addrs::get_if_addrs()?;
        tracing::trace!("OS reported {} address entries", entries.len());

        Ok(group_entries(entries.into_iter().map(|iface| {
            let up = iface.is_oper_up();
            AddressEntry {
                ip: iface.ip(),
                name: iface.name,
                up,
            }
        })))
    }
}

/// One per-address record as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AddressEntry {
    name: String,
    ip: IpAddr,
    up: bool,
}

/// Folds per-address entries into per-interface snapshots.
///
/// - an interface is up when any of its entries is up
/// - an interface is loopback when all of its addresses are loopback
/// - IPv6 link-local addresses get the interface name as zone
fn group_entries(entries: impl IntoIterator<Item = AddressEntry>) -> Vec<InterfaceSnapshot> {
    let mut interfaces: Vec<InterfaceSnapshot> = Vec::new();

    for entry in entries {
        let address = match entry.ip {
            IpAddr::V6(v6) if v6.is_unicast_link_local() => {
                InterfaceAddress::with_zone(entry.ip, entry.name.as_str())
            }
            ip => InterfaceAddress::new(ip),
        };

        if let Some(existing) = interfaces.iter_mut().find(|i| i.name == entry.name) {
            existing.is_up |= entry.up;
            existing.is_loopback &= address.is_loopback();
            existing.addresses.push(address);
        } else {
            interfaces.push(InterfaceSnapshot {
                is_up: entry.up,
                is_loopback: address.is_loopback(),
                addresses: vec![address],
                name: entry.name,
            });
        }
    }

    interfaces
}
