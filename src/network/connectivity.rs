//! Connectivity probing.
//!
//! The resolver refuses to enumerate interfaces when the device has no
//! internet-capable route. How that is decided is platform business, so the
//! resolver only sees the boolean answer of a [`ConnectivityProbe`].

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

/// Answers whether the device currently has an internet-capable route.
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `true` if at least one route to the internet exists.
    fn is_connected(&self) -> bool;
}

impl<T: ConnectivityProbe + ?Sized> ConnectivityProbe for &T {
    fn is_connected(&self) -> bool {
        (*self).is_connected()
    }
}

impl<T: ConnectivityProbe + ?Sized> ConnectivityProbe for Box<T> {
    fn is_connected(&self) -> bool {
        self.as_ref().is_connected()
    }
}

/// A probe with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticProbe(pub bool);

impl StaticProbe {
    /// A probe that always reports connectivity.
    pub const ONLINE: Self = Self(true);
    /// A probe that never reports connectivity.
    pub const OFFLINE: Self = Self(false);
}

impl ConnectivityProbe for StaticProbe {
    fn is_connected(&self) -> bool {
        self.0
    }
}

/// Probes the routing table by connecting unbound UDP sockets.
///
/// `connect` on a UDP socket only selects a route and a source address; no
/// datagram leaves the host. A target counts as reachable when the kernel
/// picks a concrete (non-unspecified) source address for it.
///
/// # Example
///
/// ```no_run
/// use device_ip::network::{ConnectivityProbe, RouteProbe};
///
/// let probe = RouteProbe::default();
/// println!("online: {}", probe.is_connected());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProbe {
    targets: Vec<SocketAddr>,
}

impl RouteProbe {
    /// Creates a probe trying `targets` in order.
    #[must_use]
    pub const fn new(targets: Vec<SocketAddr>) -> Self {
        Self { targets }
    }

    /// Returns the configured targets.
    #[must_use]
    pub fn targets(&self) -> &[SocketAddr] {
        &self.targets
    }
}

impl Default for RouteProbe {
    fn default() -> Self {
        Self::new(default_targets())
    }
}

/// Public DNS resolvers used as route targets when none are configured.
#[must_use]
pub fn default_targets() -> Vec<SocketAddr> {
    vec![
        SocketAddr::from((Ipv4Addr::new(8, 8, 8, 8), 53)),
        SocketAddr::from((Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888), 53)),
    ]
}

impl ConnectivityProbe for RouteProbe {
    fn is_connected(&self) -> bool {
        self.targets.iter().any(|target| match route_source(*target) {
            Ok(source) => {
                tracing::debug!("Route to {target} via {source}");
                !source.ip().is_unspecified()
            }
            Err(e) => {
                tracing::debug!("No route to {target}: {e}");
                false
            }
        })
    }
}

/// Returns the local address the kernel would use to reach `target`.
fn route_source(target: SocketAddr) -> std::io::Result<SocketAddr> {
    let bind: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(bind)?;
    socket.connect(target)?;
    socket.local_addr()
}
