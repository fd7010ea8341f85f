//! Platform interface enumeration.
//!
//! # Platform Support
//!
//! - **Android / Linux / iOS / macOS / BSD**: `getifaddrs(3)` via `if-addrs`
//! - **Windows**: `GetAdaptersAddresses` via `if-addrs`

mod ifaddrs;

pub use ifaddrs::IfAddrsFetcher;

/// The fetcher used by default on every supported platform.
pub type PlatformFetcher = IfAddrsFetcher;
