//! Network layer: interface snapshots and the collaborators behind them.
//!
//! This module provides types and traits for:
//! - Representing interface snapshots ([`InterfaceSnapshot`], [`InterfaceAddress`])
//! - Request filters ([`IpVersion`], [`NetworkType`])
//! - Enumerating interfaces ([`InterfaceFetcher`])
//! - Classifying interface names ([`classifier`])
//! - Probing connectivity ([`ConnectivityProbe`])
//! - Platform-specific implementations ([`platform`])

pub mod classifier;
mod connectivity;
mod fetcher;
mod interface;
pub mod platform;


pub use classifier::InterfaceClassifier;
pub use connectivity::{ConnectivityProbe, RouteProbe, StaticProbe, default_targets};
pub use fetcher::{FetchError, InterfaceFetcher, StaticFetcher};
pub use interface::{
    AddressFamily, InterfaceAddress, InterfaceSnapshot, IpVersion, NetworkType, ParseAddressError,
    ParseEnumError, strip_zone,
};
