//! device-ip: local IP address resolver
//!
//! A library for finding the device's current IPv4 and IPv6 addresses,
//! filtered by network type (Wi-Fi, mobile) and IP version, and exposing
//! the lookup through a `getIpAddress` method-call surface.

pub mod channel;
pub mod config;
pub mod network;
pub mod resolver;
