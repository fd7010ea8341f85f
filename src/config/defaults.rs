//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

/// Default network type (`any`).
pub const NETWORK_TYPE: &str = "any";

/// Default IP version (`both`).
pub const IP_VERSION: &str = "both";

/// Default classifier style.
pub const CLASSIFIER: &str = "auto";

/// Whether the connectivity probe runs by default.
pub const CONNECTIVITY_CHECK: bool = true;

/// Default output format.
pub const FORMAT: &str = "json";

/// Default file name written by `init`.
pub const CONFIG_FILE: &str = "device-ip.toml";
