//! Interface name classification for network-type selection.
//!
//! Wi-Fi versus cellular is decided from the interface name alone. The
//! naming conventions differ per operating system, so the heuristic lives
//! behind [`InterfaceClassifier`] and the enumeration loop never sees a
//! platform string literal.
//!
//! # Styles
//!
//! - [`SubstringClassifier`]: Android naming (`wlan0`, `rmnet_data0`, ...)
//! - [`PrefixClassifier`]: Apple naming (`en0`, `pdp_ip0`, ...)
//! - [`PatternClassifier`]: user-supplied regex patterns
//! - [`PlatformClassifier`]: whichever built-in style fits the build target

use regex::Regex;

use super::NetworkType;

/// Decides whether an interface name belongs to a network type.
///
/// # Thread Safety
///
/// Classifiers must be `Send + Sync` so a resolver can be shared across threads.
pub trait InterfaceClassifier: Send + Sync {
    /// Returns `true` if `name` looks like a Wi-Fi interface.
    fn is_wifi(&self, name: &str) -> bool;

    /// Returns `true` if `name` looks like a cellular data interface.
    fn is_mobile(&self, name: &str) -> bool;

    /// Returns `true` if `name` qualifies for `network_type`.
    ///
    /// [`NetworkType::Any`] always matches.
    fn matches(&self, network_type: NetworkType, name: &str) -> bool {
        match network_type {
            NetworkType::Any => true,
            NetworkType::Wifi => self.is_wifi(name),
            NetworkType::Mobile => self.is_mobile(name),
        }
    }
}

// ============================================================================
// SubstringClassifier - Android naming
// ============================================================================

/// Name fragments of Android Wi-Fi interfaces.
const WIFI_SUBSTRINGS: &[&str] = &["wlan", "wifi"];

/// Name fragments of Android cellular interfaces.
const MOBILE_SUBSTRINGS: &[&str] = &["rmnet", "mobile", "cellular", "radio"];

/// Case-insensitive substring matching, following Android interface names.
///
/// # Examples
///
/// ```
/// use device_ip::network::classifier::{InterfaceClassifier, SubstringClassifier};
///
/// let classifier = SubstringClassifier;
/// assert!(classifier.is_wifi("wlan0"));
/// assert!(classifier.is_mobile("rmnet_data0"));
/// assert!(!classifier.is_mobile("wlan0"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringClassifier;

impl InterfaceClassifier for SubstringClassifier {
    fn is_wifi(&self, name: &str) -> bool {
        contains_any(name, WIFI_SUBSTRINGS)
    }

    fn is_mobile(&self, name: &str) -> bool {
        contains_any(name, MOBILE_SUBSTRINGS)
    }
}

fn contains_any(name: &str, fragments: &[&str]) -> bool {
    let name = name.to_lowercase();
    fragments.iter().any(|fragment| name.contains(fragment))
}

// ============================================================================
// PrefixClassifier - Apple naming
// ============================================================================

/// Prefix of Apple Ethernet-class interfaces, Wi-Fi included.
const WIFI_PREFIX: &str = "en";

/// Prefix of Apple cellular data interfaces.
const MOBILE_PREFIX: &str = "pdp_ip";

/// Name prefix matching, following iOS/macOS interface names.
///
/// Every `en*` interface counts as Wi-Fi, `en0` included.
///
/// # Examples
///
/// ```
/// use device_ip::network::classifier::{InterfaceClassifier, PrefixClassifier};
///
/// let classifier = PrefixClassifier;
/// assert!(classifier.is_wifi("en0"));
/// assert!(classifier.is_mobile("pdp_ip0"));
/// assert!(!classifier.is_wifi("utun3"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixClassifier;

impl InterfaceClassifier for PrefixClassifier {
    fn is_wifi(&self, name: &str) -> bool {
        name.starts_with(WIFI_PREFIX)
    }

    fn is_mobile(&self, name: &str) -> bool {
        name.starts_with(MOBILE_PREFIX)
    }
}

// ============================================================================
// PatternClassifier - regex patterns from configuration
// ============================================================================

/// Classifies by regex patterns; a name matches a type if ANY pattern matches.
///
/// An empty pattern list matches nothing.
///
/// # Examples
///
/// ```
/// use device_ip::network::classifier::{InterfaceClassifier, PatternClassifier};
///
/// let classifier = PatternClassifier::new(&["^wl"], &["^ccmni"]).unwrap();
/// assert!(classifier.is_wifi("wlp3s0"));
/// assert!(classifier.is_mobile("ccmni1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternClassifier {
    wifi: Vec<Regex>,
    mobile: Vec<Regex>,
}

impl PatternClassifier {
    /// Compiles the Wi-Fi and mobile pattern lists.
    ///
    /// # Errors
    ///
    /// Returns an error for the first invalid pattern.
    pub fn new<S: AsRef<str>>(wifi: &[S], mobile: &[S]) -> Result<Self, regex::Error> {
        Ok(Self {
            wifi: compile_all(wifi)?,
            mobile: compile_all(mobile)?,
        })
    }

    /// Returns the Wi-Fi patterns.
    #[must_use]
    pub fn wifi_patterns(&self) -> &[Regex] {
        &self.wifi
    }

    /// Returns the mobile patterns.
    #[must_use]
    pub fn mobile_patterns(&self) -> &[Regex] {
        &self.mobile
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p.as_ref())).collect()
}

impl InterfaceClassifier for PatternClassifier {
    fn is_wifi(&self, name: &str) -> bool {
        self.wifi.iter().any(|re| re.is_match(name))
    }

    fn is_mobile(&self, name: &str) -> bool {
        self.mobile.iter().any(|re| re.is_match(name))
    }
}

// ============================================================================
// Platform default
// ============================================================================

/// The built-in classifier for the build target.
#[cfg(any(target_os = "ios", target_os = "macos"))]
pub type PlatformClassifier = PrefixClassifier;

/// The built-in classifier for the build target.
#[cfg(not(any(target_os = "ios", target_os = "macos")))]
pub type PlatformClassifier = SubstringClassifier;

// Blanket implementation: any &T where T: InterfaceClassifier also implements it
impl<T: InterfaceClassifier + ?Sized> InterfaceClassifier for &T {
    fn is_wifi(&self, name: &str) -> bool {
        (*self).is_wifi(name)
    }

    fn is_mobile(&self, name: &str) -> bool {
        (*self).is_mobile(name)
    }
}

impl<T: InterfaceClassifier + ?Sized> InterfaceClassifier for Box<T> {
    fn is_wifi(&self, name: &str) -> bool {
        self.as_ref().is_wifi(name)
    }

    fn is_mobile(&self, name: &str) -> bool {
        self.as_ref().is_mobile(name)
    }
}
