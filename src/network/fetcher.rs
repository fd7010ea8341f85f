//! Interface fetching trait and error types.

use super::InterfaceSnapshot;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// The resolver turns every variant into a result record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The OS enumeration call failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Permission denied to access network information.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// Platform-specific error with a generic message.
    #[error("{message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for enumerating network interfaces and their addresses.
///
/// # Design
///
/// - The OS is an external collaborator behind this trait
/// - Enables dependency injection for testing with mock implementations
/// - Platform-specific implementations provided in [`super::platform`]
///
/// # Example
///
/// ```
/// use device_ip::network::{FetchError, InterfaceFetcher, InterfaceSnapshot};
///
/// struct NoInterfaces;
///
/// impl InterfaceFetcher for NoInterfaces {
///     fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
///         Ok(vec![])
///     }
/// }
///
/// assert!(NoInterfaces.fetch().unwrap().is_empty());
/// ```
pub trait InterfaceFetcher: Send + Sync {
    /// Fetches the current state of all network interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform enumeration fails.
    ///
    /// # Implementation Notes
    ///
    /// - Implementations should return ALL interfaces, loopback and down ones
    ///   included; filtering is done by the caller
    /// - Interface and address order must be the order the OS reports
    /// - Every call must query the OS again; nothing is cached
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError>;
}

impl<T: InterfaceFetcher + ?Sized> InterfaceFetcher for &T {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        (*self).fetch()
    }
}

impl<T: InterfaceFetcher + ?Sized> InterfaceFetcher for Box<T> {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        self.as_ref().fetch()
    }
}

/// A fetcher that always returns the same interface list.
///
/// Used for `--snapshot` files and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    interfaces: Vec<InterfaceSnapshot>,
}

impl StaticFetcher {
    /// Creates a fetcher returning `interfaces` on every call.
    #[must_use]
    pub const fn new(interfaces: Vec<InterfaceSnapshot>) -> Self {
        Self { interfaces }
    }

    /// Parses a JSON array of interface snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a list of interfaces.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// Returns the configured interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &[InterfaceSnapshot] {
        &self.interfaces
    }
}

impl InterfaceFetcher for StaticFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        Ok(self.interfaces.clone())
    }
}
