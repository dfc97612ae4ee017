//! Error taxonomy for the binding layer.
//!
//! Binding-time errors ([`SdkError::LibraryNotFound`],
//! [`SdkError::BindingError`]) are fatal: there is no safe partial-binding
//! state to run in. Per-operation errors are caught at each data-category
//! boundary by the caller so one category's failure never prevents the
//! others.

use thiserror::Error;

/// Errors produced by the binding and adaptation layer.
#[derive(Debug, Error)]
pub enum SdkError {
    /// The SDK module file is missing or not a loadable image.
    #[error("cannot load {library}: {reason}")]
    LibraryNotFound { library: String, reason: String },

    /// A mandatory symbol failed to resolve; initialization is aborted.
    #[error("cannot bind mandatory symbol {symbol}")]
    BindingError { symbol: &'static str },

    /// An optional symbol or interface never resolved; the owning feature
    /// group is permanently unavailable for this process.
    #[error("{symbol} is not available")]
    FeatureUnavailable { symbol: &'static str },

    /// A native call returned a non-success result unrelated to versioning.
    #[error("{operation} failed: {code}")]
    OperationFailed {
        operation: &'static str,
        /// String form of the native result code.
        code: String,
    },

    /// The version-fallback ladder reached version 1 and still failed.
    #[error("{operation} is incompatible with every known version after {attempts} attempts")]
    VersionExhausted {
        operation: &'static str,
        attempts: u32,
    },

    /// An operation did not complete before an explicitly configured
    /// deadline. Never raised under the default no-timeout policy.
    #[error("{operation} did not complete before the configured deadline")]
    OperationTimedOut { operation: &'static str },

    /// A caller-supplied string argument contains an interior NUL byte and
    /// cannot cross the C boundary.
    #[error("argument for {operation} contains an interior NUL byte")]
    InvalidArgument { operation: &'static str },

    /// Platform-object creation failed at every known ABI version.
    #[error("failed to create the platform object")]
    PlatformCreateFailed,

    /// A bound interface getter returned a null handle.
    #[error("failed to get {name} from the platform")]
    InterfaceUnavailable { name: &'static str },

    /// The background tick thread could not be spawned.
    #[error("failed to start the tick thread: {0}")]
    TickThread(std::io::Error),
}
