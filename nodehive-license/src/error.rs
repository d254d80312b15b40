//! Error types for the licensing subsystem.
//!
//! Cryptographic, decoding, and parsing failures inside the activation
//! flow are collapsed into the single opaque [`LicenseError::Activation`]
//! variant; the failing step and cause are logged, never returned. Only
//! cluster-identity failure and the terminal "subscription is invalid"
//! condition carry distinct, user-actionable messages.

use thiserror::Error;

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Errors surfaced to callers of the licensing service.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LicenseError {
    /// A required request field is missing or empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the offending request field.
        field: &'static str,
    },

    /// Cluster identity could not be resolved.
    #[error("can't get cluster details")]
    ClusterDetails,

    /// Activation failed. Covers every envelope-parse, key-decode and
    /// signature failure; specifics go to the log only.
    #[error("can't activate subscription")]
    Activation,

    /// No valid subscription is installed. Expected steady state for
    /// unlicensed installs, not a hard failure.
    #[error("subscription is invalid")]
    InvalidSubscription,

    /// The remote licensing service could not be reached or answered
    /// with a non-success status.
    #[error("licensing service request failed")]
    Remote,
}

impl LicenseError {
    /// HTTP status code the external handler layer maps this error to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField { .. } | Self::ClusterDetails => 400,
            Self::InvalidSubscription => 410,
            Self::Activation | Self::Remote => 500,
        }
    }
}

/// Errors from cluster-identity resolution.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The well-known system namespace does not exist. The environment
    /// is not a valid licensing host.
    #[error("namespace {0} not found")]
    NotFound(String),

    /// Any other lookup failure.
    #[error("cluster lookup failed: {0}")]
    Internal(String),
}

/// Errors from the signature-verification primitives.
///
/// A signature that is well-formed but does not authenticate is *not* an
/// error; [`crate::verify`] reports that as `Ok(false)`.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The encoded public key could not be decoded.
    #[error("invalid public key: {0}")]
    KeyDecode(String),

    /// The signature bytes are structurally malformed.
    #[error("malformed signature: {0}")]
    Malformed(String),
}
