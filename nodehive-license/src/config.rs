//! Licensing service configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default request timeout for calls to the licensing service.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of a subscription's trial-end timestamp.
///
/// The licensing service reports `trial_end_at` on the payload; some
/// deployments instead treat the subscription end date as the trial end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialEndSource {
    /// Keep the `trial_end_at` reported by the licensing service.
    #[default]
    Reported,
    /// Alias the trial end to the subscription `end_date`.
    EndDate,
}

/// Configuration for the licensing subsystem.
///
/// The public key is decoded lazily, at the first verification attempt;
/// constructing a config with a bad key does not fail until activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// Base URL of the remote licensing service.
    pub api_base_url: String,
    /// Trusted Ed25519 public key, hex (64 chars) or PEM encoded.
    pub public_key: String,
    /// Per-request timeout for licensing service calls.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub request_timeout: Duration,
    /// Where the stored trial-end timestamp comes from.
    #[serde(default)]
    pub trial_end: TrialEndSource,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://license.nodehive.io".to_string(),
            public_key: String::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            trial_end: TrialEndSource::default(),
        }
    }
}

impl LicenseConfig {
    /// Builds a config from the `NODEHIVE_LICENSE_API_URL` and
    /// `NODEHIVE_LICENSE_PUBLIC_KEY` environment variables, falling back
    /// to defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("NODEHIVE_LICENSE_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(key) = env::var("NODEHIVE_LICENSE_PUBLIC_KEY") {
            config.public_key = key;
        }
        config
    }
}

fn default_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

/// Serializes the request timeout as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}
