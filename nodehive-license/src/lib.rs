//! License activation and continuous validity for NodeHive.
//!
//! This crate gates access to the product's paid functionality:
//! - Cluster identity resolution (the `kube-system` namespace UID)
//! - Activation key exchange with the remote licensing service
//! - Ed25519 verification of the signed license envelopes
//! - Process-wide subscription state consulted on every protected request
//!
//! # Design Principles
//!
//! - **Verify the wire bytes**: signatures are checked over the exact
//!   byte span carried in the response, never a re-serialized copy
//! - **Opaque activation failures**: parse, decode and signature errors
//!   all surface as one generic error; specifics are logged only
//! - **Single state owner**: one mutex-guarded subscription state per
//!   process, replaced or cleared atomically
//! - **Trusted time**: expiry checks are anchored to the licensing
//!   service's signed clock, not the local one

mod client;
mod cluster;
mod config;
mod envelope;
mod error;
mod service;
mod signature;
mod state;
mod subscription;

pub use client::LicenseApiClient;
pub use cluster::{
    ClusterIdentity, ClusterIdentitySource, KubernetesClusterSource, StaticClusterSource,
    SYSTEM_NAMESPACE,
};
pub use config::{LicenseConfig, TrialEndSource, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ClusterError, LicenseError, LicenseResult, SignatureError};
pub use service::LicenseService;
pub use signature::{decode_verifying_key, verify};
pub use state::{SubscriptionState, SubscriptionStore};
pub use subscription::{Subscription, SubscriptionStatus};
