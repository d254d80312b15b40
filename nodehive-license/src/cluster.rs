//! Cluster identity resolution.
//!
//! A license is bound to the hosting cluster through the unique ID of an
//! immutable, pre-existing system namespace. Resolution is read-only: the
//! identity is handed to the remote exchange and never persisted here.

use crate::error::ClusterError;
use async_trait::async_trait;
use reqwest::{Certificate, Client, StatusCode};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Name of the immutable system namespace whose UID binds the license.
pub const SYSTEM_NAMESPACE: &str = "kube-system";

/// Mount point of the pod's service-account credentials.
const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// A stable, unique identifier for the hosting cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterIdentity(String);

impl ClusterIdentity {
    /// Wraps an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the cluster identity.
#[async_trait]
pub trait ClusterIdentitySource: Send + Sync {
    /// Resolves the identity of the hosting cluster.
    ///
    /// # Errors
    ///
    /// [`ClusterError::NotFound`] if the system namespace does not exist,
    /// [`ClusterError::Internal`] for any other lookup failure.
    async fn resolve(&self) -> Result<ClusterIdentity, ClusterError>;
}

/// Resolves the cluster identity from the Kubernetes API: the UID of the
/// [`SYSTEM_NAMESPACE`] namespace, read with the pod's service account.
pub struct KubernetesClusterSource {
    client: Client,
    api_base_url: String,
    token: String,
}

impl KubernetesClusterSource {
    /// Creates a source against an explicit API endpoint and bearer token.
    pub fn new(api_base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            api_base_url: api_base_url.into(),
            token: token.into(),
        }
    }

    /// Creates a source from the in-cluster environment: API server
    /// address from `KUBERNETES_SERVICE_HOST`/`KUBERNETES_SERVICE_PORT`,
    /// bearer token and cluster CA from the mounted service account.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Internal`] if the environment or the
    /// service-account mount is incomplete.
    pub async fn in_cluster() -> Result<Self, ClusterError> {
        let host = env::var("KUBERNETES_SERVICE_HOST")
            .map_err(|_| ClusterError::Internal("KUBERNETES_SERVICE_HOST is not set".to_string()))?;
        let port = env::var("KUBERNETES_SERVICE_PORT").unwrap_or_else(|_| "443".to_string());

        let dir = Path::new(SERVICE_ACCOUNT_DIR);
        let token = tokio::fs::read_to_string(dir.join("token"))
            .await
            .map_err(|e| ClusterError::Internal(format!("failed to read service account token: {e}")))?;
        let ca_pem = tokio::fs::read(dir.join("ca.crt"))
            .await
            .map_err(|e| ClusterError::Internal(format!("failed to read cluster CA: {e}")))?;
        let ca = Certificate::from_pem(&ca_pem)
            .map_err(|e| ClusterError::Internal(format!("invalid cluster CA: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .add_root_certificate(ca)
            .build()
            .map_err(|e| ClusterError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base_url: format!("https://{host}:{port}"),
            token: token.trim().to_string(),
        })
    }
}

#[async_trait]
impl ClusterIdentitySource for KubernetesClusterSource {
    async fn resolve(&self) -> Result<ClusterIdentity, ClusterError> {
        let response = self
            .client
            .get(format!(
                "{}/api/v1/namespaces/{SYSTEM_NAMESPACE}",
                self.api_base_url
            ))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ClusterError::Internal(format!("namespace lookup failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClusterError::NotFound(SYSTEM_NAMESPACE.to_string()));
        }
        if !response.status().is_success() {
            return Err(ClusterError::Internal(format!(
                "namespace lookup returned {}",
                response.status()
            )));
        }

        let namespace: Namespace = response
            .json()
            .await
            .map_err(|e| ClusterError::Internal(format!("invalid namespace response: {e}")))?;

        if namespace.metadata.uid.is_empty() {
            return Err(ClusterError::Internal("namespace has no uid".to_string()));
        }

        debug!(uid = %namespace.metadata.uid, "resolved cluster identity");
        Ok(ClusterIdentity::new(namespace.metadata.uid))
    }
}

/// Fixed cluster identity, for tests and local development.
pub struct StaticClusterSource {
    id: ClusterIdentity,
}

impl StaticClusterSource {
    /// Creates a source that always resolves to `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ClusterIdentity::new(id),
        }
    }
}

#[async_trait]
impl ClusterIdentitySource for StaticClusterSource {
    async fn resolve(&self) -> Result<ClusterIdentity, ClusterError> {
        Ok(self.id.clone())
    }
}

/// Kubernetes namespace object, reduced to what resolution needs.
#[derive(Debug, Deserialize)]
struct Namespace {
    metadata: NamespaceMetadata,
}

#[derive(Debug, Deserialize)]
struct NamespaceMetadata {
    #[serde(default)]
    uid: String,
}
