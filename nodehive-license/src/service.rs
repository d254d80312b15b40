//! License acknowledgment orchestration and validity evaluation.
//!
//! [`LicenseService`] drives the activation protocol end to end: cluster
//! identity → remote exchange → signature verification over the exact
//! wire bytes → trusted-timestamp anchor → state install. It is the only
//! writer of the subscription state; request handlers share it by `Arc`
//! and consult [`LicenseService::is_valid`] on every protected request.
//!
//! Every failure between envelope parsing and signature verification
//! collapses into the same opaque activation error. That is deliberate:
//! distinguishing forgery outcomes for callers would hand an oracle to
//! whoever is probing the verification step.

use crate::client::LicenseApiClient;
use crate::cluster::{ClusterIdentitySource, KubernetesClusterSource};
use crate::config::{LicenseConfig, TrialEndSource};
use crate::envelope::{AcknowledgmentData, CurrentTime, Envelope, TimestampData};
use crate::error::{LicenseError, LicenseResult};
use crate::signature;
use crate::state::{SubscriptionState, SubscriptionStore};
use crate::subscription::Subscription;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The licensing service: activation orchestrator, subscription state
/// owner, and validity evaluator.
pub struct LicenseService {
    config: LicenseConfig,
    client: LicenseApiClient,
    cluster: Arc<dyn ClusterIdentitySource>,
    store: SubscriptionStore,
}

impl LicenseService {
    /// Creates a service with an explicit cluster identity source.
    pub fn new(config: LicenseConfig, cluster: Arc<dyn ClusterIdentitySource>) -> Self {
        let client = LicenseApiClient::new(&config);
        Self {
            config,
            client,
            cluster,
            store: SubscriptionStore::new(),
        }
    }

    /// Creates a service resolving the cluster identity through the
    /// in-cluster Kubernetes environment.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::ClusterDetails`] if the in-cluster
    /// environment is incomplete.
    pub async fn in_cluster(config: LicenseConfig) -> LicenseResult<Self> {
        let source = KubernetesClusterSource::in_cluster().await.map_err(|e| {
            warn!(error = %e, "failed to initialize in-cluster identity source");
            LicenseError::ClusterDetails
        })?;
        Ok(Self::new(config, Arc::new(source)))
    }

    /// Activates a subscription for this cluster.
    ///
    /// Resolves the cluster identity, exchanges it together with the
    /// activation key for a signed license envelope, verifies the
    /// envelope against the trusted public key, anchors the check time
    /// to the service's signed clock, and installs the state. Each step
    /// is terminal on failure; the caller may retry the whole flow.
    ///
    /// # Errors
    ///
    /// [`LicenseError::MissingField`] for an empty key,
    /// [`LicenseError::ClusterDetails`] when the cluster identity cannot
    /// be resolved (the state is reset), [`LicenseError::Remote`] when
    /// the service is unreachable, [`LicenseError::Activation`] for any
    /// envelope or signature failure.
    pub async fn acknowledge(&self, activation_key: &str) -> LicenseResult<()> {
        if activation_key.trim().is_empty() {
            return Err(LicenseError::MissingField {
                field: "activation_key",
            });
        }

        let cluster_id = match self.cluster.resolve().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "cluster identity resolution failed");
                self.store.clear();
                return Err(LicenseError::ClusterDetails);
            }
        };

        let body = self
            .client
            .acknowledge(activation_key, cluster_id.as_str())
            .await?;

        let envelope: Envelope<AcknowledgmentData> =
            serde_json::from_slice(&body).map_err(|e| {
                warn!(error = %e, "malformed acknowledgment envelope");
                LicenseError::Activation
            })?;

        self.verify_signed(&envelope.data.signature, envelope.data.subscription.get())?;

        let mut subscription: Subscription = serde_json::from_str(envelope.data.subscription.get())
            .map_err(|e| {
                warn!(error = %e, "malformed subscription payload");
                LicenseError::Activation
            })?;

        if self.config.trial_end == TrialEndSource::EndDate {
            subscription.trial_end_at = Some(subscription.end_date);
        }

        let checked_at = self.current_timestamp().await?;
        info!(
            plan = %subscription.name,
            status = ?subscription.status,
            "subscription activated"
        );
        self.store.write(subscription, checked_at);

        Ok(())
    }

    /// Returns the authenticated current time from the licensing
    /// service's signed clock. Exists so a tampered local clock cannot
    /// mask license expiry.
    ///
    /// # Errors
    ///
    /// [`LicenseError::Remote`] when the service is unreachable,
    /// [`LicenseError::Activation`] for any envelope or signature
    /// failure.
    pub async fn current_timestamp(&self) -> LicenseResult<i64> {
        let body = self.client.current_timestamp().await?;

        let envelope: Envelope<TimestampData> = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "malformed timestamp envelope");
            LicenseError::Activation
        })?;

        self.verify_signed(&envelope.data.signature, envelope.data.time.get())?;

        let time: CurrentTime = serde_json::from_str(envelope.data.time.get()).map_err(|e| {
            warn!(error = %e, "malformed time payload");
            LicenseError::Activation
        })?;

        Ok(time.current_time)
    }

    /// Returns whether the product is currently licensed.
    ///
    /// `false` when no subscription is installed. A stored subscription
    /// in a terminal or unknown status clears the state as a side
    /// effect, so the cached details are not trusted again until a
    /// fresh acknowledgment succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let state = self.store.read();
        match state.details {
            None => false,
            Some(details) if details.status.is_usable() => true,
            Some(details) => {
                debug!(status = ?details.status, "subscription no longer usable, clearing state");
                self.store.clear();
                false
            }
        }
    }

    /// Returns the stored subscription payload verbatim.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidSubscription`] when no valid subscription
    /// is installed.
    pub fn subscription_details(&self) -> LicenseResult<Subscription> {
        if !self.is_valid() {
            return Err(LicenseError::InvalidSubscription);
        }
        self.store
            .read()
            .details
            .ok_or(LicenseError::InvalidSubscription)
    }

    /// Re-checks the stored subscription against the service's signed
    /// clock: clears the state if the subscription has ended, refreshes
    /// the last-check timestamp otherwise. Periodic scheduling of this
    /// call is an external concern.
    ///
    /// # Errors
    ///
    /// Propagates [`LicenseService::current_timestamp`] failures.
    pub async fn revalidate(&self) -> LicenseResult<bool> {
        let now = self.current_timestamp().await?;

        let state = self.store.read();
        let Some(details) = state.details else {
            return Ok(false);
        };

        if details.end_date < now {
            info!(end_date = details.end_date, now, "subscription ended, clearing state");
            self.store.clear();
            return Ok(false);
        }

        self.store.write(details, now);
        Ok(self.is_valid())
    }

    /// Returns the current subscription state snapshot.
    #[must_use]
    pub fn state(&self) -> SubscriptionState {
        self.store.read()
    }

    /// Verifies a base64 signature over the exact signed byte span.
    fn verify_signed(&self, signature_b64: &str, message: &str) -> LicenseResult<()> {
        let key = signature::decode_verifying_key(&self.config.public_key).map_err(|e| {
            warn!(error = %e, "trusted public key decode failed");
            LicenseError::Activation
        })?;

        let sig = BASE64.decode(signature_b64).map_err(|e| {
            warn!(error = %e, "signature base64 decode failed");
            LicenseError::Activation
        })?;

        match signature::verify(message.as_bytes(), &sig, &key) {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("envelope signature did not verify");
                Err(LicenseError::Activation)
            }
            Err(e) => {
                warn!(error = %e, "envelope signature malformed");
                Err(LicenseError::Activation)
            }
        }
    }
}
