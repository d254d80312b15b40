//! Subscription payload types.
//!
//! The payload is produced only by the remote licensing service and is
//! immutable once received; this module defines its wire shape and the
//! status predicate the validity evaluator runs on it.

use serde::{Deserialize, Serialize};

/// The current status of a subscription, as reported by the licensing
/// service. Unknown strings deserialize to [`SubscriptionStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is paid up and active.
    Active,
    /// Payment is late but the subscription has not been terminated.
    PastDue,
    /// In a trial period.
    Trialing,
    /// Canceled by the customer.
    Canceled,
    /// Past its end date.
    Expired,
    /// Any status this build does not know about.
    #[serde(other)]
    Other,
}

impl SubscriptionStatus {
    /// Returns true if this status entitles the cluster to paid
    /// functionality.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active | Self::PastDue | Self::Trialing)
    }
}

/// A verified subscription payload.
///
/// All timestamps are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Current subscription status.
    pub status: SubscriptionStatus,
    /// Plan name (e.g. `"pro"`).
    pub name: String,
    /// Subscription start.
    pub start_date: i64,
    /// Subscription end.
    pub end_date: i64,
    /// When the subscription was canceled, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<i64>,
    /// Trial start, if the subscription had a trial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_start_at: Option<i64>,
    /// Trial end, if the subscription had a trial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end_at: Option<i64>,
    /// Maximum number of nodes this subscription may deploy.
    pub nodes_limit: u32,
}
