use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::entitlements::{Plan, PlanParseError};

/// A user's billing/access tier. Created by the billing integration; this
/// crate only reads it and lazily downgrades expired trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: Plan,
    pub trial_started_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub subscription_started_at: Option<DateTime<Utc>>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// New subscription row with no trial or billing period set
    pub fn new(user_id: Uuid, plan: Plan, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            plan,
            trial_started_at: None,
            trial_ends_at: None,
            subscription_started_at: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_trial(mut self, started_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.trial_started_at = Some(started_at);
        self.trial_ends_at = Some(ends_at);
        self
    }

    /// True when the plan is a trial variant whose end lies strictly before `now`.
    /// A trial without an end timestamp never expires.
    pub fn trial_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.plan.is_trial() && self.trial_ends_at.is_some_and(|ends_at| ends_at < now)
    }

    /// Apply the free-plan downgrade to this in-memory copy
    pub fn downgrade_to_free(&mut self, now: DateTime<Utc>) {
        self.plan = Plan::Free;
        self.updated_at = now;
    }
}

/// Raw `subscriptions` row; `plan` is stored as text
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: String,
    pub trial_started_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub subscription_started_at: Option<DateTime<Utc>>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = PlanParseError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            plan: row.plan.parse()?,
            trial_started_at: row.trial_started_at,
            trial_ends_at: row.trial_ends_at,
            subscription_started_at: row.subscription_started_at,
            subscription_ends_at: row.subscription_ends_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expired_trial_is_detected_strictly() {
        let now = Utc::now();
        let sub = Subscription::new(Uuid::new_v4(), Plan::ProTrial, now)
            .with_trial(now - Duration::days(7), now);
        assert!(!sub.trial_expired_at(now));
        assert!(sub.trial_expired_at(now + Duration::seconds(1)));
    }

    #[test]
    fn paid_plan_never_expires_as_trial() {
        let now = Utc::now();
        let sub = Subscription::new(Uuid::new_v4(), Plan::Pro, now)
            .with_trial(now - Duration::days(30), now - Duration::days(16));
        assert!(!sub.trial_expired_at(now));
    }

    #[test]
    fn trial_without_end_never_expires() {
        let now = Utc::now();
        let sub = Subscription::new(Uuid::new_v4(), Plan::StandardTrial, now);
        assert!(!sub.trial_expired_at(now + Duration::days(365)));
    }

    #[test]
    fn row_with_unknown_plan_is_rejected() {
        let now = Utc::now();
        let row = SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: "lifetime".to_string(),
            trial_started_at: None,
            trial_ends_at: None,
            subscription_started_at: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(Subscription::try_from(row).is_err());
    }
}
