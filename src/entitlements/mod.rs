//! Entitlement evaluation over a subscription record and the admin flag.
//!
//! Everything here is pure: callers pass the clock in (or use the `Utc::now()`
//! convenience wrappers) so the same inputs always give the same answer.

mod plan;

pub use plan::{Plan, PlanParseError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::Subscription;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Per-request entitlement snapshot. Built fresh for every request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResult {
    pub subscription: Option<Subscription>,
    pub is_admin: bool,
    pub pro_active: bool,
}

impl EntitlementResult {
    pub fn evaluate(subscription: Option<Subscription>, is_admin: bool) -> Self {
        let pro_active = is_pro(subscription.as_ref(), is_admin);
        Self {
            subscription,
            is_admin,
            pro_active,
        }
    }

    pub fn standard_or_above(&self) -> bool {
        is_standard_or_above(self.subscription.as_ref(), self.is_admin)
    }
}

/// Full feature access. Admins always qualify regardless of subscription state.
pub fn is_pro(subscription: Option<&Subscription>, is_admin: bool) -> bool {
    if is_admin {
        return true;
    }
    subscription.is_some_and(|sub| sub.plan.is_pro_tier())
}

pub fn is_standard_or_above(subscription: Option<&Subscription>, is_admin: bool) -> bool {
    if is_admin {
        return true;
    }
    subscription.is_some_and(|sub| sub.plan.is_paid_tier())
}

pub fn trial_days_left(subscription: Option<&Subscription>) -> Option<i64> {
    trial_days_left_at(subscription, Utc::now())
}

/// Whole days remaining in a trial, rounded up and never negative.
/// `None` for missing subscriptions, non-trial plans, or trials with no end.
pub fn trial_days_left_at(subscription: Option<&Subscription>, now: DateTime<Utc>) -> Option<i64> {
    let sub = subscription?;
    if !sub.plan.is_trial() {
        return None;
    }
    let ends_at = sub.trial_ends_at?;

    let remaining_ms = (ends_at - now).num_milliseconds();
    if remaining_ms <= 0 {
        return Some(0);
    }
    Some((remaining_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn sub(plan: Plan) -> Subscription {
        Subscription::new(Uuid::new_v4(), plan, Utc::now())
    }

    fn trial(plan: Plan, ends_at: DateTime<Utc>) -> Subscription {
        sub(plan).with_trial(ends_at - Duration::days(14), ends_at)
    }

    #[test]
    fn pro_tiers_are_pro_for_non_admins() {
        assert!(is_pro(Some(&sub(Plan::Pro)), false));
        assert!(is_pro(Some(&sub(Plan::ProTrial)), false));
        assert!(!is_pro(Some(&sub(Plan::Free)), false));
        assert!(!is_pro(Some(&sub(Plan::Standard)), false));
        assert!(!is_pro(Some(&sub(Plan::StandardTrial)), false));
        assert!(!is_pro(None, false));
    }

    #[test]
    fn admin_override_is_absolute() {
        assert!(is_pro(None, true));
        for plan in Plan::ALL {
            assert!(is_pro(Some(&sub(plan)), true), "{plan}");
            assert!(is_standard_or_above(Some(&sub(plan)), true), "{plan}");
        }
        assert!(is_standard_or_above(None, true));
    }

    #[test]
    fn standard_or_above_excludes_free_and_missing() {
        assert!(!is_standard_or_above(None, false));
        assert!(!is_standard_or_above(Some(&sub(Plan::Free)), false));
        for plan in [Plan::Standard, Plan::Pro, Plan::StandardTrial, Plan::ProTrial] {
            assert!(is_standard_or_above(Some(&sub(plan)), false), "{plan}");
        }
    }

    #[test]
    fn trial_days_left_is_none_outside_trials() {
        let now = Utc::now();
        assert_eq!(trial_days_left_at(None, now), None);

        let free = trial(Plan::Free, now + Duration::days(3));
        assert_eq!(trial_days_left_at(Some(&free), now), None);

        let open_ended = sub(Plan::ProTrial);
        assert_eq!(trial_days_left_at(Some(&open_ended), now), None);
    }

    #[test]
    fn trial_days_left_rounds_up() {
        let now = Utc::now();
        let sub = trial(Plan::ProTrial, now + Duration::hours(36));
        assert_eq!(trial_days_left_at(Some(&sub), now), Some(2));

        let exact = trial(Plan::StandardTrial, now + Duration::days(3));
        assert_eq!(trial_days_left_at(Some(&exact), now), Some(3));

        let sliver = trial(Plan::StandardTrial, now + Duration::minutes(1));
        assert_eq!(trial_days_left_at(Some(&sliver), now), Some(1));
    }

    #[test]
    fn trial_days_left_is_never_negative() {
        let now = Utc::now();
        let sub = trial(Plan::ProTrial, now - Duration::hours(1));
        assert_eq!(trial_days_left_at(Some(&sub), now), Some(0));

        let long_gone = trial(Plan::ProTrial, now - Duration::days(40));
        assert_eq!(trial_days_left_at(Some(&long_gone), now), Some(0));
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = EntitlementResult::evaluate(None, true);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "subscription": null, "isAdmin": true, "proActive": true })
        );
    }
}
