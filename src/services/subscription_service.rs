use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{AdminCheck, Identity};
use crate::database::{DatabaseError, SubscriptionRepository};
use crate::entitlements::EntitlementResult;

/// Loads the caller's subscription and admin status and evaluates entitlement.
///
/// Expired trials are downgraded lazily here, at read time; there is no
/// background sweep.
pub struct SubscriptionLoader {
    subscriptions: Arc<dyn SubscriptionRepository>,
    admin: Arc<dyn AdminCheck>,
}

impl SubscriptionLoader {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>, admin: Arc<dyn AdminCheck>) -> Self {
        Self { subscriptions, admin }
    }

    pub async fn load(&self, session: Option<&Identity>) -> Result<Option<EntitlementResult>, DatabaseError> {
        self.load_at(session, Utc::now()).await
    }

    /// `Ok(None)` means no session, which callers treat as not entitled.
    /// Subscription read failures count as "no subscription"; admin lookup
    /// failures are returned.
    pub async fn load_at(
        &self,
        session: Option<&Identity>,
        now: DateTime<Utc>,
    ) -> Result<Option<EntitlementResult>, DatabaseError> {
        let Some(identity) = session else {
            return Ok(None);
        };

        let (is_admin, subscription) = futures::join!(
            self.admin.is_admin(identity),
            self.subscriptions.find_by_user(identity.user_id),
        );
        let is_admin = is_admin?;

        let mut subscription = match subscription {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!("Subscription read failed for user {}, treating as none: {}", identity.user_id, e);
                None
            }
        };

        if let Some(sub) = subscription.as_mut() {
            if sub.trial_expired_at(now) {
                debug!("Trial {} ({}) expired, downgrading to free", sub.id, sub.plan);
                if let Err(e) = self.subscriptions.downgrade_to_free(sub.id, now).await {
                    // The free plan is still what we return; the next request retries the write.
                    warn!("Failed to persist trial downgrade for subscription {}: {}", sub.id, e);
                }
                sub.downgrade_to_free(now);
            }
        }

        Ok(Some(EntitlementResult::evaluate(subscription, is_admin)))
    }
}
