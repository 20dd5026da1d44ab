use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Profile, Subscription};

/// Read/write access to the `subscriptions` collection
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// At most one subscription per user is expected
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Subscription>, DatabaseError>;

    /// Partial update: `plan = 'free'`, `updated_at = at`
    async fn downgrade_to_free(&self, subscription_id: Uuid, at: DateTime<Utc>) -> Result<(), DatabaseError>;
}

/// Read access to the `profiles` collection
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
