use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Profile, Subscription, SubscriptionRow};
use crate::database::repository::{HealthCheck, ProfileRepository, SubscriptionRepository};
use crate::entitlements::Plan;

/// Postgres-backed store for subscriptions and profiles
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Subscription>, DatabaseError> {
        let query = r#"
            SELECT
                id, user_id, plan,
                trial_started_at, trial_ends_at,
                subscription_started_at, subscription_ends_at,
                created_at, updated_at
            FROM subscriptions
            WHERE user_id = $1
            LIMIT 1
        "#;

        let row = sqlx::query_as::<_, SubscriptionRow>(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Subscription::try_from)
            .transpose()
            .map_err(|e| DatabaseError::QueryError(e.to_string()))
    }

    async fn downgrade_to_free(&self, subscription_id: Uuid, at: DateTime<Utc>) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE subscriptions SET plan = $1, updated_at = $2 WHERE id = $3")
            .bind(Plan::Free.as_str())
            .bind(at)
            .bind(subscription_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("subscription {}", subscription_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PgStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT id, email, is_admin FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
