use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Profile, Subscription};
use crate::database::repository::{HealthCheck, ProfileRepository, SubscriptionRepository};
use crate::entitlements::Plan;

/// In-process store for local runs without Postgres and for tests.
/// Failure switches let callers exercise the store-error paths.
#[derive(Clone, Default)]
pub struct MemoryStore {
    subscriptions: Arc<RwLock<HashMap<Uuid, Subscription>>>,
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
    downgrade_writes: Arc<AtomicUsize>,
    fail_subscription_reads: Arc<AtomicBool>,
    fail_subscription_writes: Arc<AtomicBool>,
    fail_profile_reads: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the subscription for `subscription.user_id`
    pub async fn put_subscription(&self, subscription: Subscription) {
        self.subscriptions
            .write()
            .await
            .insert(subscription.user_id, subscription);
    }

    pub async fn put_profile(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    /// Stored copy, bypassing the failure switches
    pub async fn stored_subscription(&self, user_id: Uuid) -> Option<Subscription> {
        self.subscriptions.read().await.get(&user_id).cloned()
    }

    pub fn downgrade_writes(&self) -> usize {
        self.downgrade_writes.load(Ordering::SeqCst)
    }

    pub fn fail_subscription_reads(&self, fail: bool) {
        self.fail_subscription_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_subscription_writes(&self, fail: bool) {
        self.fail_subscription_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_profile_reads(&self, fail: bool) {
        self.fail_profile_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Subscription>, DatabaseError> {
        if self.fail_subscription_reads.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("subscription read failed".to_string()));
        }
        Ok(self.subscriptions.read().await.get(&user_id).cloned())
    }

    async fn downgrade_to_free(&self, subscription_id: Uuid, at: DateTime<Utc>) -> Result<(), DatabaseError> {
        if self.fail_subscription_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("subscription write failed".to_string()));
        }

        let mut subscriptions = self.subscriptions.write().await;
        let subscription = subscriptions
            .values_mut()
            .find(|sub| sub.id == subscription_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("subscription {}", subscription_id)))?;

        subscription.plan = Plan::Free;
        subscription.updated_at = at;
        self.downgrade_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        if self.fail_profile_reads.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("profile read failed".to_string()));
        }
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
