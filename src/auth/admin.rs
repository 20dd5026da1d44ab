//! Admin authorization shared by every call site that needs it: the
//! admin-only route gate, the whoami handler and the subscription loader's
//! admin override all go through [`AdminCheck`].

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use super::Identity;
use crate::database::{DatabaseError, ProfileRepository};

/// Admin email allow-list, normalised to trimmed lowercase.
/// Parsed once at startup; changing `ADMIN_EMAILS` needs a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: HashSet<String>,
}

impl AdminAllowList {
    /// Parse a comma-separated list; blank entries are ignored
    pub fn parse(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty() && self.emails.contains(&email.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[async_trait]
pub trait AdminCheck: Send + Sync {
    async fn is_admin(&self, identity: &Identity) -> Result<bool, DatabaseError>;
}

/// Allow-list first, then the stored profile flag
pub struct AdminGate {
    allow_list: AdminAllowList,
    profiles: Arc<dyn ProfileRepository>,
}

impl AdminGate {
    pub fn new(allow_list: AdminAllowList, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { allow_list, profiles }
    }
}

#[async_trait]
impl AdminCheck for AdminGate {
    async fn is_admin(&self, identity: &Identity) -> Result<bool, DatabaseError> {
        if let Some(email) = identity.email.as_deref() {
            if self.allow_list.contains(email) {
                tracing::debug!("User {} is admin via allow-list", identity.user_id);
                return Ok(true);
            }
        }

        let is_admin = self
            .profiles
            .find_by_id(identity.user_id)
            .await?
            .is_some_and(|profile| profile.is_admin());

        tracing::debug!("User {} admin flag from profile: {}", identity.user_id, is_admin);
        Ok(is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Profile;
    use crate::database::MemoryStore;
    use uuid::Uuid;

    fn gate(allow_list: &str, store: &MemoryStore) -> AdminGate {
        AdminGate::new(AdminAllowList::parse(allow_list), Arc::new(store.clone()))
    }

    #[test]
    fn allow_list_is_trimmed_and_case_insensitive() {
        let list = AdminAllowList::parse(" Staff@School.edu , ,admin@example.com,");
        assert_eq!(list.len(), 2);
        assert!(list.contains("staff@school.edu"));
        assert!(list.contains("  ADMIN@example.com "));
        assert!(!list.contains("student@school.edu"));
        assert!(!list.contains(""));
    }

    #[test]
    fn empty_allow_list_matches_nothing() {
        let list = AdminAllowList::parse("");
        assert!(list.is_empty());
        assert!(!list.contains("anyone@example.com"));
    }

    #[tokio::test]
    async fn allow_listed_email_skips_profile_read() {
        let store = MemoryStore::new();
        // a failing profile read proves the store is never consulted
        store.fail_profile_reads(true);
        let identity = Identity::new(Uuid::new_v4(), Some("Admin@Example.com".to_string()));

        assert!(gate("admin@example.com", &store).is_admin(&identity).await.unwrap());
    }

    #[tokio::test]
    async fn falls_back_to_profile_flag() {
        let store = MemoryStore::new();
        let admin_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let unset_id = Uuid::new_v4();
        store
            .put_profile(Profile { id: admin_id, email: None, is_admin: Some(true) })
            .await;
        store
            .put_profile(Profile { id: member_id, email: None, is_admin: Some(false) })
            .await;
        store
            .put_profile(Profile { id: unset_id, email: None, is_admin: None })
            .await;

        let gate = gate("admin@example.com", &store);
        let student = Some("student@example.com".to_string());
        assert!(gate.is_admin(&Identity::new(admin_id, student.clone())).await.unwrap());
        assert!(!gate.is_admin(&Identity::new(member_id, student.clone())).await.unwrap());
        assert!(!gate.is_admin(&Identity::new(unset_id, None)).await.unwrap());
    }

    #[tokio::test]
    async fn missing_profile_is_not_admin() {
        let store = MemoryStore::new();
        let identity = Identity::new(Uuid::new_v4(), None);
        assert!(!gate("", &store).is_admin(&identity).await.unwrap());
    }

    #[tokio::test]
    async fn profile_read_errors_propagate() {
        let store = MemoryStore::new();
        store.fail_profile_reads(true);
        let identity = Identity::new(Uuid::new_v4(), Some("student@example.com".to_string()));
        assert!(gate("admin@example.com", &store).is_admin(&identity).await.is_err());
    }
}
