use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user; only the admin flag matters to this service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

impl Profile {
    /// Null is treated the same as false
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }
}
