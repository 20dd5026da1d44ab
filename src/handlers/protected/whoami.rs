use axum::{extract::State, Extension};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Identity;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmI {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// GET /api/auth/whoami
pub async fn whoami(State(state): State<AppState>, Extension(identity): Extension<Identity>) -> ApiResult<WhoAmI> {
    let is_admin = state.admin.is_admin(&identity).await?;

    Ok(ApiResponse::success(WhoAmI {
        user_id: identity.user_id,
        email: identity.email,
        is_admin,
    }))
}
