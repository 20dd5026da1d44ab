use axum::extract::{Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Identity;
use crate::entitlements::EntitlementResult;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/entitlements/:user_id
///
/// Evaluates another user's entitlement the same way their own request would.
/// Their email is unknown here, so their admin status comes from the profile
/// flag alone. An expired trial is downgraded as a side effect.
pub async fn user_entitlement_get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<EntitlementResult> {
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| ApiError::bad_request(format!("Invalid user id: {}", user_id)))?;

    let identity = Identity::new(user_id, None);
    let result = state
        .loader
        .load(Some(&identity))
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Entitlement unavailable"))?;

    Ok(ApiResponse::success(result))
}
