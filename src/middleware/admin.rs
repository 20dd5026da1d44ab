use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::Identity;
use crate::error::ApiError;

/// Admin-only routes. Uses the same `AdminCheck` as the entitlement loader.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !state.admin.is_admin(&identity).await? {
        tracing::warn!("User {} denied access to admin route {}", identity.user_id, request.uri().path());
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}
