use axum::{extract::State, Extension};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::Subscription;
use crate::entitlements::{self, EntitlementResult};
use crate::middleware::{ApiResponse, ApiResult};

/// Entitlement result plus the derived values the dashboard renders
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementView {
    pub subscription: Option<Subscription>,
    pub is_admin: bool,
    pub pro_active: bool,
    pub standard_or_above: bool,
    pub trial_days_left: Option<i64>,
}

impl EntitlementView {
    /// Derive the view with the same `now` the result was loaded at
    pub fn at(result: EntitlementResult, now: DateTime<Utc>) -> Self {
        let standard_or_above = result.standard_or_above();
        let trial_days_left = entitlements::trial_days_left_at(result.subscription.as_ref(), now);
        Self {
            subscription: result.subscription,
            is_admin: result.is_admin,
            pro_active: result.pro_active,
            standard_or_above,
            trial_days_left,
        }
    }
}

/// GET /api/subscription - `data` is null for anonymous callers
pub async fn subscription_get(
    State(state): State<AppState>,
    session: Option<Extension<Identity>>,
) -> ApiResult<Option<EntitlementView>> {
    let identity = session.map(|Extension(identity)| identity);
    let now = Utc::now();
    let result = state.loader.load_at(identity.as_ref(), now).await?;
    Ok(ApiResponse::success(result.map(|result| EntitlementView::at(result, now))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    use crate::entitlements::Plan;

    #[test]
    fn view_counts_trial_days_from_load_time() {
        let loaded_at = Utc::now();
        let sub = Subscription::new(Uuid::new_v4(), Plan::ProTrial, loaded_at)
            .with_trial(loaded_at - Duration::days(1), loaded_at + Duration::hours(1));
        let result = EntitlementResult::evaluate(Some(sub), false);

        let view = EntitlementView::at(result, loaded_at);
        assert_eq!(view.trial_days_left, Some(1));
        assert!(view.pro_active);
        assert!(view.standard_or_above);
    }
}
