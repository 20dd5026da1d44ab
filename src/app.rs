use axum::{
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AdminAllowList, AdminCheck, AdminGate};
use crate::config::AppConfig;
use crate::database::{HealthCheck, ProfileRepository, SubscriptionRepository};
use crate::handlers;
use crate::middleware::{require_admin, require_session, session_middleware};
use crate::services::SubscriptionLoader;
use crate::youtube::YouTubeClient;

/// Shared request-handler dependencies. Everything here is stateless
/// apart from the store behind the repositories.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub admin: Arc<dyn AdminCheck>,
    pub loader: Arc<SubscriptionLoader>,
    pub health: Arc<dyn HealthCheck>,
    pub youtube: Arc<YouTubeClient>,
}

impl AppState {
    /// Wire the admin gate and subscription loader over one store
    pub fn new<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: SubscriptionRepository + ProfileRepository + HealthCheck + 'static,
    {
        let allow_list = AdminAllowList::parse(&config.security.admin_emails);
        tracing::info!("Admin allow-list loaded with {} entries", allow_list.len());

        let admin: Arc<dyn AdminCheck> = Arc::new(AdminGate::new(allow_list, store.clone()));
        let loader = Arc::new(SubscriptionLoader::new(store.clone(), admin.clone()));
        let youtube = Arc::new(YouTubeClient::new(&config.youtube));

        Self {
            config: Arc::new(config),
            admin,
            loader,
            health: store,
            youtube,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .merge(subscription_routes())
        .merge(youtube_routes())
        .merge(auth_routes())
        .merge(admin_routes(state.clone()))
        // Global middleware: optional session on every request
        .layer(from_fn_with_state(state.clone(), session_middleware))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn subscription_routes() -> Router<AppState> {
    use handlers::protected::subscription;

    // anonymous callers get `data: null` rather than a 401
    Router::new().route("/api/subscription", get(subscription::subscription_get))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/whoami", get(handlers::protected::whoami))
        .route_layer(from_fn(require_session))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::elevated::entitlements;

    Router::new()
        .route("/api/admin/entitlements/:user_id", get(entitlements::user_entitlement_get))
        .route_layer(from_fn_with_state(state, require_admin))
}

fn youtube_routes() -> Router<AppState> {
    use handlers::public::youtube;

    Router::new()
        .route("/api/youtube/channel-thumbnail", get(youtube::channel_thumbnail))
        .route("/api/youtube/playlist-items", get(youtube::playlist_items))
        .route("/api/youtube/playlists", get(youtube::playlists))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}
