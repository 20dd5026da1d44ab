pub mod admin;
pub mod auth;
pub mod response;

pub use admin::require_admin;
pub use auth::{require_session, session_middleware};
pub use response::{ApiResponse, ApiResult};
