use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{validate_jwt, Identity};
use crate::error::ApiError;

/// Resolves the session for every request. No Authorization header means an
/// anonymous request and passes through without an `Identity` extension; a
/// header that is present but invalid is rejected.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = extract_jwt_from_headers(request.headers()).map_err(|msg| ApiError::unauthorized(msg))? {
        let identity = validate_jwt(&token, &state.config.security).map_err(|e| {
            tracing::debug!("Rejected session token: {}", e);
            ApiError::unauthorized(e.to_string())
        })?;
        request.extensions_mut().insert(identity);
    }

    Ok(next.run(request).await)
}

/// Rejects anonymous requests
pub async fn require_session(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<Identity>().is_none() {
        return Err(ApiError::unauthorized("Authentication required"));
    }
    Ok(next.run(request).await)
}

/// Extract the bearer token, `Ok(None)` when no Authorization header is sent
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        Some(_) => Err("Empty JWT token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn no_header_is_anonymous() {
        assert_eq!(extract_jwt_from_headers(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            extract_jwt_from_headers(&headers("Bearer abc.def.ghi")),
            Ok(Some("abc.def.ghi".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(extract_jwt_from_headers(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer   ")).is_err());
    }
}
