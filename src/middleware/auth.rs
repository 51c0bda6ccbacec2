use axum::{async_trait, extract::FromRequestParts, http::{request::Parts, HeaderMap}};

use crate::auth::{validate_jwt, AuthError, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Admin identity extracted from a valid bearer token
///
/// Add it as a handler argument to require authentication; requests without
/// a valid token are rejected with 401 before the handler runs.
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub username: String,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        Self { username: claims.sub }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_from_headers(&parts.headers).map_err(ApiError::unauthorized)?;

        let claims = validate_jwt(&state.config.security, &token).map_err(|e| match e {
            AuthError::InvalidToken(msg) => ApiError::unauthorized(msg),
            other => ApiError::from(other),
        })?;

        Ok(AuthAdmin::from(claims))
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_jwt_from_headers(&headers).unwrap_err(),
            "Missing Authorization header"
        );

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(extract_jwt_from_headers(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer  "));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap_err(), "Empty JWT token");
    }
}
