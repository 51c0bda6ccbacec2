// handlers/public/auth.rs - POST /api/auth/login and POST /api/auth/register

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::generate_jwt;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::services::AdminService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// POST /api/auth/login - Exchange admin credentials for an access token
///
/// 401 for an unknown user or wrong password, 403 for a disabled account.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let admin = AdminService::new(state.pool.clone())
        .authenticate(&body.username, &body.password)
        .await
        .map_err(|e| {
            tracing::info!(username = %body.username, "login rejected");
            ApiError::from(e)
        })?;

    let token = generate_jwt(&state.config.security, &admin.username)?;
    tracing::info!(username = %admin.username, "admin logged in");
    Ok(ApiResponse::success(TokenResponse::bearer(token)))
}

/// POST /api/auth/register - Create the first admin account
///
/// Only succeeds while the admins table is empty.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let admin = AdminService::new(state.pool.clone())
        .register_first(&body.username, &body.password)
        .await?;

    let token = generate_jwt(&state.config.security, &admin.username)?;
    tracing::info!(username = %admin.username, "first admin registered");
    Ok(ApiResponse::success(TokenResponse::bearer(token)))
}
