// handlers/protected/auth.rs - GET /api/auth/me

use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthAdmin};

pub async fn me(admin: AuthAdmin) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "username": admin.username })))
}
