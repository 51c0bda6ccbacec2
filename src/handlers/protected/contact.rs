// handlers/protected/contact.rs - GET /api/contact

use axum::extract::State;

use crate::database::models::ContactMessage;
use crate::middleware::{ApiResponse, ApiResult, AuthAdmin};
use crate::services::ContactService;
use crate::state::AppState;

pub async fn list(_admin: AuthAdmin, State(state): State<AppState>) -> ApiResult<Vec<ContactMessage>> {
    let messages = ContactService::new(state.pool.clone()).list().await?;
    Ok(ApiResponse::success(messages))
}
