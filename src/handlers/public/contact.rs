// handlers/public/contact.rs - POST /api/contact

use std::sync::Arc;

use axum::extract::State;

use crate::database::models::{ContactMessage, ContactMessageInput};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::services::ContactService;
use crate::state::AppState;

/// Store a contact-form submission and notify the owner in the background
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ContactMessageInput>,
) -> ApiResult<ContactMessage> {
    let message = ContactService::new(state.pool.clone()).submit(body).await?;
    tracing::info!(id = message.id, "contact message stored");

    if let Some(notifier) = state.notifier.as_ref().map(Arc::clone) {
        let contact = message.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&contact).await {
                tracing::warn!(id = contact.id, "contact notification failed: {:#}", e);
            }
        });
    }

    Ok(ApiResponse::success(message))
}
