// handlers/public/notion.rs - GET /api/notion/page/:id and /api/notion/blocks/:id

use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::notion::PageDocument;
use crate::state::AppState;

/// Page metadata plus its full block tree.
///
/// The token check happens before any outbound request. A failed root lookup
/// relays the upstream status; failures deeper in the tree return 200 with
/// `complete: false` and the affected nodes listed under `truncated`.
pub async fn page(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<PageDocument> {
    let fetcher = state.notion()?;
    let document = fetcher.fetch_document(&id).await.map_err(|e| {
        tracing::warn!(page_id = %id, "notion page fetch failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(ApiResponse::success(document))
}
