// handlers/public/blog.rs - GET /api/blog[/:id]

use axum::extract::{Path, State};

use crate::database::models::BlogPost;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::BlogService;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    let posts = BlogService::new(state.pool.clone()).list().await?;
    Ok(ApiResponse::success(posts))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<BlogPost> {
    let post = BlogService::new(state.pool.clone()).get(&id).await?;
    Ok(ApiResponse::success(post))
}
