// handlers/protected/blog.rs - POST/PUT/DELETE /api/blog

use axum::extract::{Path, State};
use serde_json::Value;

use crate::database::models::{BlogPost, BlogPostInput};
use crate::middleware::{message, ApiResponse, ApiResult, AuthAdmin, JsonBody};
use crate::services::BlogService;
use crate::state::AppState;

pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BlogPostInput>,
) -> ApiResult<BlogPost> {
    let post = BlogService::new(state.pool.clone()).create(body).await?;
    tracing::info!(id = %post.id, admin = %admin.username, "blog post created");
    Ok(ApiResponse::success(post))
}

pub async fn replace(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<BlogPostInput>,
) -> ApiResult<BlogPost> {
    let post = BlogService::new(state.pool.clone()).replace(&id, body).await?;
    Ok(ApiResponse::success(post))
}

pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    BlogService::new(state.pool.clone()).delete(&id).await?;
    tracing::info!(id = %id, admin = %admin.username, "blog post deleted");
    Ok(message("Blog post deleted successfully"))
}
