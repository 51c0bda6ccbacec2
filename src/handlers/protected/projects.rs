// handlers/protected/projects.rs - POST/PUT/DELETE /api/projects

use axum::extract::{Path, State};
use serde_json::Value;

use crate::database::models::{Project, ProjectInput};
use crate::middleware::{message, ApiResponse, ApiResult, AuthAdmin, JsonBody};
use crate::services::ProjectService;
use crate::state::AppState;

pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ProjectInput>,
) -> ApiResult<Project> {
    let project = ProjectService::new(state.pool.clone()).create(body).await?;
    tracing::info!(id = %project.id, admin = %admin.username, "project created");
    Ok(ApiResponse::success(project))
}

pub async fn replace(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ProjectInput>,
) -> ApiResult<Project> {
    let project = ProjectService::new(state.pool.clone()).replace(&id, body).await?;
    Ok(ApiResponse::success(project))
}

pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    ProjectService::new(state.pool.clone()).delete(&id).await?;
    tracing::info!(id = %id, admin = %admin.username, "project deleted");
    Ok(message("Project deleted successfully"))
}
