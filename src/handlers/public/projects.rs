// handlers/public/projects.rs - GET /api/projects[/:id]

use axum::extract::{Path, Query, State};

use crate::database::models::Project;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{ProjectFilter, ProjectService};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Vec<Project>> {
    let projects = ProjectService::new(state.pool.clone()).list(&filter).await?;
    Ok(ApiResponse::success(projects))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Project> {
    let project = ProjectService::new(state.pool.clone()).get(&id).await?;
    Ok(ApiResponse::success(project))
}
