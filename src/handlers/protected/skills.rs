// handlers/protected/skills.rs - POST/PUT/DELETE /api/skills and POST /api/skills/bulk

use axum::extract::{Path, State};
use serde_json::Value;

use crate::database::models::{Skill, SkillInput, SkillUpdate};
use crate::middleware::{message, ApiResponse, ApiResult, AuthAdmin, JsonBody};
use crate::services::SkillService;
use crate::state::AppState;

pub async fn create(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SkillInput>,
) -> ApiResult<Skill> {
    let skill = SkillService::new(state.pool.clone()).create(body).await?;
    Ok(ApiResponse::success(skill))
}

/// Names that already exist are skipped; only created skills are returned
pub async fn create_bulk(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Vec<SkillInput>>,
) -> ApiResult<Vec<Skill>> {
    let skills = SkillService::new(state.pool.clone()).create_bulk(body).await?;
    Ok(ApiResponse::success(skills))
}

pub async fn update(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<SkillUpdate>,
) -> ApiResult<Skill> {
    let skill = SkillService::new(state.pool.clone()).update(id, body).await?;
    Ok(ApiResponse::success(skill))
}

pub async fn delete(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Value> {
    SkillService::new(state.pool.clone()).delete(id).await?;
    Ok(message("Skill deleted successfully"))
}
