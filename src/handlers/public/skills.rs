// handlers/public/skills.rs - GET /api/skills[/:id]

use axum::extract::{Path, Query, State};

use crate::database::models::Skill;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{SkillFilter, SkillService};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SkillFilter>,
) -> ApiResult<Vec<Skill>> {
    let skills = SkillService::new(state.pool.clone()).list(&filter).await?;
    Ok(ApiResponse::success(skills))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Skill> {
    let skill = SkillService::new(state.pool.clone()).get(id).await?;
    Ok(ApiResponse::success(skill))
}
