// handlers/public/system.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::{IntoResponse, Json}};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::state::AppState;

/// GET / - Service name, version and endpoint index
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Portfolio API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/api/auth/login, /api/auth/register (public), /api/auth/me (admin)",
            "projects": "/api/projects[/:id] (read public, write admin)",
            "blog": "/api/blog[/:id] (read public, write admin)",
            "skills": "/api/skills[/:id], /api/skills/bulk (read public, write admin)",
            "contact": "/api/contact (submit public, list admin)",
            "upload": "/api/upload/image[/:filename] (admin)",
            "notion": "/api/notion/page/:id, /api/notion/blocks/:id (public)"
        }
    }))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match DatabaseManager::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}
