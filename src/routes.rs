use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::StorageBackend;
use crate::handlers::{protected, public};
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .merge(auth_routes())
        .merge(content_routes())
        .merge(contact_routes())
        .merge(upload_routes())
        .merge(notion_routes());

    if state.config.storage.backend == StorageBackend::Local {
        router = router.nest_service("/uploads", ServeDir::new(&state.config.storage.upload_dir));
    }

    let cors = cors_layer(&state.config.server.cors_origins);
    let body_limit = state.config.server.max_request_size_bytes;

    router
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(public::auth::login))
        .route("/api/auth/register", post(public::auth::register))
        .route("/api/auth/me", get(protected::auth::me))
}

fn content_routes() -> Router<AppState> {
    Router::new()
        // Projects: reads public, writes admin
        .route(
            "/api/projects",
            get(public::projects::list).post(protected::projects::create),
        )
        .route(
            "/api/projects/:id",
            get(public::projects::get)
                .put(protected::projects::replace)
                .delete(protected::projects::delete),
        )
        // Blog
        .route("/api/blog", get(public::blog::list).post(protected::blog::create))
        .route(
            "/api/blog/:id",
            get(public::blog::get)
                .put(protected::blog::replace)
                .delete(protected::blog::delete),
        )
        // Skills
        .route(
            "/api/skills",
            get(public::skills::list).post(protected::skills::create),
        )
        .route("/api/skills/bulk", post(protected::skills::create_bulk))
        .route(
            "/api/skills/:id",
            get(public::skills::get)
                .put(protected::skills::update)
                .delete(protected::skills::delete),
        )
}

fn contact_routes() -> Router<AppState> {
    Router::new().route(
        "/api/contact",
        post(public::contact::submit).get(protected::contact::list),
    )
}

fn upload_routes() -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route("/api/upload/image", post(protected::upload::image))
        .route("/api/upload/image/:filename", delete(protected::upload::delete_image))
}

fn notion_routes() -> Router<AppState> {
    Router::new()
        .route("/api/notion/page/:id", get(public::notion::page))
        .route("/api/notion/blocks/:id", get(public::notion::page))
}

/// Configured origins with credentials, or any origin when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
