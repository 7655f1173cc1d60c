// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Daqui para baixo tudo exige o token do backend
    let user_routes = Router::new()
        .route(
            "/me",
            get(handlers::auth::get_me).patch(handlers::auth::update_me),
        )
        .route("/me/password", put(handlers::auth::change_password))
        .route("/register", post(handlers::auth::register));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/proximity", get(handlers::dashboard::get_proximity));

    let safety_place_routes = Router::new()
        .route("/groups", get(handlers::safety_places::list_groups))
        .route("/{id}", get(handlers::safety_places::get_safety_place));

    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/safety-places", safety_place_routes)
        .layer(axum_middleware::from_fn(auth_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
