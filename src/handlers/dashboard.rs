// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedSession, i18n::Locale},
    models::dashboard::{DashboardSummary, ProximityQuery, ProximityReport},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards de informações gerais e gráfico de tipos de cadastro", body = DashboardSummary),
        (status = 401, description = "Não autorizado"),
        (status = 502, description = "Backend indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary(&session)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/proximity
#[utoipa::path(
    get,
    path = "/api/dashboard/proximity",
    tag = "Dashboard",
    params(ProximityQuery),
    responses(
        (status = 200, description = "Locais e usuários num raio de 20 km do centro", body = ProximityReport),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_proximity(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ProximityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .dashboard_service
        .get_proximity(&session, &query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(report)))
}
