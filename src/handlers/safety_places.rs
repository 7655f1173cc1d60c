// src/handlers/safety_places.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedSession, i18n::Locale},
    models::{safety_place::SafetyPlaceDetail, user::ClientGroupsResponse},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GroupsQuery {
    /// Trecho do id do dono (busca por substring)
    pub client_id: Option<String>,
}

// GET /api/safety-places/groups
#[utoipa::path(
    get,
    path = "/api/safety-places/groups",
    tag = "Safety Places",
    params(GroupsQuery),
    responses(
        (status = 200, description = "Locais seguros agrupados por usuário", body = ClientGroupsResponse),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_groups(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<GroupsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let groups = app_state
        .safety_place_service
        .list_groups(&session, query.client_id.as_deref(), &locale)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(groups)))
}

// GET /api/safety-places/{id}
#[utoipa::path(
    get,
    path = "/api/safety-places/{id}",
    tag = "Safety Places",
    params(("id" = String, Path, description = "ID do local seguro")),
    responses(
        (status = 200, description = "Detalhe do local seguro com o dono e as autorizações", body = SafetyPlaceDetail),
        (status = 404, description = "Local seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_safety_place(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .safety_place_service
        .get_detail(&session, &id, &locale)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(detail)))
}
