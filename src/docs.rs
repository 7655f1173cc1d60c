// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_me,
        handlers::auth::change_password,
        handlers::auth::register,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_proximity,

        // --- Safety Places ---
        handlers::safety_places::list_groups,
        handlers::safety_places::get_safety_place,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::RegisterUserPayload,
            models::auth::UpdateProfilePayload,
            models::auth::ChangePasswordPayload,
            models::user::User,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::ChartEntry,
            models::dashboard::ProximityReport,
            crate::common::geo::GeoPoint,
            models::safety_place::MapMarker,

            // --- Safety Places ---
            models::safety_place::SafetyPlace,
            models::safety_place::Wifi,
            models::safety_place::Address,
            models::safety_place::SafetyPlaceDetail,
            models::safety_place::OwnerView,
            models::authorization::Authorization,
            models::authorization::AuthorizationView,
            models::user::ClientGroupView,
            models::user::ClientGroupsTotals,
            models::user::ClientGroupsResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login no backend de usuários"),
        (name = "Users", description = "Perfil, senha e cadastro de usuários"),
        (name = "Dashboard", description = "Informações gerais e mapa de proximidade"),
        (name = "Safety Places", description = "Locais seguros por usuário e autorizações")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
