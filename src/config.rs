// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    services::{
        auth::AuthService, dashboard_service::DashboardService,
        safety_place_service::SafetyPlaceService,
    },
    upstream::{client::UpstreamClient, GeocodingRepository, SafetyPlaceRepository, UserRepository},
};

/// Configuração lida do ambiente (.env opcional).
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub safety_api_url: String,
    pub users_api_url: String,
    pub geocoding_api_url: String,
    pub geocoding_token: Option<String>,
    pub owner_lookup_concurrency: usize,
    pub upstream_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let owner_lookup_concurrency: usize = parse_var("OWNER_LOOKUP_CONCURRENCY", 4)?;
        let timeout_secs: u64 = parse_var("UPSTREAM_TIMEOUT_SECS", 15)?;

        Ok(Self {
            bind_addr: var_or("PORTAL_BIND_ADDR", "0.0.0.0:3000"),
            safety_api_url: var_or("SAFETY_API_URL", "http://localhost:1602"),
            users_api_url: var_or("USERS_API_URL", "http://localhost:8080"),
            geocoding_api_url: var_or("GEOCODING_API_URL", "https://api.mapbox.com"),
            geocoding_token: env::var("GEOCODING_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            owner_lookup_concurrency: owner_lookup_concurrency.max(1),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: '{raw}'")),
        _ => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub safety_place_service: SafetyPlaceService,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        // Um único cliente HTTP (pool de conexões) para todos os backends
        let http = reqwest::Client::builder()
            .timeout(settings.upstream_timeout)
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        // --- Monta o gráfico de dependências ---
        let safety_repo = SafetyPlaceRepository::new(UpstreamClient::new(
            http.clone(),
            &settings.safety_api_url,
        ));
        let user_repo = UserRepository::new(UpstreamClient::new(http.clone(), &settings.users_api_url));
        let geocoding_repo = GeocodingRepository::new(
            http,
            &settings.geocoding_api_url,
            settings.geocoding_token.clone(),
        );

        let auth_service = AuthService::new(user_repo);
        let dashboard_service = DashboardService::new(safety_repo.clone(), geocoding_repo);
        let safety_place_service = SafetyPlaceService::new(
            safety_repo.clone(),
            Arc::new(safety_repo),
            settings.owner_lookup_concurrency,
        );

        tracing::info!(
            "✅ Backends: locais seguros em {}, usuários em {}",
            settings.safety_api_url,
            settings.users_api_url
        );

        Ok(Self {
            auth_service,
            dashboard_service,
            safety_place_service,
        })
    }
}
