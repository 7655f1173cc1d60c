// src/upstream/geocoding_repo.rs

use reqwest::Url;

use crate::{
    common::{error::AppError, geo::GeoPoint},
    upstream::wire::RawGeocodingResponse,
};

// Buscas com até 3 caracteres não são geocodificadas
const MIN_SEARCH_CHARS: usize = 4;

/// Geocoding (API de lugares do Mapbox). Só reposiciona o centro do mapa.
#[derive(Clone)]
pub struct GeocodingRepository {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl GeocodingRepository {
    pub fn new(http: reqwest::Client, base_url: &str, access_token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Nunca falha para quem chama: qualquer erro vira `None`.
    pub async fn geocode(&self, place_name: &str) -> Option<GeoPoint> {
        let place_name = place_name.trim();
        if place_name.chars().count() < MIN_SEARCH_CHARS {
            return None;
        }
        let Some(token) = self.access_token.as_deref() else {
            tracing::warn!("Geocoding desativado: GEOCODING_TOKEN não definido");
            return None;
        };

        match self.lookup(place_name, token).await {
            Ok(point) => point,
            Err(e) => {
                tracing::warn!("Erro ao buscar coordenadas de '{}': {}", place_name, e);
                None
            }
        }
    }

    async fn lookup(&self, place_name: &str, token: &str) -> Result<Option<GeoPoint>, AppError> {
        let url = self.url_for(place_name, token)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: RawGeocodingResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(format!("geocoding: {e}")))?;
        Ok(body.first_center())
    }

    fn url_for(&self, place_name: &str, token: &str) -> Result<Url, AppError> {
        let file = format!("{place_name}.json");
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("GEOCODING_API_URL inválida: {e}"))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("GEOCODING_API_URL não aceita caminho"))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", file.as_str()]);
        url.query_pairs_mut().append_pair("access_token", token);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::test_support::serve;
    use axum::{
        extract::{Path, Query},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn url_encodes_the_place_name() {
        let repo = GeocodingRepository::new(reqwest::Client::new(), "https://api.mapbox.com/", None);
        let url = repo.url_for("São Paulo", "tk").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/S%C3%A3o%20Paulo.json?access_token=tk"
        );
    }

    #[tokio::test]
    async fn short_search_or_missing_token_skips_the_call() {
        let repo = GeocodingRepository::new(reqwest::Client::new(), "http://127.0.0.1:9", Some("tk".into()));
        assert_eq!(repo.geocode("Ara").await, None);

        let no_token = GeocodingRepository::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        assert_eq!(no_token.geocode("Aracaju").await, None);
    }

    #[tokio::test]
    async fn resolves_first_feature() {
        let app = Router::new().route(
            "/geocoding/v5/mapbox.places/{file}",
            get(|Path(file): Path<String>, Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query.get("access_token").map(String::as_str), Some("tk"));
                if file == "Aracaju.json" {
                    Json(json!({ "features": [ { "center": [-37.0731, -10.9432] } ] }))
                } else {
                    Json(json!({ "features": [] }))
                }
            }),
        );
        let base = serve(app).await;
        let repo = GeocodingRepository::new(reqwest::Client::new(), &base, Some("tk".into()));

        assert_eq!(repo.geocode("Aracaju").await, Some(GeoPoint::new(-10.9432, -37.0731)));
        assert_eq!(repo.geocode("Lugar Nenhum").await, None);
    }
}
