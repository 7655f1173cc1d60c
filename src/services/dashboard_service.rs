// src/services/dashboard_service.rs

use crate::{
    common::{
        error::AppError,
        geo::{GeoPoint, DEFAULT_CENTER},
    },
    middleware::auth::Session,
    models::{
        dashboard::{ChartEntry, DashboardSummary, ProximityQuery, ProximityReport},
        safety_place::{MapMarker, SafetyPlace},
        user::ClientAccount,
    },
    services::proximity::{aggregate, PROXIMITY_RADIUS_KM},
    upstream::{GeocodingRepository, SafetyPlaceRepository},
};

#[derive(Clone)]
pub struct DashboardService {
    safety_repo: SafetyPlaceRepository,
    geocoding_repo: GeocodingRepository,
}

impl DashboardService {
    pub fn new(safety_repo: SafetyPlaceRepository, geocoding_repo: GeocodingRepository) -> Self {
        Self {
            safety_repo,
            geocoding_repo,
        }
    }

    // Locais e clientes vêm do mesmo backend; as duas chamadas saem juntas
    async fn load(&self, session: &Session) -> Result<(Vec<SafetyPlace>, Vec<ClientAccount>), AppError> {
        tokio::try_join!(
            self.safety_repo.list_safety_places(session),
            self.safety_repo.list_users(session),
        )
    }

    pub async fn get_summary(&self, session: &Session) -> Result<DashboardSummary, AppError> {
        let (places, clients) = self.load(session).await?;
        Ok(summarize(&places, &clients))
    }

    pub async fn get_proximity(
        &self,
        session: &Session,
        query: &ProximityQuery,
    ) -> Result<ProximityReport, AppError> {
        let geocoded = match query.search.as_deref() {
            Some(search) => self.geocoding_repo.geocode(search).await,
            None => None,
        };
        let center = resolve_center(geocoded, query);

        let (places, clients) = self.load(session).await?;
        let (places_in_range, users_in_range) = aggregate(&center, &places, &clients).counts();

        Ok(ProximityReport {
            center,
            radius_km: PROXIMITY_RADIUS_KM,
            places_in_range,
            users_in_range,
            markers: places.iter().filter_map(MapMarker::from_place).collect(),
        })
    }
}

pub fn summarize(places: &[SafetyPlace], clients: &[ClientAccount]) -> DashboardSummary {
    let wifi_registrations = places.iter().filter(|place| place.wifi.is_some()).count();
    let geo_registrations = places.iter().filter(|place| place.location.is_some()).count();

    DashboardSummary {
        active_users: clients.len(),
        safety_places: places.len(),
        wifi_registrations,
        geo_registrations,
        registration_types: vec![
            ChartEntry { name: "Wi-Fi".to_string(), value: wifi_registrations },
            ChartEntry { name: "Geolocalização".to_string(), value: geo_registrations },
        ],
    }
}

/// Centro do mapa: busca geocodificada > coordenadas da query > Aracaju.
pub fn resolve_center(geocoded: Option<GeoPoint>, query: &ProximityQuery) -> GeoPoint {
    if let Some(point) = geocoded {
        return point;
    }
    match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
            GeoPoint::new(latitude, longitude)
        }
        _ => DEFAULT_CENTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::safety_place::Wifi,
        services::proximity::tests::place,
    };

    #[test]
    fn summary_counts_wifi_and_geo_separately() {
        let mut both = place("a", Some((-10.9, -37.0)));
        both.wifi = Some(Wifi {
            ssid: "Loja".into(),
            bssid: "00:11:22:33:44:55".into(),
            security_protocol: "WPA2".into(),
        });
        let geo_only = place("b", Some((-10.8, -37.0)));
        let neither = place("c", None);

        let summary = summarize(&[both, geo_only, neither], &[]);
        assert_eq!(summary.safety_places, 3);
        assert_eq!(summary.wifi_registrations, 1);
        assert_eq!(summary.geo_registrations, 2);
        assert_eq!(summary.active_users, 0);
        assert_eq!(summary.registration_types[0].name, "Wi-Fi");
        assert_eq!(summary.registration_types[1].value, 2);
    }

    #[test]
    fn center_fallbacks() {
        let query = ProximityQuery {
            latitude: Some(-23.55),
            longitude: Some(-46.63),
            search: Some("Recife".into()),
        };
        let recife = GeoPoint::new(-8.05, -34.88);

        assert_eq!(resolve_center(Some(recife), &query), recife);
        assert_eq!(resolve_center(None, &query), GeoPoint::new(-23.55, -46.63));

        let half = ProximityQuery { latitude: Some(-23.55), ..Default::default() };
        assert_eq!(resolve_center(None, &half), DEFAULT_CENTER);
        assert_eq!(resolve_center(None, &ProximityQuery::default()), DEFAULT_CENTER);
    }
}
