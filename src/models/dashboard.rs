// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{common::geo::GeoPoint, models::safety_place::MapMarker};

// 1. Cards do topo + gráfico de pizza
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_users: usize,
    pub safety_places: usize,
    pub wifi_registrations: usize,
    pub geo_registrations: usize,
    pub registration_types: Vec<ChartEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChartEntry {
    #[schema(example = "Wi-Fi")]
    pub name: String,
    pub value: usize,
}

// 2. Mapa de geolocalização
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProximityQuery {
    /// Latitude do centro do mapa
    pub latitude: Option<f64>,
    /// Longitude do centro do mapa
    pub longitude: Option<f64>,
    /// Nome de cidade/lugar a ser geocodificado (ex: "Aracaju")
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProximityReport {
    pub center: GeoPoint,
    #[schema(example = 20.0)]
    pub radius_km: f64,
    pub places_in_range: usize,
    pub users_in_range: usize,
    pub markers: Vec<MapMarker>,
}
