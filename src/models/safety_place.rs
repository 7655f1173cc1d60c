// src/models/safety_place.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::geo::GeoPoint,
    models::authorization::{Authorization, AuthorizationView},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Wifi {
    #[schema(example = "LojaCentro")]
    pub ssid: String,
    #[schema(example = "a4:2b:b0:11:22:33")]
    pub bssid: String,
    #[schema(example = "WPA2")]
    pub security_protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[schema(example = "Av. Beira Mar")]
    pub street: String,
    #[schema(example = "Aracaju")]
    pub city: String,
    #[schema(example = "SE")]
    pub state: String,
    #[schema(example = "Brasil")]
    pub country: String,
    pub postal_code: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
}

/// Um local seguro: endereço físico e/ou rede WiFi cadastrada.
///
/// `wifi` e `location` são independentes: o registro pode ter os dois,
/// só um, ou nenhum ("sem informação de localização").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyPlace {
    #[schema(example = "665f1c2e9b1d4a0012ab34cd")]
    pub id: String,
    #[schema(example = "Agência Centro")]
    pub name: String,
    pub start_date: Option<DateTime<Utc>>,

    pub wifi: Option<Wifi>,
    pub location: Option<GeoPoint>,
    pub address: Option<Address>,
    pub authorization_in_place: Option<Authorization>,

    pub wifi_enabled: bool,
    pub location_enabled: bool,
    pub active: bool,
}

// --- MAPA ---

/// Marcador de um local seguro no mapa do dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl MapMarker {
    pub fn from_place(place: &SafetyPlace) -> Option<Self> {
        let location = place.location?;
        Some(Self {
            id: place.id.clone(),
            name: place.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }
}

// --- DETALHE ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub client_id: String,
    pub authorization_outside_place: Option<AuthorizationView>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyPlaceDetail {
    pub safety_place: SafetyPlace,
    pub authorization_in_place: Option<AuthorizationView>,
    // Nulo quando o dono não pôde ser resolvido
    pub owner: Option<OwnerView>,
}
