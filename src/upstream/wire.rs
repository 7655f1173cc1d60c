// src/upstream/wire.rs
//
// Formato cru dos backends e a conversão para os modelos tipados.
// Nada fora deste arquivo conhece `_id`, `dataInicio`, `ted`, `banksplit`...

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    common::{error::AppError, geo::GeoPoint},
    models::{
        auth::RegisterUserPayload,
        authorization::{Authorization, TransactionLimit},
        safety_place::{Address, SafetyPlace, Wifi},
        user::{normalize_role, ClientAccount, OwnerRecord, User},
    },
};

// --- LOCAL SEGURO ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSafetyPlace {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    pub name: String,
    #[serde(default)]
    pub data_inicio: Option<String>,
    #[serde(default)]
    pub wifi: Option<RawWifi>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub address: Option<RawAddress>,
    #[serde(default)]
    pub authorization_in_safety_place: Option<RawAuthorization>,
    #[serde(default)]
    pub active: Value,
    #[serde(default)]
    pub wifi_type: Option<bool>,
    #[serde(default)]
    pub location_type: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RawWifi {
    #[serde(default)]
    pub ssid: String,
    #[serde(default)]
    pub bssid: String,
    #[serde(default)]
    pub security: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub neighborhood: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthorization {
    #[serde(default)]
    pub register_virtual_card: Option<bool>,
    #[serde(default)]
    pub loan: Option<Decimal>,
    #[serde(default)]
    pub pix: Option<Decimal>,
    #[serde(default)]
    pub ted: Option<Decimal>,
    #[serde(default)]
    pub banksplit: Option<Decimal>,
    #[serde(default)]
    pub change_password: Option<bool>,
}

impl TryFrom<RawAuthorization> for Authorization {
    type Error = AppError;

    fn try_from(raw: RawAuthorization) -> Result<Self, Self::Error> {
        Ok(Self {
            can_register_virtual_card: raw.register_virtual_card.unwrap_or(false),
            loan_limit: limit("loan", raw.loan)?,
            pix_limit: limit("pix", raw.pix)?,
            wire_limit: limit("ted", raw.ted)?,
            split_limit: limit("banksplit", raw.banksplit)?,
            can_change_password: raw.change_password.unwrap_or(false),
        })
    }
}

fn limit(field: &str, value: Option<Decimal>) -> Result<Option<TransactionLimit>, AppError> {
    value
        .map(TransactionLimit::try_from)
        .transpose()
        .map_err(|_| AppError::MalformedResponse(format!("limite '{field}' fora de -1, 0 ou positivo")))
}

impl TryFrom<RawSafetyPlace> for SafetyPlace {
    type Error = AppError;

    fn try_from(raw: RawSafetyPlace) -> Result<Self, Self::Error> {
        let id = raw
            .mongo_id
            .as_ref()
            .and_then(id_text)
            .or_else(|| raw.id.as_ref().and_then(id_text))
            .ok_or_else(|| AppError::MalformedResponse(format!("local seguro '{}' sem id", raw.name)))?;

        // Data ilegível não derruba a listagem: o local fica sem data
        let start_date = raw.data_inicio.as_deref().and_then(|text| match parse_timestamp(text) {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!("⚠️ dataInicio ilegível em '{}' ({id}): {text:?}", raw.name);
                None
            }
        });

        // Coordenada faltando = sem localização, não é erro
        let location = raw.location.and_then(|location| match (location.lat, location.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(GeoPoint::new(lat, lng)),
            _ => None,
        });

        let authorization_in_place = raw
            .authorization_in_safety_place
            .map(Authorization::try_from)
            .transpose()?;

        Ok(Self {
            id,
            name: raw.name,
            start_date,
            wifi: raw.wifi.map(|wifi| Wifi {
                ssid: wifi.ssid,
                bssid: wifi.bssid,
                security_protocol: wifi.security.unwrap_or_default(),
            }),
            location,
            address: raw.address.map(|address| Address {
                street: address.street,
                city: address.city,
                state: address.state,
                country: address.country,
                postal_code: address.postal_code,
                number: address.number.as_ref().and_then(id_text),
                neighborhood: address.neighborhood,
            }),
            authorization_in_place,
            wifi_enabled: raw.wifi_type.unwrap_or(false),
            location_enabled: raw.location_type.unwrap_or(false),
            active: matches!(raw.active, Value::Bool(true)),
        })
    }
}

pub fn parse_safety_places(raw: Vec<RawSafetyPlace>) -> Result<Vec<SafetyPlace>, AppError> {
    raw.into_iter().map(SafetyPlace::try_from).collect()
}

// --- CLIENTE / DONO ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClientAccount {
    pub client_id: Value,
    #[serde(default)]
    pub safety_places: Option<Vec<RawSafetyPlace>>,
    #[serde(default)]
    pub authorization_out_safety_place: Option<RawAuthorization>,
}

impl TryFrom<RawClientAccount> for ClientAccount {
    type Error = AppError;

    fn try_from(raw: RawClientAccount) -> Result<Self, Self::Error> {
        let client_id = id_text(&raw.client_id)
            .ok_or_else(|| AppError::MalformedResponse("cliente sem clientId".into()))?;

        Ok(Self {
            client_id,
            safety_places: parse_safety_places(raw.safety_places.unwrap_or_default())?,
            authorization_outside_place: raw
                .authorization_out_safety_place
                .map(Authorization::try_from)
                .transpose()?,
        })
    }
}

impl TryFrom<RawClientAccount> for OwnerRecord {
    type Error = AppError;

    fn try_from(raw: RawClientAccount) -> Result<Self, Self::Error> {
        let owner_id = id_text(&raw.client_id)
            .ok_or_else(|| AppError::MalformedResponse("dono sem clientId".into()))?;

        Ok(Self {
            owner_id,
            authorization_outside_place: raw
                .authorization_out_safety_place
                .map(Authorization::try_from)
                .transpose()?,
        })
    }
}

// --- USUÁRIO DO PORTAL ---

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRole {
    Named { name: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: Value,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub roles: Vec<RawRole>,
}

impl TryFrom<RawUser> for User {
    type Error = AppError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = id_text(&raw.id)
            .ok_or_else(|| AppError::MalformedResponse("usuário sem id".into()))?;

        let roles = raw
            .roles
            .iter()
            .map(|role| match role {
                RawRole::Named { name } => normalize_role(name),
                RawRole::Plain(name) => normalize_role(name),
            })
            .collect();

        Ok(Self {
            id,
            email: raw.email,
            username: raw.username,
            company_name: raw.company_name,
            tax_id: raw.cnpj,
            roles,
        })
    }
}

// Corpo enviado ao backend de usuários no cadastro.
// O novo usuário herda a empresa (nome e CNPJ) de quem o cadastra.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRegisterRequest<'a> {
    pub company_name: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub role: &'a [String],
    pub cnpj: &'a str,
}

impl<'a> RawRegisterRequest<'a> {
    pub fn new(payload: &'a RegisterUserPayload, admin: &'a User) -> Self {
        Self {
            company_name: &admin.company_name,
            email: &payload.email,
            username: &payload.username,
            password: &payload.password,
            role: &payload.roles,
            cnpj: &admin.tax_id,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct RawUpdateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct RawLoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

// --- GEOCODING ---

#[derive(Debug, Deserialize)]
pub struct RawGeocodingResponse {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
pub struct RawFeature {
    // [longitude, latitude]
    #[serde(default)]
    pub center: Vec<f64>,
}

impl RawGeocodingResponse {
    pub fn first_center(&self) -> Option<GeoPoint> {
        let feature = self.features.first()?;
        match feature.center.as_slice() {
            [lng, lat, ..] => Some(GeoPoint::new(*lat, *lng)),
            _ => None,
        }
    }
}

// --- AUXILIARES ---

/// Ids chegam como string ou número, dependendo do backend.
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Aceita RFC 3339, data-hora sem fuso (tratada como UTC) ou só a data.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(at.and_utc());
    }
    if let Some(at) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(at.and_utc());
    }
    Err(AppError::MalformedResponse(format!("data inválida: {text}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_place(value: Value) -> Result<SafetyPlace, AppError> {
        let raw: RawSafetyPlace = serde_json::from_value(value).unwrap();
        SafetyPlace::try_from(raw)
    }

    #[test]
    fn full_safety_place() {
        let place = parse_place(json!({
            "_id": "665f1c2e",
            "name": "Agência Centro",
            "dataInicio": "2024-05-01T10:30:00",
            "wifi": { "ssid": "Loja", "bssid": "aa:bb", "security": "WPA2" },
            "location": { "lat": -10.9432, "lng": -37.0731 },
            "address": { "street": "Rua A", "city": "Aracaju", "state": "SE", "country": "Brasil", "number": 120 },
            "authorizationInSafetyPlace": {
                "registerVirtualCard": true, "loan": 500, "pix": -1, "ted": 0, "banksplit": 1500.5,
                "changePassword": false
            },
            "active": true,
            "wifiType": true,
            "locationType": true
        }))
        .unwrap();

        assert_eq!(place.id, "665f1c2e");
        assert_eq!(place.location, Some(GeoPoint::new(-10.9432, -37.0731)));
        assert_eq!(place.wifi.unwrap().security_protocol, "WPA2");
        assert_eq!(place.address.unwrap().number.as_deref(), Some("120"));
        assert_eq!(
            place.start_date.map(|d| d.to_rfc3339()),
            Some("2024-05-01T10:30:00+00:00".to_string())
        );
        let auth = place.authorization_in_place.unwrap();
        assert_eq!(auth.pix_limit, Some(TransactionLimit::Unlimited));
        assert_eq!(auth.wire_limit, Some(TransactionLimit::Blocked));
        assert!(place.active);
        assert!(place.wifi_enabled && place.location_enabled);
    }

    #[test]
    fn id_falls_back_to_plain_id() {
        let place = parse_place(json!({ "id": 42, "name": "Sem underscore" })).unwrap();
        assert_eq!(place.id, "42");
        assert!(place.location.is_none() && place.wifi.is_none());
        assert!(!place.active);
    }

    #[test]
    fn partial_location_counts_as_absent() {
        let place = parse_place(json!({ "_id": "x", "name": "n", "location": { "lat": -10.9 } })).unwrap();
        assert!(place.location.is_none());
    }

    #[test]
    fn unreadable_start_date_is_dropped() {
        let place = parse_place(json!({ "_id": "x", "name": "n", "dataInicio": "ontem" })).unwrap();
        assert_eq!(place.id, "x");
        assert!(place.start_date.is_none());
    }

    #[test]
    fn missing_id_is_malformed() {
        let err = parse_place(json!({ "name": "sem id" })).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn bogus_negative_limit_is_malformed() {
        let err = parse_place(json!({
            "_id": "x", "name": "n",
            "authorizationInSafetyPlace": { "loan": -7 }
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn roles_accept_objects_and_strings() {
        let raw: RawUser = serde_json::from_value(json!({
            "id": "u1", "email": "a@b.com", "username": "ana", "companyName": "Banco",
            "cnpj": "12.345.678/0001-99",
            "roles": [ { "id": null, "name": "ROLE_ADMIN" }, "ROLE_READER" ]
        }))
        .unwrap();
        let user = User::try_from(raw).unwrap();
        assert_eq!(user.roles, vec!["ADMIN", "READER"]);
        assert!(user.is_admin());
        assert_eq!(user.tax_id, "12.345.678/0001-99");
    }

    #[test]
    fn register_request_takes_the_company_from_the_admin() {
        let payload = RegisterUserPayload {
            email: "n@b.com".into(),
            username: "novo".into(),
            password: "segredo".into(),
            roles: vec!["ROLE_READER".into()],
        };
        let admin = User {
            id: "1".into(),
            email: "admin@banco.com.br".into(),
            username: "admin".into(),
            company_name: "Banco".into(),
            tax_id: "123".into(),
            roles: vec!["ADMIN".into()],
        };
        let body = serde_json::to_value(RawRegisterRequest::new(&payload, &admin)).unwrap();
        assert_eq!(body["companyName"], "Banco");
        assert_eq!(body["role"], json!(["ROLE_READER"]));
        assert_eq!(body["cnpj"], "123");
        assert_eq!(body["email"], "n@b.com");
    }

    #[test]
    fn geocoding_center_is_lng_lat() {
        let raw: RawGeocodingResponse = serde_json::from_value(json!({
            "features": [ { "center": [-37.07, -10.94] } ]
        }))
        .unwrap();
        assert_eq!(raw.first_center(), Some(GeoPoint::new(-10.94, -37.07)));

        let empty: RawGeocodingResponse = serde_json::from_value(json!({ "features": [] })).unwrap();
        assert_eq!(empty.first_center(), None);
    }

    #[test]
    fn timestamps() {
        assert!(parse_timestamp("2024-05-01T10:30:00Z").is_ok());
        assert!(parse_timestamp("2024-05-01").is_ok());
        assert!(parse_timestamp("ontem").is_err());
    }
}
