// src/models/user.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    authorization::{Authorization, AuthorizationView},
    safety_place::SafetyPlace,
};

const ADMIN_ROLE: &str = "ADMIN";

// Perfil de um usuário do portal (administrador ou leitor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[schema(example = "admin@banco.com.br")]
    pub email: String,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "Banco Exemplo S.A.")]
    pub company_name: String,
    #[schema(example = "12.345.678/0001-99")]
    pub tax_id: String,
    // Nomes normalizados, sem o prefixo ROLE_ (ex: "ADMIN", "READER")
    pub roles: Vec<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

/// "ROLE_ADMIN" -> "ADMIN"; "reader" -> "READER".
pub fn normalize_role(raw: &str) -> String {
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix("ROLE_").unwrap_or(trimmed);
    name.to_ascii_uppercase()
}

/// Um cliente do banco com os locais seguros que possui.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientAccount {
    pub client_id: String,
    pub safety_places: Vec<SafetyPlace>,
    pub authorization_outside_place: Option<Authorization>,
}

/// Resultado da consulta "de quem é este local seguro".
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRecord {
    pub owner_id: String,
    pub authorization_outside_place: Option<Authorization>,
}

// --- AGRUPAMENTO POR CLIENTE ---

pub const UNKNOWN_CLIENT_ID: &str = "unknown";

/// Locais seguros de um mesmo dono. Construído a cada requisição, nunca persistido.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientGroup {
    pub client_id: String,
    pub safety_places: Vec<SafetyPlace>,
    pub authorization_outside_place: Option<Authorization>,
}

impl ClientGroup {
    pub fn is_unknown(&self) -> bool {
        self.client_id == UNKNOWN_CLIENT_ID
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroupView {
    pub client_id: String,
    #[schema(example = "Id do Usuário: 42")]
    pub label: String,
    pub safety_places: Vec<SafetyPlace>,
    pub authorization_outside_place: Option<AuthorizationView>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroupsTotals {
    pub users: usize,
    pub safety_places: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroupsResponse {
    pub totals: ClientGroupsTotals,
    pub groups: Vec<ClientGroupView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_normalized() {
        assert_eq!(normalize_role("ROLE_ADMIN"), "ADMIN");
        assert_eq!(normalize_role(" reader "), "READER");
    }

    #[test]
    fn admin_detection() {
        let mut user = User {
            id: "1".into(),
            email: "a@b.com".into(),
            username: "ana".into(),
            company_name: "Banco".into(),
            tax_id: "00.000.000/0001-00".into(),
            roles: vec!["READER".into()],
        };
        assert!(!user.is_admin());
        user.roles.push("ADMIN".into());
        assert!(user.is_admin());
    }
}
