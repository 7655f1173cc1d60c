// src/upstream/safety_place_repo.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    common::error::AppError,
    middleware::auth::Session,
    models::{
        safety_place::SafetyPlace,
        user::{ClientAccount, OwnerRecord},
    },
    services::grouping::OwnerLookup,
    upstream::{
        client::UpstreamClient,
        wire::{parse_safety_places, RawClientAccount, RawSafetyPlace},
    },
};

// O repositório do backend de locais seguros (também lista os clientes)
#[derive(Clone)]
pub struct SafetyPlaceRepository {
    client: UpstreamClient,
}

impl SafetyPlaceRepository {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn list_safety_places(&self, session: &Session) -> Result<Vec<SafetyPlace>, AppError> {
        let request = self
            .client
            .request(Method::GET, "/safetyPlace/get-cnpj", Some(session));
        let raw: Vec<RawSafetyPlace> = self.client.fetch(request, "Locais seguros").await?;
        parse_safety_places(raw)
    }

    pub async fn list_users(&self, session: &Session) -> Result<Vec<ClientAccount>, AppError> {
        let request = self.client.request(Method::GET, "/user/get-all", Some(session));
        let raw: Vec<RawClientAccount> = self.client.fetch(request, "Usuários").await?;
        raw.into_iter().map(ClientAccount::try_from).collect()
    }

    // Busca o dono (cliente) de um local seguro
    pub async fn find_owner(
        &self,
        session: &Session,
        safety_place_id: &str,
    ) -> Result<OwnerRecord, AppError> {
        let url = self
            .client
            .segments_url(&["safetyPlace", "getUserFromId", safety_place_id])?;
        let request = self.client.request_to(Method::GET, url, Some(session));
        let raw: RawClientAccount = self.client.fetch(request, "Usuário").await?;
        OwnerRecord::try_from(raw)
    }
}

#[async_trait]
impl OwnerLookup for SafetyPlaceRepository {
    async fn owner_of(&self, session: &Session, safety_place_id: &str) -> Result<OwnerRecord, AppError> {
        self.find_owner(session, safety_place_id).await
    }
}
