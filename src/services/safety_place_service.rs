// src/services/safety_place_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    middleware::{auth::Session, i18n::Locale},
    models::{
        authorization::AuthorizationView,
        safety_place::{OwnerView, SafetyPlaceDetail},
        user::{ClientGroup, ClientGroupView, ClientGroupsResponse, ClientGroupsTotals},
    },
    services::grouping::{group_by_owner, OwnerLookup},
    upstream::SafetyPlaceRepository,
};

const UNKNOWN_CLIENT_LABEL: &str = "Usuário Não Identificado";

#[derive(Clone)]
pub struct SafetyPlaceService {
    repo: SafetyPlaceRepository,
    owner_lookup: Arc<dyn OwnerLookup>,
    lookup_concurrency: usize,
}

impl SafetyPlaceService {
    pub fn new(
        repo: SafetyPlaceRepository,
        owner_lookup: Arc<dyn OwnerLookup>,
        lookup_concurrency: usize,
    ) -> Self {
        Self {
            repo,
            owner_lookup,
            lookup_concurrency,
        }
    }

    /// Locais seguros agrupados por dono, opcionalmente filtrados pelo id do dono.
    pub async fn list_groups(
        &self,
        session: &Session,
        client_filter: Option<&str>,
        locale: &Locale,
    ) -> Result<ClientGroupsResponse, AppError> {
        let places = self.repo.list_safety_places(session).await?;
        let groups = group_by_owner(
            self.owner_lookup.clone(),
            session,
            places,
            self.lookup_concurrency,
        )
        .await;

        Ok(present_groups(groups, client_filter, locale))
    }

    pub async fn get_detail(
        &self,
        session: &Session,
        safety_place_id: &str,
        locale: &Locale,
    ) -> Result<SafetyPlaceDetail, AppError> {
        let safety_place = self
            .repo
            .list_safety_places(session)
            .await?
            .into_iter()
            .find(|place| place.id == safety_place_id)
            .ok_or_else(|| AppError::NotFound(format!("Local seguro {safety_place_id}")))?;

        // Sem dono o detalhe ainda é exibido
        let owner = match self.owner_lookup.owner_of(session, &safety_place.id).await {
            Ok(owner) => Some(OwnerView {
                client_id: owner.owner_id,
                authorization_outside_place: owner
                    .authorization_outside_place
                    .as_ref()
                    .map(|authorization| AuthorizationView::render(authorization, locale)),
            }),
            Err(e) => {
                tracing::warn!("Erro ao buscar o dono do local seguro {}: {}", safety_place.id, e);
                None
            }
        };

        let authorization_in_place = safety_place
            .authorization_in_place
            .as_ref()
            .map(|authorization| AuthorizationView::render(authorization, locale));

        Ok(SafetyPlaceDetail {
            safety_place,
            authorization_in_place,
            owner,
        })
    }
}

pub fn group_label(group: &ClientGroup) -> String {
    if group.is_unknown() {
        UNKNOWN_CLIENT_LABEL.to_string()
    } else {
        format!("Id do Usuário: {}", group.client_id)
    }
}

/// Filtro por trecho do id do dono + rótulos + totais da tela.
pub fn present_groups(
    groups: Vec<ClientGroup>,
    client_filter: Option<&str>,
    locale: &Locale,
) -> ClientGroupsResponse {
    let filter = client_filter.map(str::trim).filter(|f| !f.is_empty());

    let groups: Vec<ClientGroupView> = groups
        .into_iter()
        .filter(|group| filter.is_none_or(|f| group.client_id.contains(f)))
        .map(|group| ClientGroupView {
            label: group_label(&group),
            authorization_outside_place: group
                .authorization_outside_place
                .as_ref()
                .map(|authorization| AuthorizationView::render(authorization, locale)),
            client_id: group.client_id,
            safety_places: group.safety_places,
        })
        .collect();

    let totals = ClientGroupsTotals {
        users: groups.len(),
        safety_places: groups.iter().map(|group| group.safety_places.len()).sum(),
    };

    ClientGroupsResponse { totals, groups }
}
