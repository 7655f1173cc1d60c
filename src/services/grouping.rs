// src/services/grouping.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    common::error::AppError,
    middleware::auth::Session,
    models::{
        safety_place::SafetyPlace,
        user::{ClientGroup, OwnerRecord, UNKNOWN_CLIENT_ID},
    },
};

/// "De quem é este local seguro?" - pode falhar a cada chamada.
#[async_trait]
pub trait OwnerLookup: Send + Sync {
    async fn owner_of(&self, session: &Session, safety_place_id: &str) -> Result<OwnerRecord, AppError>;
}

/// Agrupa os locais seguros por dono, na ordem em que cada dono aparece.
///
/// As consultas de dono rodam em paralelo (no máximo `concurrency` ao mesmo
/// tempo), mas o resultado é montado na ordem da entrada, então é igual ao
/// de um laço sequencial. Falha na consulta manda o local para o grupo
/// `"unknown"` e o agrupamento continua.
pub async fn group_by_owner(
    lookup: Arc<dyn OwnerLookup>,
    session: &Session,
    places: Vec<SafetyPlace>,
    concurrency: usize,
) -> Vec<ClientGroup> {
    let owners = resolve_owners(lookup, session, &places, concurrency).await;

    let mut groups: Vec<ClientGroup> = Vec::new();
    let mut slot_by_owner: HashMap<String, usize> = HashMap::new();

    for (place, owner) in places.into_iter().zip(owners) {
        let (owner_id, authorization) = match owner {
            Some(Ok(owner)) => (owner.owner_id, owner.authorization_outside_place),
            Some(Err(e)) => {
                tracing::warn!("Erro ao buscar o dono do local seguro {}: {}", place.id, e);
                (UNKNOWN_CLIENT_ID.to_string(), None)
            }
            None => (UNKNOWN_CLIENT_ID.to_string(), None),
        };

        let slot = match slot_by_owner.get(&owner_id) {
            Some(&slot) => slot,
            None => {
                groups.push(ClientGroup {
                    client_id: owner_id.clone(),
                    safety_places: Vec::new(),
                    authorization_outside_place: authorization,
                });
                slot_by_owner.insert(owner_id, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].safety_places.push(place);
    }

    groups
}

// Um resultado por local, na mesma posição da entrada.
// `None` = a task da consulta morreu antes de responder.
async fn resolve_owners(
    lookup: Arc<dyn OwnerLookup>,
    session: &Session,
    places: &[SafetyPlace],
    concurrency: usize,
) -> Vec<Option<Result<OwnerRecord, AppError>>> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, place) in places.iter().enumerate() {
        let lookup = lookup.clone();
        let session = session.clone();
        let permits = permits.clone();
        let place_id = place.id.clone();

        tasks.spawn(async move {
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => lookup.owner_of(&session, &place_id).await,
                Err(e) => Err(AppError::InternalServerError(e.into())),
            };
            (index, outcome)
        });
    }

    let mut owners: Vec<Option<Result<OwnerRecord, AppError>>> =
        std::iter::repeat_with(|| None).take(places.len()).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => owners[index] = Some(outcome),
            Err(e) => tracing::error!("🔥 Task de consulta de dono falhou: {}", e),
        }
    }

    owners
}
