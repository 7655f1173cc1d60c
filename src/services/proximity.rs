// src/services/proximity.rs

use crate::{
    common::geo::GeoPoint,
    models::{safety_place::SafetyPlace, user::ClientAccount},
};

/// Raio fixo do mapa do dashboard. A tela muda o centro, nunca o raio.
pub const PROXIMITY_RADIUS_KM: f64 = 20.0;

/// Locais e clientes que caem dentro do raio de um centro.
#[derive(Debug)]
pub struct Proximity<'a> {
    pub places: Vec<&'a SafetyPlace>,
    pub clients: Vec<&'a ClientAccount>,
}

impl Proximity<'_> {
    /// (locais no raio, clientes no raio) - o que o dashboard consome.
    pub fn counts(&self) -> (usize, usize) {
        (self.places.len(), self.clients.len())
    }
}

/// Local sem `location` nunca está no raio.
pub fn is_within_radius(center: &GeoPoint, place: &SafetyPlace) -> bool {
    place
        .location
        .is_some_and(|location| center.distance_km(&location) <= PROXIMITY_RADIUS_KM)
}

pub fn aggregate<'a>(
    center: &GeoPoint,
    places: &'a [SafetyPlace],
    clients: &'a [ClientAccount],
) -> Proximity<'a> {
    let places = places
        .iter()
        .filter(|place| is_within_radius(center, place))
        .collect();

    // Basta UM local do cliente no raio
    let clients = clients
        .iter()
        .filter(|client| {
            client
                .safety_places
                .iter()
                .any(|place| is_within_radius(center, place))
        })
        .collect();

    Proximity { places, clients }
}
