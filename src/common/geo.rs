// src/common/geo.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raio médio da Terra usado pela fórmula de haversine.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// Centro padrão do mapa (Aracaju)
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    latitude: -10.9432,
    longitude: -37.0731,
};

/// Um ponto WGS84 em graus decimais.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    #[schema(example = -10.9432)]
    pub latitude: f64,
    #[schema(example = -37.0731)]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Distância de grande círculo (haversine) entre dois pares lat/lon, em km.
///
/// Não valida as faixas de entrada: coordenadas fora de [-90, 90] / [-180, 180]
/// produzem um número bem definido, porém sem significado.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARACAJU: (f64, f64) = (-10.9432, -37.0731);

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(ARACAJU.0, ARACAJU.1, ARACAJU.0, ARACAJU.1), 0.0);
        assert_eq!(distance_km(45.0, 170.0, 45.0, 170.0), 0.0);
    }

    #[test]
    fn is_symmetric() {
        let pairs = [
            ((-10.9432, -37.0731), (-23.5505, -46.6333)),
            ((51.5074, -0.1278), (40.7128, -74.0060)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let there = distance_km(lat1, lon1, lat2, lon2);
            let back = distance_km(lat2, lon2, lat1, lon1);
            assert!((there - back).abs() < 1e-9, "{there} != {back}");
        }
    }

    #[test]
    fn tenth_of_a_degree_north_is_about_11_km() {
        let d = distance_km(ARACAJU.0, ARACAJU.1, -10.8432, -37.0731);
        assert!((d - 11.1).abs() < 0.2, "got {d}");
    }

    #[test]
    fn crosses_the_antimeridian_the_short_way() {
        let d = GeoPoint::new(0.0, 179.9).distance_km(&GeoPoint::new(0.0, -179.9));
        assert!(d < 25.0, "got {d}");
    }
}
