// src/upstream.rs

pub mod client;
pub mod wire;

pub mod safety_place_repo;
pub use safety_place_repo::SafetyPlaceRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod geocoding_repo;
pub use geocoding_repo::GeocodingRepository;
