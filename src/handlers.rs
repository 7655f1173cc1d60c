// src/handlers.rs

pub mod auth;
pub mod dashboard;
pub mod safety_places;
