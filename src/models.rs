// src/models.rs

pub mod auth;
pub mod authorization;
pub mod dashboard;
pub mod safety_place;
pub mod user;
