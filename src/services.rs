// src/services.rs

pub mod auth;
pub mod dashboard_service;
pub mod grouping;
pub mod proximity;
pub mod safety_place_service;
