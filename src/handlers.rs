// src/handlers.rs

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod jobs;
pub mod reports;
