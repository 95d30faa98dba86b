// src/handlers/mod.rs

pub mod auth;
pub mod award;
pub mod dashboard;
pub mod quiz;
