// src/models/mod.rs

pub mod progress;
pub mod quiz_item;
pub mod subject;
pub mod user;
