// src/store/mod.rs
//
// Thin async query modules over the SQLite pool. Each function takes any
// `sqlx` executor so callers can pass either the pool or an open transaction.

pub mod catalog;
pub mod progress;
pub mod sessions;
pub mod users;
