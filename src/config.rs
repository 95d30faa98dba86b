// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    /// Upper bound on the XP a single `/api/award` call may grant.
    pub max_award_xp: i64,
    pub demo_teacher_username: Option<String>,
    pub demo_teacher_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let max_award_xp = env::var("MAX_AWARD_XP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let demo_teacher_username = env::var("DEMO_TEACHER_USERNAME").ok();
        let demo_teacher_password = env::var("DEMO_TEACHER_PASSWORD").ok();

        Self {
            database_url,
            rust_log,
            max_award_xp,
            demo_teacher_username,
            demo_teacher_password,
        }
    }
}
