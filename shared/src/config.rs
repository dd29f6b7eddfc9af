//! Configuration management for Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Table holding user records
    pub user_table: String,
    /// Table holding schedule records
    pub schedule_table: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            user_table: env::var("USER_TABLE").unwrap_or_else(|_| "userTable".to_string()),
            schedule_table: env::var("SCHEDULE_TABLE")
                .unwrap_or_else(|_| "scheduleTable".to_string()),
        }
    }
}
