//! Configuration management for the booking Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding booking records
    pub table_name: String,
    /// Shared secret for the admin endpoint (set for the admin Lambda only)
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("BOOKINGS_TABLE").unwrap_or_else(|_| "bookings".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        }
    }
}
