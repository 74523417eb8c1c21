use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Server configuration for HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker count; actix picks one per core when unset.
    pub workers: Option<usize>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid SERVER_PORT".to_string()))?,
            workers: match env::var("SERVER_WORKERS") {
                Ok(value) => Some(value.parse().map_err(|_| {
                    AppError::Configuration("Invalid SERVER_WORKERS".to_string())
                })?),
                Err(_) => None,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
