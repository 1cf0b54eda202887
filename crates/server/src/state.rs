//! Shared application state

use anyhow::Result;

use crate::config::ServerConfig;

/// State shared across all request handlers
pub struct AppState {
    pub config: ServerConfig,
    pub http: reqwest::Client,
}

impl AppState {
    /// Create application state and the working directories it relies on
    pub fn new(config: ServerConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;
        std::fs::create_dir_all(&config.output_dir)?;

        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }
}
