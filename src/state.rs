use std::sync::Arc;

use crate::ai::LlmClient;
use crate::config::Config;
use crate::db::Repository;
use crate::error::{AppError, Result};

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    repository: Arc<Repository>,
    llm: Option<Arc<LlmClient>>,
}

impl AppState {
    pub fn new(config: &Config, repository: Repository) -> Result<Self> {
        let llm = match config.api_key() {
            Some(key) => Some(Arc::new(LlmClient::new(key, &config.openai_api_url)?)),
            None => {
                tracing::warn!("OPENAI_API_KEY not set, generation endpoints will be unavailable");
                None
            }
        };

        Ok(Self {
            repository: Arc::new(repository),
            llm,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn llm(&self) -> Result<Arc<LlmClient>> {
        self.llm.clone().ok_or(AppError::MissingApiKey)
    }
}
