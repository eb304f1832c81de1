mod client;
pub mod models;

pub use client::AgentApiClient;
pub use models::{
    mask_api_key, mask_secrets, AgentConfig, AgentSummary, CartesiaTts, DeepgramStt,
    ElevenLabsTts, OpenAiStt, OpenAiTts, SttConfig, TtsConfig,
};

use crate::error::AppResult;
use async_trait::async_trait;

/// Operations offered by the voice agent backend, one method per endpoint
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Agents of an organization; an organization without agents yields an empty list
    async fn list_agents(&self, organization_id: &str) -> AppResult<Vec<AgentSummary>>;

    async fn get_agent(&self, name: &str) -> AppResult<AgentSummary>;

    /// Create the agent or replace its configuration
    async fn update_agent(&self, name: &str, config: &AgentConfig) -> AppResult<AgentSummary>;

    async fn delete_agent(&self, name: &str, organization_id: &str) -> AppResult<()>;
}
