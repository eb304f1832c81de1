use super::models::{AgentConfig, AgentSummary};
use super::AgentService;
use crate::config::Config;
use crate::error::{agent_api_error, validation_error, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the voice agent backend
#[derive(Debug, Clone)]
pub struct AgentApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl AgentApiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> AppResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| agent_api_error(&format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(agent_api_error(&format!("Invalid base URL {}", base_url)));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let (base_url, api_key) = config.agent_api()?;
        Self::new(base_url, api_key)
    }

    /// Base URL with `segments` appended, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| agent_api_error("Base URL cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request; non-2xx replies become errors carrying the backend message
    async fn send(&self, request: RequestBuilder) -> AppResult<(StatusCode, Value)> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            return Ok((status, body));
        }

        let body: Value = response.json().await?;
        Ok((status, body))
    }

    async fn send_ok(&self, request: RequestBuilder) -> AppResult<Value> {
        let (status, body) = self.send(request).await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status, &body))
        }
    }
}

#[async_trait]
impl AgentService for AgentApiClient {
    async fn list_agents(&self, organization_id: &str) -> AppResult<Vec<AgentSummary>> {
        require("organization_id", organization_id)?;
        let url = self.endpoint(&["agents", "by-org", organization_id])?;
        debug!("Listing agents from {}", url);

        let (status, body) = self.send(self.client.get(url)).await?;
        if matches!(status, StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED) {
            info!("No agents endpoint for organization {}", organization_id);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let agents = parse_agent_list(body)?;
        info!(
            "Fetched {} agents for organization {}",
            agents.len(),
            organization_id
        );
        Ok(agents)
    }

    async fn get_agent(&self, name: &str) -> AppResult<AgentSummary> {
        require("agent name", name)?;
        let url = self.endpoint(&["agents", "info", name])?;
        let body = self.send_ok(self.client.get(url)).await?;
        parse_agent(unwrap_data(body), name)
    }

    async fn update_agent(&self, name: &str, config: &AgentConfig) -> AppResult<AgentSummary> {
        require("agent name", name)?;
        config.validate()?;

        let url = self.endpoint(&["agents", "update", name])?;
        let body = self.send_ok(self.client.post(url).json(config)).await?;
        let agent = parse_agent(unwrap_data(body), name)?;
        info!(
            "Updated agent {} for organization {}",
            name, config.organization_id
        );
        Ok(agent)
    }

    async fn delete_agent(&self, name: &str, organization_id: &str) -> AppResult<()> {
        require("agent name", name)?;
        require("organization_id", organization_id)?;

        let url = self.endpoint(&["agents", "delete-by-org", organization_id])?;
        let body = json!({ "agentName": name });
        self.send_ok(self.client.delete(url).json(&body)).await?;
        info!("Deleted agent {} from organization {}", name, organization_id);
        Ok(())
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(validation_error(&format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// `error` or `message` from the body, else `HTTP <code>: <reason>`
fn status_error(status: StatusCode, body: &Value) -> crate::error::Error {
    let message = ["error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str).filter(|m| !m.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });
    warn!("Agent backend returned {}: {}", status, message);
    agent_api_error(&message)
}

fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Accepts a bare array, `{agents: [...]}`, `{agents: {name: {...}}}` and
/// `{data: ...}` wrapping any of those
fn parse_agent_list(body: Value) -> AppResult<Vec<AgentSummary>> {
    let mut payload = body;
    for _ in 0..2 {
        if payload.is_array() || payload.get("agents").is_some() {
            break;
        }
        payload = unwrap_data(payload);
    }

    let entries: Vec<(String, Value)> = match payload {
        Value::Array(items) => items.into_iter().map(|v| (String::new(), v)).collect(),
        Value::Object(mut map) => match map.remove("agents") {
            Some(Value::Array(items)) => items.into_iter().map(|v| (String::new(), v)).collect(),
            Some(Value::Object(by_name)) => by_name.into_iter().collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .map(|(name, value)| parse_agent(value, &name))
        .collect()
}

/// Deserialize one agent, naming it from `name`, `agent_prefix`,
/// `agent_name` or `fallback_name` in that order
fn parse_agent(mut value: Value, fallback_name: &str) -> AppResult<AgentSummary> {
    if let Value::Object(map) = &mut value {
        let has_name = map
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|n| !n.is_empty());
        if !has_name {
            let name = ["agent_prefix", "agent_name"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .filter(|n| !n.is_empty())
                .unwrap_or(fallback_name)
                .to_string();
            map.insert("name".to_string(), Value::String(name));
        }
    }
    Ok(serde_json::from_value(value)?)
}
