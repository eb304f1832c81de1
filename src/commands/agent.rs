use super::CommandResult;
use crate::calendar::view::join_lines;
use crate::components::agents::{mask_secrets, AgentConfig, AgentService};
use crate::error::{other_error, AppResult};
use crate::pagination::PaginationState;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read, parse and validate an agent configuration file
fn read_config(path: &Path) -> AppResult<AgentConfig> {
    let content = fs::read_to_string(path)?;
    let config: AgentConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

fn pretty(value: &impl serde::Serialize) -> CommandResult {
    serde_json::to_string_pretty(value)
        .map_err(|e| other_error(&format!("Failed to format output: {}", e)))
}

/// Validate an agent configuration file and print it with secrets masked
pub fn check(path: &Path) -> CommandResult {
    let config = read_config(path)?;
    info!(
        "Agent config valid: tts={} stt={}",
        config.tts_config.provider(),
        config.stt_config.provider()
    );
    pretty(&config.masked())
}

/// Paginated table of an organization's agents
pub async fn list(
    service: &dyn AgentService,
    organization_id: &str,
    page: usize,
    page_size: usize,
) -> CommandResult {
    let agents = service.list_agents(organization_id).await?;

    let mut pagination = PaginationState::new(page_size, agents.len())?;
    pagination.go_to(page);

    let mut lines: Vec<String> = agents[pagination.range()].iter().map(|a| a.row()).collect();
    if agents.is_empty() {
        lines.push(format!("No agents found for organization {}", organization_id));
    }
    lines.push(pagination.render_controls());
    lines.push(pagination.summary());
    Ok(join_lines(&lines))
}

/// One agent as JSON, keys masked
pub async fn show(service: &dyn AgentService, name: &str) -> CommandResult {
    let agent = service.get_agent(name).await?;
    let mut value = serde_json::to_value(&agent)?;
    mask_secrets(&mut value);
    pretty(&value)
}

/// Validate a config file and send it as the agent's configuration
pub async fn push(service: &dyn AgentService, name: &str, path: &Path) -> CommandResult {
    let config = read_config(path)?;
    let agent = service.update_agent(name, &config).await?;
    Ok(format!("Updated {}\n", agent.row()))
}

pub async fn delete(service: &dyn AgentService, name: &str, organization_id: &str) -> CommandResult {
    service.delete_agent(name, organization_id).await?;
    Ok(format!("Deleted agent {} from organization {}\n", name, organization_id))
}
