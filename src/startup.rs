use crate::components::{AgentApiClient, CalendarApiClient, CalendarServiceHandle};
use crate::config::Config;
use crate::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Arc<Config>> {
    match Config::load() {
        Ok(config) => {
            info!(
                "Loaded config for calendar {} ({})",
                config.calendar_id, config.timezone
            );
            Ok(Arc::new(config))
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the HTTP client and spawn the calendar service actor around it
pub fn start_calendar_service(config: &Config) -> miette::Result<CalendarServiceHandle> {
    let client = CalendarApiClient::from_config(config)?;
    info!("Calendar backend at {}", config.calendar_api_base_url);
    Ok(CalendarServiceHandle::new(Arc::new(client)))
}

/// Build the agent backend client
pub fn agent_client(config: &Config) -> miette::Result<AgentApiClient> {
    let client = AgentApiClient::from_config(config)?;
    if let Some(base_url) = &config.agent_api_base_url {
        info!("Agent backend at {}", base_url);
    }
    Ok(client)
}
