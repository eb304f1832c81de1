use crate::calendar::CalendarEvent;
use crate::components::CalendarService;
use crate::config::Config;
use crate::error::AppResult;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

pub mod agent;
pub mod calendar;
pub mod events;

/// Shared context for all commands
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<Config>,
    pub service: Arc<dyn CalendarService>,
    pub today: NaiveDate,
}

impl CommandContext {
    /// Create a new command context, taking today from the configured timezone
    pub fn new(config: Arc<Config>, service: Arc<dyn CalendarService>) -> Self {
        let today = config.today();
        Self {
            config,
            service,
            today,
        }
    }

    /// Override today's date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fetch the configured calendar's events
    pub async fn fetch_events(&self) -> AppResult<Vec<CalendarEvent>> {
        let list = self
            .service
            .list_events(&self.config.calendar_id, self.config.upcoming_only)
            .await?;
        debug!(
            "Backend reported {} events, received {}",
            list.total_count,
            list.events.len()
        );
        Ok(list.events)
    }
}

/// Type alias for command output
pub type CommandResult = AppResult<String>;
