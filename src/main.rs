use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clinic_calendar::commands::{self, CommandContext, CommandResult};
use clinic_calendar::components::AgentApiClient;
use clinic_calendar::config::Config;
use clinic_calendar::error::{env_error, AppResult};
use clinic_calendar::startup;
use clinic_calendar::utils::time::parse_year_month;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "clinic-calendar",
    version,
    about = "Doctor calendar dashboard for the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Calendar(CalendarCommand),
    /// Manage voice agents
    #[command(subcommand)]
    Agent(AgentCommand),
}

#[derive(Subcommand, Debug)]
enum CalendarCommand {
    /// Show a month grid with the selected day's events
    Month {
        /// Month to display (YYYY-MM), defaults to the current month
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<NaiveDate>,
        /// Day to select (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        select: Option<NaiveDate>,
    },
    /// Show the events of a single day
    Day {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// List all events, one page at a time
    Events {
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand, Debug)]
enum AgentCommand {
    /// Validate a config file offline and print it with keys masked
    Check { path: PathBuf },
    /// List the organization's agents, one page at a time
    List {
        /// Organization, defaults to ORGANIZATION_ID
        #[arg(long)]
        org: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one agent with keys masked
    Show { name: String },
    /// Validate a config file and send it as the agent's configuration
    Push { name: String, path: PathBuf },
    /// Delete an agent from the organization
    Delete {
        name: String,
        #[arg(long)]
        org: Option<String>,
    },
}

fn parse_month_arg(value: &str) -> Result<NaiveDate, String> {
    parse_year_month(value).ok_or_else(|| format!("expected YYYY-MM, got: {value}"))
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD, got: {value}"))
}

fn organization(config: &Config, org: Option<String>) -> AppResult<String> {
    org.or_else(|| config.organization_id.clone())
        .ok_or_else(|| env_error("ORGANIZATION_ID"))
}

async fn run_calendar(ctx: &CommandContext, command: CalendarCommand) -> CommandResult {
    match command {
        CalendarCommand::Month { month, select } => {
            commands::calendar::month(ctx, month, select).await
        }
        CalendarCommand::Day { date } => commands::calendar::day(ctx, date).await,
        CalendarCommand::Events { page } => {
            commands::events::list(ctx, page.saturating_sub(1)).await
        }
    }
}

async fn run_agent(config: &Config, client: &AgentApiClient, command: AgentCommand) -> CommandResult {
    match command {
        AgentCommand::Check { path } => commands::agent::check(&path),
        AgentCommand::List { org, page } => {
            let org = organization(config, org)?;
            commands::agent::list(client, &org, page.saturating_sub(1), config.page_size).await
        }
        AgentCommand::Show { name } => commands::agent::show(client, &name).await,
        AgentCommand::Push { name, path } => commands::agent::push(client, &name, &path).await,
        AgentCommand::Delete { name, org } => {
            let org = organization(config, org)?;
            commands::agent::delete(client, &name, &org).await
        }
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    let output = match cli.command {
        // Agent configs are checked offline
        Command::Agent(AgentCommand::Check { path }) => commands::agent::check(&path)?,
        Command::Agent(command) => {
            let config = startup::load_config()?;
            let client = startup::agent_client(&config)?;
            run_agent(&config, &client, command).await?
        }
        Command::Calendar(command) => {
            info!("Starting clinic calendar");

            let config = startup::load_config()?;
            let service = startup::start_calendar_service(&config)?;
            let ctx = CommandContext::new(config, Arc::new(service.clone()));

            let output = run_calendar(&ctx, command).await;
            service.shutdown().await?;
            output?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
