use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(clinic_calendar::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(clinic_calendar::config))]
    Config(String),

    #[error("Calendar API error: {0}")]
    #[diagnostic(code(clinic_calendar::calendar_api))]
    CalendarApi(String),

    #[error("Agent API error: {0}")]
    #[diagnostic(code(clinic_calendar::agent_api))]
    AgentApi(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(clinic_calendar::validation))]
    Validation(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(clinic_calendar::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(clinic_calendar::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(clinic_calendar::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(clinic_calendar::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create calendar backend errors
pub fn calendar_api_error(message: &str) -> Error {
    Error::CalendarApi(message.to_string())
}

/// Helper to create agent backend errors
pub fn agent_api_error(message: &str) -> Error {
    Error::AgentApi(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
