use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Malformed calendar event: {0}")]
    #[diagnostic(code(viikko::malformed_event))]
    MalformedEvent(String),

    #[error("No matching calendars found. Check calendar names and permissions.")]
    #[diagnostic(code(viikko::no_calendars))]
    NoCalendarsFound,

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(viikko::calendar_api))]
    CalendarApi(String),

    #[error("Token error: {0}")]
    #[diagnostic(code(viikko::token))]
    Token(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(viikko::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(viikko::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(viikko::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(viikko::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(viikko::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AgendaResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create malformed event errors
pub fn malformed_event_error(message: &str) -> Error {
    Error::MalformedEvent(message.to_string())
}

/// Helper to create Calendar API errors
pub fn calendar_api_error(message: &str) -> Error {
    Error::CalendarApi(message.to_string())
}

/// Helper to create token errors
pub fn token_error(message: &str) -> Error {
    Error::Token(message.to_string())
}
