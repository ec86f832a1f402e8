use crate::types::postgrest::PostgrestError;
use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Fatal configuration failures. The probe never builds a client after one of these.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Missing SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY in .env")]
    MissingCredentials,

    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}

/// Anything that can go wrong while running the table read.
///
/// The probe reports these and carries on; none of them change the exit status.
#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP request error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PostgREST error ({status}): {error}")]
    Api {
        status: StatusCode,
        error: PostgrestError,
    },

    #[error("Upstream error with status: {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },
}

/// Top-level failure of a probe run.
#[derive(Debug, ThisError)]
pub enum ProbeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write probe report: {0}")]
    Io(#[from] std::io::Error),
}
