use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("{0} must not be empty")]
    MissingCredential(&'static str),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("credential is not a valid HTTP header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Postgrest(PostgrestError),

    #[error("unexpected status from backend: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

/// PostgREST error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgrestError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl PostgrestError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            extra: HashMap::new(),
        }
    }

    /// True when the queried table has not been created yet. Postgres itself
    /// reports `42P01`; PostgREST reports the same condition as a schema
    /// cache miss (`PGRST205`) when the table was never known to it.
    pub fn is_undefined_table(&self) -> bool {
        self.code == "42P01" || self.code == "PGRST205"
    }
}

impl fmt::Display for PostgrestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.code)
        }
    }
}
