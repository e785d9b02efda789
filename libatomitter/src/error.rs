//! Error types for Atomitter

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AtomitterError>;

#[derive(Error, Debug)]
pub enum AtomitterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Feed error: {0}")]
    FeedFetch(#[from] FeedError),

    #[error("Error retrieving timeline: {0}")]
    TimelineFetch(PlatformError),

    #[error("Error posting: {0}")]
    PostSubmission(PlatformError),
}

impl AtomitterError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AtomitterError::Template(_) => 3,
            AtomitterError::TimelineFetch(PlatformError::Authentication(_))
            | AtomitterError::PostSubmission(PlatformError::Authentication(_)) => 2,
            AtomitterError::TimelineFetch(_) | AtomitterError::PostSubmission(_) => 1,
            AtomitterError::Config(_) => 1,
            AtomitterError::FeedFetch(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine {0}")]
    MissingDirectory(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed action starting at byte {0}")]
    Unclosed(usize),

    #[error("empty action at byte {0}")]
    EmptyAction(usize),

    #[error("invalid action '{0}': expected a field reference like {{{{ .Title }}}}")]
    InvalidAction(String),

    #[error("can't evaluate field {0} in feed item")]
    UnknownField(String),
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed server returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse feed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Posting failed: {0}")]
    Posting(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        PlatformError::Network(err.to_string())
    }
}
