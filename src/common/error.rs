use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Malformed codepoint sequence '{codepoint}': {reason}")]
    MalformedCodepoint { codepoint: String, reason: String },

    #[error("Codepoint {0} not found in the Unicode name table")]
    UnknownCodepoint(String),

    #[error("Unicode name '{0}' does not resolve to a character")]
    UnknownName(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
