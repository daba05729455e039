use thiserror::Error;

#[derive(Error, Debug)]
pub enum CraftError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid recipe file '{entry}': {source}")]
    InvalidRecipe {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid tag file '{entry}': {source}")]
    InvalidTag {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tag '{0}' not found")]
    TagNotFound(String),

    #[error("Tag '{0}' includes itself")]
    TagCycle(String),

    #[error("Amount of '{item}' needed for one '{root}' does not fit in 32 bits")]
    RatioOverflow { item: String, root: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, CraftError>;
