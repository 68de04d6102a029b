use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Platform not found: {id}")]
    NotFound { id: String },

    #[error("Invalid platform profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("Duplicate platform profile: {id}")]
    DuplicateProfile { id: String },

    #[error("Invalid YAML format: {reason}")]
    InvalidYaml { reason: String },

    #[error("Invalid JSON format: {reason}")]
    InvalidJson { reason: String },

    #[error("Unknown registry format")]
    UnknownFormat,

    #[error("Failed to read registry file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
