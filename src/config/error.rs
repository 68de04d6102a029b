use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML format: {reason}")]
    InvalidYaml { reason: String },

    #[error("Invalid JSON format: {reason}")]
    InvalidJson { reason: String },

    #[error("Unknown manifest format")]
    UnknownFormat,

    #[error("Invalid manifest field: {field} - {reason}")]
    Invalid { field: String, reason: String },
}
