use crate::types::platform::FileRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Missing template value: {key} (required by {role})")]
    MissingValue { key: String, role: FileRole },

    #[error("Invalid template value: {key} = {value}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Template rendering failed for {role}: {message}")]
    Render { role: FileRole, message: String },

    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Placeholder pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl GenerateError {
    /// Key of the unresolved placeholder, if that is what failed.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            GenerateError::MissingValue { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}
