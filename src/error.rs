use thiserror::Error;

#[derive(Error, Debug)]
pub enum SizingError {
    /// A caller-supplied value is outside its domain. `field` is the wire name.
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Reference plant or engine constants break their invariants.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SizingError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SizingError::InvalidInput { field, reason: reason.into() }
    }

    /// Offending field for `InvalidInput`, `None` otherwise.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SizingError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SizingError>;
