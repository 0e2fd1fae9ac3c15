use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("System field '{0}' is managed automatically")]
    SystemFieldNotAllowed(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid value for {attribute}: {reason}")]
    InvalidValue { attribute: String, reason: String },
}
