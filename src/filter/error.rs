use thiserror::Error;

use crate::model::ModelError;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Invalid WHERE clause: {0}")]
    InvalidWhereClause(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Invalid operator data: {0}")]
    InvalidOperatorData(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Unsupported aggregate: {0}")]
    UnsupportedAggregate(String),
}

impl From<ModelError> for FilterError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownAttribute(name) => FilterError::InvalidAttribute(name),
            other => FilterError::InvalidOperatorData(other.to_string()),
        }
    }
}
