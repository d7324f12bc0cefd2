use thiserror::Error;

/// Errors that can occur when building criteria from request parameters
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("None of the requested search fields are searchable: {}", rejected.join(", "))]
    InvalidFieldSelection { rejected: Vec<String> },

    #[error("Unknown operator: '{0}'. Valid operators are: =, !=, >, >=, <, <=, like, not like")]
    UnknownOperator(String),
}
