//! Error types for hypothesis test evaluation

use thiserror::Error;

/// Errors raised before a test statistic is computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// An input lies outside the domain the test is defined on
    #[error("Invalid input: {field} = {value}, expected {constraint}")]
    InvalidInput {
        field: &'static str,
        value: String,
        constraint: &'static str,
    },

    /// The distribution backend rejected its parameters
    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl EvaluationError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl ToString,
        constraint: &'static str,
    ) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            constraint,
        }
    }

    /// True for the input-domain variant
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
