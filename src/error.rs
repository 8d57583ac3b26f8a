use std::time::Duration;

use thiserror::Error;

/// Input-shape failures. Raised before any hook runs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Request is null")]
    MissingEnvelope,
    #[error("Detail is null")]
    MissingDetail,
}

#[derive(Error, Debug)]
#[error("Invocation deadline exceeded, budget was {budget:?}")]
pub struct DeadlineExceeded {
    pub budget: Duration,
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// `error` is the original failure; `hook_error` is set when `on_error`
    /// itself failed while reporting it.
    #[error("{error:#}")]
    Execution {
        error: anyhow::Error,
        hook_error: Option<anyhow::Error>,
    },
}

impl HandlerError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HandlerError::InvalidInput(_))
    }

    pub fn execution_error(&self) -> Option<&anyhow::Error> {
        match self {
            HandlerError::Execution { error, .. } => Some(error),
            HandlerError::InvalidInput(_) => None,
        }
    }

    pub fn hook_error(&self) -> Option<&anyhow::Error> {
        match self {
            HandlerError::Execution { hook_error, .. } => hook_error.as_ref(),
            HandlerError::InvalidInput(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{HandlerError, InvalidInput};

    #[test]
    fn test_execution_error_displays_original() {
        let error = HandlerError::Execution {
            error: anyhow!("downstream unavailable"),
            hook_error: Some(anyhow!("alerting failed")),
        };

        assert_eq!(error.to_string(), "downstream unavailable");
        assert!(!error.is_invalid_input());
        assert_eq!(
            error.hook_error().map(ToString::to_string),
            Some("alerting failed".to_string())
        );
    }

    #[test]
    fn test_invalid_input_has_no_execution_error() {
        let error = HandlerError::from(InvalidInput::MissingDetail);

        assert!(error.is_invalid_input());
        assert!(error.execution_error().is_none());
        assert_eq!(error.to_string(), "Invalid input: Detail is null");
    }
}
