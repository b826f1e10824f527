use crate::domain::DomainError;
use super::state::Phase;
use thiserror::Error;

/// Why an action was refused by the controller.
///
/// A refused action never changes the application state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{action} is not available while {phase}")]
    NotApplicable { action: &'static str, phase: Phase },
}

pub type AppResult<T> = Result<T, AppError>;
