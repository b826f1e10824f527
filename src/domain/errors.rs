use super::models::ContactId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A required field was empty.
    #[error("{field} must not be empty")]
    Validation { field: &'static str },
    #[error("No contact with id {0}")]
    NotFound(ContactId),
    #[error("Contact id {0} is already taken")]
    DuplicateId(ContactId),
    #[error("Invalid amounts: bill {bill}, own expense {own_expense}")]
    InvalidAmount { bill: f64, own_expense: f64 },
}

impl DomainError {
    pub fn validation(field: &'static str) -> Self {
        DomainError::Validation { field }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
