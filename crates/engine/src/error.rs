//! The module contains the error the engine can throw.
//!
//! The errors a caller is expected to act on are:
//!
//! - [`UserNotFound`] thrown when the caller identity does not resolve.
//! - [`ExpenseNotFound`] thrown when no expense has the requested id.
//! - [`AccessDenied`] thrown when the expense belongs to someone else.
//!
//!  [`UserNotFound`]: EngineError::UserNotFound
//!  [`ExpenseNotFound`]: EngineError::ExpenseNotFound
//!  [`AccessDenied`]: EngineError::AccessDenied
use sea_orm::DbErr;
use thiserror::Error;

use crate::ExpenseId;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Expense not found with id: {0}")]
    ExpenseNotFound(ExpenseId),
    #[error("Access denied to expense {0}")]
    AccessDenied(ExpenseId),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    #[error("Credentials error: {0}")]
    Credentials(String),
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (Self::ExpenseNotFound(a), Self::ExpenseNotFound(b)) => a == b,
            (Self::AccessDenied(a), Self::AccessDenied(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidRole(a), Self::InvalidRole(b)) => a == b,
            (Self::Credentials(a), Self::Credentials(b)) => a == b,
            (Self::MissingCollaborator(a), Self::MissingCollaborator(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
