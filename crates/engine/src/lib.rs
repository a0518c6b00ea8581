//! Expense-tracking core.
//!
//! [`ExpenseService`] resolves callers through a [`UserDirectory`] and keeps
//! their records in an [`ExpenseStore`]. Both collaborators have sea-orm
//! implementations over the schema in the `migration` crate.

pub use error::EngineError;
pub use expenses::{Expense, ExpenseDetails, ExpenseId};
pub use money::MoneyCents;
pub use service::{ExpenseService, ExpenseServiceBuilder};
pub use store::{DatabaseExpenseStore, DatabaseUserDirectory, ExpenseStore, UserDirectory};
pub use users::{Role, User, UserId};

pub mod expenses;
pub mod users;

mod error;
mod money;
mod service;
mod store;

pub type ResultEngine<T> = Result<T, EngineError>;
