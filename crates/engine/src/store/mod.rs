//! Collaborators the service depends on.
//!
//! The service never talks to the database directly: it asks a
//! [`UserDirectory`] who the caller is and an [`ExpenseStore`] for records.

use async_trait::async_trait;

use crate::{Expense, ExpenseId, ResultEngine, User, UserId};

mod database;
#[cfg(test)]
pub(crate) mod memory;

pub use database::{DatabaseExpenseStore, DatabaseUserDirectory};

/// Resolves usernames to identities.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> ResultEngine<Option<User>>;
}

/// Durable storage for expenses.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Insert when `expense.id` is `None`, overwrite by id otherwise.
    ///
    /// Overwriting an id with no stored row fails with `ExpenseNotFound`.
    async fn save(&self, expense: Expense) -> ResultEngine<Expense>;

    async fn find_by_id(&self, id: ExpenseId) -> ResultEngine<Option<Expense>>;

    /// Every expense owned by `owner_id`, ascending by id.
    async fn find_by_owner_id(&self, owner_id: UserId) -> ResultEngine<Vec<Expense>>;

    async fn delete(&self, expense: &Expense) -> ResultEngine<()>;
}
