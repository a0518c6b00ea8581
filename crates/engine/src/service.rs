use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    EngineError, Expense, ExpenseDetails, ExpenseId, ResultEngine, User,
    store::{DatabaseExpenseStore, DatabaseUserDirectory, ExpenseStore, UserDirectory},
};

/// Ownership-checked CRUD over a user's expenses.
///
/// Every operation works on behalf of a caller identified by username. Reads,
/// updates and deletes only go through once the target expense is proven to
/// belong to that caller.
pub struct ExpenseService {
    users: Arc<dyn UserDirectory>,
    expenses: Arc<dyn ExpenseStore>,
}

impl std::fmt::Debug for ExpenseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseService").finish_non_exhaustive()
    }
}

impl ExpenseService {
    /// Return a builder for `ExpenseService`. Help to build the struct.
    pub fn builder() -> ExpenseServiceBuilder {
        ExpenseServiceBuilder::default()
    }

    async fn resolve_user(&self, username: &str) -> ResultEngine<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(username.to_string()))
    }

    /// Create an expense owned by `username`.
    pub async fn create(&self, details: ExpenseDetails, username: &str) -> ResultEngine<Expense> {
        let owner = self.resolve_user(username).await?;
        let expense = self.expenses.save(Expense::new(details, owner)).await?;
        tracing::debug!(expense_id = ?expense.id, username, "expense created");
        Ok(expense)
    }

    /// All expenses owned by `username`, in store order.
    pub async fn get_all(&self, username: &str) -> ResultEngine<Vec<Expense>> {
        let owner = self.resolve_user(username).await?;
        self.expenses.find_by_owner_id(owner.id).await
    }

    /// Load an expense, checking it belongs to `username`.
    pub async fn get_by_id(&self, id: ExpenseId, username: &str) -> ResultEngine<Expense> {
        let expense = self
            .expenses
            .find_by_id(id)
            .await?
            .ok_or(EngineError::ExpenseNotFound(id))?;

        if !expense.is_owned_by(username) {
            tracing::warn!(expense_id = id, username, "access denied");
            return Err(EngineError::AccessDenied(id));
        }

        Ok(expense)
    }

    /// Replace description, amount and date of an expense owned by `username`.
    pub async fn update(
        &self,
        id: ExpenseId,
        details: ExpenseDetails,
        username: &str,
    ) -> ResultEngine<Expense> {
        let mut expense = self.get_by_id(id, username).await?;
        expense.apply(details);
        let expense = self.expenses.save(expense).await?;
        tracing::debug!(expense_id = id, username, "expense updated");
        Ok(expense)
    }

    /// Delete an expense owned by `username`.
    pub async fn delete(&self, id: ExpenseId, username: &str) -> ResultEngine<()> {
        let expense = self.get_by_id(id, username).await?;
        self.expenses.delete(&expense).await?;
        tracing::debug!(expense_id = id, username, "expense deleted");
        Ok(())
    }
}

/// The builder for `ExpenseService`
///
/// Collaborators passed explicitly win over the database-backed defaults.
#[derive(Default)]
pub struct ExpenseServiceBuilder {
    database: Option<DatabaseConnection>,
    users: Option<Arc<dyn UserDirectory>>,
    expenses: Option<Arc<dyn ExpenseStore>>,
}

impl ExpenseServiceBuilder {
    /// Pass the database used for any collaborator not set explicitly
    pub fn database(mut self, db: DatabaseConnection) -> ExpenseServiceBuilder {
        self.database = Some(db);
        self
    }

    pub fn users(mut self, users: Arc<dyn UserDirectory>) -> ExpenseServiceBuilder {
        self.users = Some(users);
        self
    }

    pub fn expenses(mut self, expenses: Arc<dyn ExpenseStore>) -> ExpenseServiceBuilder {
        self.expenses = Some(expenses);
        self
    }

    /// Construct `ExpenseService`
    pub async fn build(self) -> ResultEngine<ExpenseService> {
        let database = self.database;

        let users = match (self.users, &database) {
            (Some(users), _) => users,
            (None, Some(db)) => Arc::new(DatabaseUserDirectory::new(db.clone())),
            (None, None) => return Err(EngineError::MissingCollaborator("user directory")),
        };
        let expenses = match (self.expenses, database) {
            (Some(expenses), _) => expenses,
            (None, Some(db)) => Arc::new(DatabaseExpenseStore::new(db)),
            (None, None) => return Err(EngineError::MissingCollaborator("expense store")),
        };

        Ok(ExpenseService { users, expenses })
    }
}
