use async_trait::async_trait;
use sea_orm::{DatabaseConnection, QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, Expense, ExpenseId, ResultEngine, User, UserId, expenses, users};

use super::{ExpenseStore, UserDirectory};

/// [`UserDirectory`] backed by the `users` table.
#[derive(Clone, Debug)]
pub struct DatabaseUserDirectory {
    database: DatabaseConnection,
}

impl DatabaseUserDirectory {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserDirectory for DatabaseUserDirectory {
    async fn find_by_username(&self, username: &str) -> ResultEngine<Option<User>> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await?
            .map(User::try_from)
            .transpose()
    }
}

/// [`ExpenseStore`] backed by the `expenses` table.
#[derive(Clone, Debug)]
pub struct DatabaseExpenseStore {
    database: DatabaseConnection,
}

impl DatabaseExpenseStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ExpenseStore for DatabaseExpenseStore {
    async fn save(&self, expense: Expense) -> ResultEngine<Expense> {
        let model = expenses::ActiveModel::from(&expense);
        let saved = match expense.id {
            // The row can vanish between the ownership check and the write.
            Some(id) => model.update(&self.database).await.map_err(|err| match err {
                DbErr::RecordNotUpdated => EngineError::ExpenseNotFound(id),
                other => EngineError::Database(other),
            })?,
            None => model.insert(&self.database).await?,
        };

        Ok(Expense {
            id: Some(saved.id),
            description: saved.description,
            amount: saved.amount_minor.into(),
            date: saved.date,
            owner: expense.owner,
        })
    }

    async fn find_by_id(&self, id: ExpenseId) -> ResultEngine<Option<Expense>> {
        expenses::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?
            .map(|(expense, owner)| Expense::from_row(expense, owner))
            .transpose()
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(owner_id))
            .order_by_asc(expenses::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.database)
            .await?
            .into_iter()
            .map(|(expense, owner)| Expense::from_row(expense, owner))
            .collect()
    }

    async fn delete(&self, expense: &Expense) -> ResultEngine<()> {
        let Some(id) = expense.id else {
            return Ok(());
        };
        expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }
}
