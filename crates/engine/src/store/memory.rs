//! In-memory collaborators for unit tests.

use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{EngineError, Expense, ExpenseId, ResultEngine, User, UserId};

use super::{ExpenseStore, UserDirectory};

#[derive(Default)]
pub(crate) struct MemoryUserDirectory {
    users: Vec<User>,
}

impl MemoryUserDirectory {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_username(&self, username: &str) -> ResultEngine<Option<User>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }
}

#[derive(Default)]
pub(crate) struct MemoryExpenseStore {
    expenses: Mutex<BTreeMap<ExpenseId, Expense>>,
    next_id: Mutex<ExpenseId>,
    pub(crate) saves: AtomicUsize,
    pub(crate) deletes: AtomicUsize,
}

impl MemoryExpenseStore {
    pub(crate) fn len(&self) -> usize {
        self.expenses.lock().unwrap().len()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn save(&self, mut expense: Expense) -> ResultEngine<Expense> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let id = match expense.id {
            Some(id) if !self.expenses.lock().unwrap().contains_key(&id) => {
                return Err(EngineError::ExpenseNotFound(id));
            }
            Some(id) => id,
            None => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                *next
            }
        };
        expense.id = Some(id);
        self.expenses.lock().unwrap().insert(id, expense.clone());
        Ok(expense)
    }

    async fn find_by_id(&self, id: ExpenseId) -> ResultEngine<Option<Expense>> {
        Ok(self.expenses.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> ResultEngine<Vec<Expense>> {
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.owner.id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, expense: &Expense) -> ResultEngine<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = expense.id {
            self.expenses.lock().unwrap().remove(&id);
        }
        Ok(())
    }
}
