//! Expense records.
//!
//! An `Expense` always carries its owner. The owner is bound once, when the
//! expense is created, and no operation reassigns it.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine, users, users::User};

pub type ExpenseId = i64;

/// The caller-editable part of an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDetails {
    pub description: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    /// `None` until the store assigns one.
    pub id: Option<ExpenseId>,
    pub description: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub owner: User,
}

impl Expense {
    pub fn new(details: ExpenseDetails, owner: User) -> Self {
        Self {
            id: None,
            description: details.description,
            amount: details.amount,
            date: details.date,
            owner,
        }
    }

    /// Overwrite description, amount and date. Id and owner are left alone.
    pub fn apply(&mut self, details: ExpenseDetails) {
        self.description = details.description;
        self.amount = details.amount;
        self.date = details.date;
    }

    /// Exact, case-sensitive comparison against the owner's username.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner.username == username
    }

    pub(crate) fn from_row(model: Model, owner: Option<users::Model>) -> ResultEngine<Self> {
        let owner = owner.ok_or_else(|| {
            EngineError::Database(DbErr::RecordNotFound(format!(
                "owner {} of expense {}",
                model.user_id, model.id
            )))
        })?;
        Ok(Self {
            id: Some(model.id),
            description: model.description,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
            owner: User::try_from(owner)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: ExpenseId,
    pub description: String,
    pub amount_minor: i64,
    pub date: Date,
    pub user_id: users::UserId,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: match value.id {
                Some(id) => ActiveValue::Set(id),
                None => ActiveValue::NotSet,
            },
            description: ActiveValue::Set(value.description.clone()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            date: ActiveValue::Set(value.date),
            user_id: ActiveValue::Set(value.owner.id),
        }
    }
}
