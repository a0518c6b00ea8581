//! Expense API endpoints

use api_types::{
    Amount,
    expense::{Expense, ExpenseNew, ExpenseUpdate},
    user::Owner,
};
use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::{ExpenseDetails, ExpenseId, MoneyCents};

use crate::{ServerError, server::ServerState, user::Principal};

fn to_details(
    description: String,
    amount: &Amount,
    date: NaiveDate,
) -> Result<ExpenseDetails, ServerError> {
    Ok(ExpenseDetails {
        description,
        amount: amount.as_str().parse::<MoneyCents>()?,
        date,
    })
}

fn view(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        description: expense.description,
        amount: Amount(expense.amount.to_string()),
        date: expense.date,
        owner: Owner {
            id: expense.owner.id,
            username: expense.owner.username,
        },
    }
}

/// Handle requests for creating a new expense owned by the caller
pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Json(payload) = payload?;
    let details = to_details(payload.description, &payload.amount, payload.date)?;
    let expense = state.service.create(details, &principal.username).await?;

    Ok(Json(view(expense)))
}

/// Handle requests for listing the caller's expenses
pub async fn list(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state.service.get_all(&principal.username).await?;

    Ok(Json(expenses.into_iter().map(view).collect()))
}

pub async fn get(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(id) = id?;
    let expense = state.service.get_by_id(id, &principal.username).await?;

    Ok(Json(view(expense)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    id: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let details = to_details(payload.description, &payload.amount, payload.date)?;
    let expense = state
        .service
        .update(id, details, &principal.username)
        .await?;

    Ok(Json(view(expense)))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.service.delete(id, &principal.username).await?;

    Ok(StatusCode::NO_CONTENT)
}
