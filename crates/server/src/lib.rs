use api_types::ErrorBody;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod expenses;
mod server;
mod user;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{Expense, ExpenseNew, ExpenseUpdate};
    }

    pub mod user {
        pub use crate::user::Principal;
        pub use api_types::user::Owner;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// The request could not be decoded into the handler's arguments.
    Rejected(StatusCode, String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::AccessDenied(_) => StatusCode::FORBIDDEN,
        EngineError::UserNotFound(_) | EngineError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InvalidRole(_)
        | EngineError::Credentials(_)
        | EngineError::MissingCollaborator(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        err @ (EngineError::InvalidRole(_)
        | EngineError::Credentials(_)
        | EngineError::MissingCollaborator(_)) => {
            tracing::error!("internal error: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Rejected(status, error) => (status, error),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}
