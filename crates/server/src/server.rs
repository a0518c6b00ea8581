use axum::{
    Extension, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::{Arc, OnceLock};

use crate::{expenses, user::Principal};
use engine::{ExpenseService, users};

#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<ExpenseService>,
    pub db: DatabaseConnection,
}

impl ServerState {
    pub fn new(service: ExpenseService, db: DatabaseConnection) -> Self {
        Self {
            service: Arc::new(service),
            db,
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"expenses\"")],
    )
        .into_response()
}

/// Hash checked when the username does not exist; the outcome is discarded.
fn unknown_user_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        users::hash_password("unknown user").unwrap_or_else(|err| {
            tracing::error!("failed to prepare unknown-user hash: {err}");
            String::new()
        })
    })
}

/// Resolve Basic credentials into a [`Principal`].
async fn auth(
    State(state): State<ServerState>,
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(TypedHeader(credentials)) = auth_header else {
        return Err(unauthorized());
    };
    if credentials.username().is_empty() || credentials.password().is_empty() {
        return Err(unauthorized());
    }

    let user = users::Entity::find()
        .filter(users::Column::Username.eq(credentials.username()))
        .one(&state.db)
        .await
        .map_err(|err| {
            tracing::error!("failed to load credentials: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })?;

    // Unknown usernames still pay for a full verification.
    let stored = user.as_ref().map(|user| user.password.clone());
    let password = credentials.password().to_string();
    let verified = tokio::task::spawn_blocking(move || {
        let hash = stored.as_deref().unwrap_or_else(|| unknown_user_hash());
        users::verify_password(hash, &password)
    })
    .await
    .map_err(|err| {
        tracing::error!("password verification panicked: {err}");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })?;
    let Some(user) = user.filter(|_| verified) else {
        tracing::debug!(username = credentials.username(), "rejected credentials");
        return Err(unauthorized());
    };

    let principal = Principal::try_from(user).map_err(|err| {
        tracing::error!("invalid user row: {err}");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Reject callers without the authenticated-user capability.
async fn require_user(
    Extension(principal): Extension<Principal>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !principal.is_user() {
        tracing::warn!(username = %principal.username, "caller lacks user capability");
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route_layer(middleware::from_fn(require_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    service: ExpenseService,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(service, db))).await
}
