use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::common::{created_response, success_response};
use crate::{
    auth::{AuthenticatedUser, LoginRequest, RegisterRequest},
    entities::user::Entity as UserEntity,
    errors::ServiceError,
    AppState,
};
use sea_orm::EntityTrait;

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let account = state.auth.register(request).await?;
    Ok(created_response(account))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let token = state.auth.login(request).await?;
    Ok(success_response(token))
}

/// Returns the account behind the presented token.
async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let account = UserEntity::find_by_id(user.user_id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user.user_id)))?;
    Ok(success_response(account))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
