use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use super::common::{
    created_response, no_content_response, success_response, PaginatedResponse, PaginationParams,
};
use crate::{
    auth::AuthenticatedUser,
    errors::ServiceError,
    services::inventory::{CreateInventoryItemRequest, UpdateInventoryItemRequest},
    AppState,
};

async fn create_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateInventoryItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.inventory.create_item(request).await?;
    Ok(created_response(item))
}

async fn get_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.inventory.get_item(id).await?;
    Ok(success_response(item))
}

async fn find_by_code(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.inventory.find_by_code(&code).await?;
    Ok(success_response(item))
}

async fn list_items(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state.inventory.list_items(params.page, params.per_page).await?;
    Ok(success_response(PaginatedResponse::new(
        items,
        params.page,
        params.per_page,
        total,
    )))
}

async fn list_low_stock(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.inventory.list_low_stock().await?;
    Ok(success_response(items))
}

async fn update_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateInventoryItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.inventory.update_item(id, request).await?;
    Ok(success_response(item))
}

async fn delete_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.inventory.delete_item(id).await?;
    Ok(no_content_response())
}

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/", get(list_items))
        .route("/low-stock", get(list_low_stock))
        .route("/code/:code", get(find_by_code))
        .route("/:id", get(get_item))
        .route("/:id", put(update_item))
        .route("/:id", delete(delete_item))
}
