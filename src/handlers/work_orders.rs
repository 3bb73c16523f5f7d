use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::common::{
    created_response, no_content_response, success_response, PaginatedResponse, PaginationParams,
};
use crate::{
    auth::AuthenticatedUser,
    entities::work_order::WorkOrderStatus,
    errors::ServiceError,
    services::work_orders::{
        AddItemRequest, CreateWorkOrderRequest, UpdateItemRequest, UpdateWorkOrderRequest,
    },
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusChangeRequest {
    pub status: WorkOrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

async fn create_work_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateWorkOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.create(request).await?;
    Ok(created_response(order))
}

async fn get_work_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.get(id).await?;
    Ok(success_response(order))
}

async fn list_work_orders(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (orders, total) = state.work_orders.list(params.page, params.per_page).await?;
    Ok(success_response(PaginatedResponse::new(
        orders,
        params.page,
        params.per_page,
        total,
    )))
}

async fn update_work_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateWorkOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.update(id, request).await?;
    Ok(success_response(order))
}

async fn delete_work_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.work_orders.delete(id).await?;
    Ok(no_content_response())
}

async fn change_status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.change_status(id, request.status).await?;
    Ok(success_response(order))
}

async fn complete_work_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.complete(id).await?;
    Ok(success_response(order))
}

async fn cancel_work_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.cancel(id).await?;
    Ok(success_response(order))
}

async fn add_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AddItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.work_orders.add_item(id, request).await?;
    Ok(created_response(item))
}

async fn list_items(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.work_orders.list_items(id).await?;
    Ok(success_response(items))
}

async fn update_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, item_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.work_orders.update_item(id, item_id, request).await?;
    Ok(success_response(item))
}

async fn remove_item(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, item_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ServiceError> {
    state.work_orders.remove_item(id, item_id).await?;
    Ok(no_content_response())
}

async fn find_by_status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let status: WorkOrderStatus = status
        .parse()
        .map_err(|_| ServiceError::ValidationError(format!("Unknown status: {}", status)))?;
    let orders = state.work_orders.find_by_status(status).await?;
    Ok(success_response(orders))
}

async fn find_by_number(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(order_number): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.work_orders.find_by_order_number(&order_number).await?;
    Ok(success_response(order))
}

async fn find_by_date_range(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<DateRangeParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state
        .work_orders
        .find_by_date_range(params.start, params.end)
        .await?;
    Ok(success_response(orders))
}

pub fn work_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_work_order))
        .route("/", get(list_work_orders))
        .route("/search", get(find_by_date_range))
        .route("/status/:status", get(find_by_status))
        .route("/number/:order_number", get(find_by_number))
        .route("/:id", get(get_work_order))
        .route("/:id", put(update_work_order))
        .route("/:id", delete(delete_work_order))
        .route("/:id/status", put(change_status))
        .route("/:id/complete", post(complete_work_order))
        .route("/:id/cancel", post(cancel_work_order))
        .route("/:id/items", post(add_item))
        .route("/:id/items", get(list_items))
        .route("/:id/items/:item_id", put(update_item))
        .route("/:id/items/:item_id", delete(remove_item))
}
