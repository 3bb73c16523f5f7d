use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use super::common::{
    created_response, no_content_response, success_response, PaginatedResponse, PaginationParams,
};
use crate::{auth::AuthenticatedUser, errors::ServiceError, services::customers::CustomerRequest, AppState};

async fn create_customer(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.create(request).await?;
    Ok(created_response(customer))
}

async fn get_customer(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.get(id).await?;
    Ok(success_response(customer))
}

async fn list_customers(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (customers, total) = state.customers.list(params.page, params.per_page).await?;
    Ok(success_response(PaginatedResponse::new(
        customers,
        params.page,
        params.per_page,
        total,
    )))
}

async fn update_customer(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.update(id, request).await?;
    Ok(success_response(customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.customers.delete(id).await?;
    Ok(no_content_response())
}

async fn customer_vehicles(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let vehicles = state.customers.vehicles(id).await?;
    Ok(success_response(vehicles))
}

async fn customer_work_orders(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.work_orders.find_by_customer(id).await?;
    Ok(success_response(orders))
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
        .route("/:id", put(update_customer))
        .route("/:id", delete(delete_customer))
        .route("/:id/vehicles", get(customer_vehicles))
        .route("/:id/work-orders", get(customer_work_orders))
}
