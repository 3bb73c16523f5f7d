use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use super::common::{
    created_response, no_content_response, success_response, PaginatedResponse, PaginationParams,
};
use crate::{auth::AuthenticatedUser, errors::ServiceError, services::vehicles::VehicleRequest, AppState};

async fn create_vehicle(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<VehicleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let vehicle = state.vehicles.create(request).await?;
    Ok(created_response(vehicle))
}

async fn get_vehicle(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let vehicle = state.vehicles.get(id).await?;
    Ok(success_response(vehicle))
}

async fn find_by_plate(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(plate): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let vehicle = state.vehicles.find_by_plate(&plate).await?;
    Ok(success_response(vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (vehicles, total) = state.vehicles.list(params.page, params.per_page).await?;
    Ok(success_response(PaginatedResponse::new(
        vehicles,
        params.page,
        params.per_page,
        total,
    )))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<VehicleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let vehicle = state.vehicles.update(id, request).await?;
    Ok(success_response(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.vehicles.delete(id).await?;
    Ok(no_content_response())
}

async fn vehicle_work_orders(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.work_orders.find_by_vehicle(id).await?;
    Ok(success_response(orders))
}

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/plate/:plate", get(find_by_plate))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/work-orders", get(vehicle_work_orders))
}
