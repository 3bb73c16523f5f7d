use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use super::common::{
    created_response, no_content_response, success_response, PaginatedResponse, PaginationParams,
};
use crate::{auth::AuthenticatedUser, errors::ServiceError, services::employees::EmployeeRequest, AppState};

async fn create_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.employees.create(request).await?;
    Ok(created_response(employee))
}

async fn get_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.employees.get(id).await?;
    Ok(success_response(employee))
}

async fn list_employees(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (employees, total) = state.employees.list(params.page, params.per_page).await?;
    Ok(success_response(PaginatedResponse::new(
        employees,
        params.page,
        params.per_page,
        total,
    )))
}

async fn update_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.employees.update(id, request).await?;
    Ok(success_response(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.employees.delete(id).await?;
    Ok(no_content_response())
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_employee))
        .route("/", get(list_employees))
        .route("/:id", get(get_employee))
        .route("/:id", put(update_employee))
        .route("/:id", delete(delete_employee))
}
