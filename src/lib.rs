//! Workshop API: REST backend for a vehicle repair shop.
//!
//! Customers own vehicles, vehicles receive work orders, work orders consume
//! inventory parts as line items. The work order service coordinates the
//! status lifecycle and keeps stock and order totals consistent.

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{Extension, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::{
    auth::AuthService,
    config::AppConfig,
    db::DbPool,
    events::EventSender,
    services::{
        CustomerService, EmployeeService, InventoryService, VehicleService, WorkOrderService,
    },
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub customers: CustomerService,
    pub vehicles: VehicleService,
    pub employees: EmployeeService,
    pub inventory: InventoryService,
    pub work_orders: WorkOrderService,
}

impl AppState {
    pub fn new(
        db: Arc<DbPool>,
        config: Arc<AppConfig>,
        event_sender: Option<Arc<EventSender>>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            db.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration,
        ));
        Self {
            customers: CustomerService::new(db.clone()),
            vehicles: VehicleService::new(db.clone()),
            employees: EmployeeService::new(db.clone()),
            inventory: InventoryService::new(db.clone()),
            work_orders: WorkOrderService::new(db.clone(), event_sender),
            auth,
            db,
            config,
        }
    }
}

/// Builds the full application router: versioned API routes, health probes
/// and Swagger UI, with tracing and CORS layers applied.
pub fn app_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/vehicles", handlers::vehicles::vehicle_routes())
        .nest("/employees", handlers::employees::employee_routes())
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest("/work-orders", handlers::work_orders::work_order_routes());

    let auth_service = state.auth.clone();

    Router::new()
        .nest("/api/v1", api_v1)
        .nest("/health", handlers::health::health_routes())
        .merge(openapi::swagger_ui())
        .layer(Extension(auth_service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
