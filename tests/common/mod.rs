#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

use workshop_api::{
    db::DbPool,
    entities::{customer, employee, inventory_item, vehicle, work_order},
    migrator::Migrator,
    services::{
        customers::{CustomerRequest, CustomerService},
        employees::{EmployeeRequest, EmployeeService},
        inventory::{CreateInventoryItemRequest, InventoryService},
        vehicles::{VehicleRequest, VehicleService},
        work_orders::{CreateWorkOrderRequest, WorkOrderService},
    },
};

pub struct TestContext {
    pub db: Arc<DbPool>,
    pub customers: CustomerService,
    pub vehicles: VehicleService,
    pub employees: EmployeeService,
    pub inventory: InventoryService,
    pub work_orders: WorkOrderService,
}

/// Fresh in-memory database with the full schema applied. A single pooled
/// connection is required: every SQLite in-memory connection is its own
/// database.
pub async fn setup() -> TestContext {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let db = Arc::new(db);
    TestContext {
        customers: CustomerService::new(db.clone()),
        vehicles: VehicleService::new(db.clone()),
        employees: EmployeeService::new(db.clone()),
        inventory: InventoryService::new(db.clone()),
        work_orders: WorkOrderService::new(db.clone(), None),
        db,
    }
}

pub async fn seed_customer(ctx: &TestContext) -> customer::Model {
    ctx.customers
        .create(CustomerRequest {
            name: "Maria Silva".to_string(),
            email: Some("maria@example.com".to_string()),
            phone: Some("11 99999-0001".to_string()),
            address: None,
        })
        .await
        .expect("create customer")
}

pub async fn seed_vehicle(ctx: &TestContext, customer_id: i32, plate: &str) -> vehicle::Model {
    ctx.vehicles
        .create(VehicleRequest {
            customer_id,
            license_plate: plate.to_string(),
            make: Some("Fiat".to_string()),
            model: Some("Uno".to_string()),
            color: Some("red".to_string()),
            model_year: Some("2014".to_string()),
        })
        .await
        .expect("create vehicle")
}

pub async fn seed_employee(ctx: &TestContext) -> employee::Model {
    ctx.employees
        .create(EmployeeRequest {
            name: "Carlos Pereira".to_string(),
            phone: "11 99999-0002".to_string(),
            secondary_phone: None,
            cpf: "52998224725".to_string(),
            address: None,
            birth_date: None,
            hire_date: None,
            salary: None,
            role: Some("mechanic".to_string()),
            notes: None,
        })
        .await
        .expect("create employee")
}

pub async fn seed_item(
    ctx: &TestContext,
    code: &str,
    quantity: i32,
    sale_price: Decimal,
) -> inventory_item::Model {
    ctx.inventory
        .create_item(CreateInventoryItemRequest {
            name: format!("Part {}", code),
            code: code.to_string(),
            category: Some("filters".to_string()),
            quantity,
            minimum_stock: 2,
            cost_price: sale_price / Decimal::from(2),
            sale_price,
            supplier: None,
            status: None,
            notes: None,
        })
        .await
        .expect("create inventory item")
}

/// A freshly created order for the given vehicle/customer pair.
pub async fn seed_order(
    ctx: &TestContext,
    vehicle_id: i32,
    customer_id: i32,
) -> work_order::Model {
    ctx.work_orders
        .create(CreateWorkOrderRequest {
            vehicle_id,
            customer_id,
            employee_id: None,
            description: "Engine check".to_string(),
            entry_date: None,
            expected_completion: None,
            diagnosis: None,
            payment_method: None,
            notes: None,
        })
        .await
        .expect("create work order")
}
