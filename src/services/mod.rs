//! Service layer. All business rules live here; handlers stay thin.

pub mod customers;
pub mod employees;
pub mod inventory;
pub mod vehicles;
pub mod work_orders;

pub use customers::CustomerService;
pub use employees::EmployeeService;
pub use inventory::InventoryService;
pub use vehicles::VehicleService;
pub use work_orders::WorkOrderService;
