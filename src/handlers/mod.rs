//! HTTP layer. Handlers parse input, call the service layer and shape the
//! response; no business rules live here.

pub mod auth;
pub mod common;
pub mod customers;
pub mod employees;
pub mod health;
pub mod inventory;
pub mod vehicles;
pub mod work_orders;
