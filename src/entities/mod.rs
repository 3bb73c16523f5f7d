//! sea-orm entity definitions for the workshop schema.

pub mod customer;
pub mod employee;
pub mod inventory_item;
pub mod user;
pub mod vehicle;
pub mod work_order;
pub mod work_order_counter;
pub mod work_order_item;
