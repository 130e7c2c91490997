//! Service layer for the inventory application.
//! - Business rules (validation, delete guards, create-if-absent) on top of `models`.
//! - Storage behind the `InventoryRepository` trait so services run against
//!   PostgreSQL or an in-memory store.

pub mod errors;
pub mod inventory;
#[cfg(test)]
pub mod test_support;
