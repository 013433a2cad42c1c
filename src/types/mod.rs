//! Core types for the kitchen.
//!
//! This module provides foundational types used throughout the system:
//! - **IDs**: the strongly-typed `OrderId`
//! - **Errors**: application error types with thiserror derives
//! - **Config**: tier capacities, decay factor, and harness timing

mod config;
mod errors;
mod ids;

pub use config::{HarnessConfig, KitchenConfig};
pub use errors::{Error, Result};
pub use ids::OrderId;
