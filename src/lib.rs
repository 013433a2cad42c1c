//! # Kitchen Core - Multi-Tier Perishable Order Cache
//!
//! A placement, migration, and eviction engine for freshly cooked orders:
//! - Preferred-tier routing (hot → heater, cold → cooler, room → shelf)
//!   with overflow to the shared shelf
//! - Opportunistic promotion of shelf residents back to their preferred
//!   tier, forced eviction by the shelf's discard policy otherwise
//! - Freshness decay charged per residency interval, at an accelerated rate
//!   for hot/cold orders sitting on the shelf
//! - A structured action log (`place | move | pickup | discard`) as the sole
//!   observable history of a run
//!
//! ## Architecture
//!
//! The `Kitchen` owns all mutable state and is driven via `&mut self`;
//! concurrent callers serialize behind one outer guard:
//! ```text
//!                  ┌─────────────────────────────────┐
//!  place/pickup →  │     Arc<Mutex<Kitchen>>         │
//!                  │  ┌────────┐ ┌────────┐          │
//!                  │  │ Heater │ │ Cooler │          │
//!                  │  └────────┘ └────────┘          │
//!                  │  ┌──────────────────────┐       │
//!                  │  │ Shelf (FIFO/temp)    │ → action log
//!                  │  └──────────────────────┘       │
//!                  └─────────────────────────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod actions;
pub mod harness;
pub mod kitchen;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use kitchen::{Kitchen, Order, Temperature};
pub use types::{Error, HarnessConfig, KitchenConfig, OrderId, Result};
