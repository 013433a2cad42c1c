//! Configuration structures.
//!
//! Defaults mirror the standard challenge parameters; the CLI layer
//! overrides individual fields from flags.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tier capacities and the shelf decay multiplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KitchenConfig {
    /// Heater capacity (hot orders).
    pub heater_capacity: usize,

    /// Cooler capacity (cold orders).
    pub cooler_capacity: usize,

    /// Shelf capacity (overflow, any temperature).
    pub shelf_capacity: usize,

    /// Freshness decay multiplier charged to hot/cold orders while they sit
    /// on the shelf. Room orders always decay at rate 1.
    pub decay_factor: u32,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            heater_capacity: 6,
            cooler_capacity: 6,
            shelf_capacity: 12,
            decay_factor: 2,
        }
    }
}

/// Workload driver timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Interval between consecutive placements.
    #[serde(with = "humantime_serde")]
    pub rate: Duration,

    /// Minimum pickup delay.
    #[serde(with = "humantime_serde")]
    pub min_pickup: Duration,

    /// Maximum pickup delay.
    #[serde(with = "humantime_serde")]
    pub max_pickup: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            rate: Duration::from_millis(500),
            min_pickup: Duration::from_secs(4),
            max_pickup: Duration::from_secs(8),
        }
    }
}
