//! Temperature-bound tier: the heater and the cooler.
//!
//! A bounded associative store for orders whose required temperature matches
//! the tier. Orders held here decay at the baseline rate of 1 (wall time
//! passed = freshness consumed). Capacity overflow is the coordinator's
//! concern; this tier only reports it by handing the order back.

use std::collections::HashMap;
use std::time::Instant;

use super::order::KitchenOrder;
use crate::types::OrderId;

/// Bounded store for a single temperature. Plain struct owned by the
/// coordinator and mutated via `&mut self`; serialization happens outside.
#[derive(Debug)]
pub struct TemperatureTier {
    capacity: usize,
    entries: HashMap<OrderId, KitchenOrder>,
}

impl TemperatureTier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Insert iff there is space, restarting the order's decay clock.
    /// A full tier hands the order back unchanged; it never evicts.
    pub fn add(&mut self, mut order: KitchenOrder) -> std::result::Result<(), KitchenOrder> {
        if self.entries.len() >= self.capacity {
            return Err(order);
        }
        order.enter_tier(Instant::now());
        self.entries.insert(order.id().clone(), order);
        Ok(())
    }

    /// Remove by id, debiting freshness at rate 1 for the time spent here.
    pub fn remove(&mut self, id: &OrderId) -> Option<KitchenOrder> {
        let mut order = self.entries.remove(id)?;
        order.debit(1, Instant::now());
        Some(order)
    }

    pub fn has_space(&self) -> bool {
        self.entries.len() < self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.entries.contains_key(id)
    }
}
