//! Kitchen - the placement, migration, and eviction coordinator.
//!
//! The Kitchen owns all mutable state: the two temperature-bound tiers and
//! the shared overflow shelf are plain structs mutated via `&mut self`, not
//! separate actors. Callers that interleave placements and pickups serialize
//! every operation behind one outer guard (the harness uses
//! `Arc<tokio::sync::Mutex<Kitchen>>`), which makes all tier mutations and
//! log appends of a single call atomic with respect to any other call.
//!
//! Placement routing:
//! 1. the preferred tier for the order's temperature, else
//! 2. the shelf, else
//! 3. promotion of a misplaced shelf resident back to its (now free)
//!    preferred tier to make room, else
//! 4. forced eviction of the shelf's discard candidate.

pub mod order;
pub mod shelf;
pub mod tier;

pub use order::{KitchenOrder, Order, Temperature};
pub use shelf::ShelfTier;
pub use tier::TemperatureTier;

use crate::actions::{ActionKind, ActionLog, StorageTarget};
use crate::types::{Error, KitchenConfig, OrderId, Result};
use crate::validation::validate_order;

/// The coordinator. See the module docs for the placement algorithm.
#[derive(Debug)]
pub struct Kitchen {
    heater: TemperatureTier,
    cooler: TemperatureTier,
    shelf: ShelfTier,
    actions: ActionLog,
}

impl Kitchen {
    pub fn new(config: KitchenConfig, actions: ActionLog) -> Self {
        Self {
            heater: TemperatureTier::new(config.heater_capacity),
            cooler: TemperatureTier::new(config.cooler_capacity),
            shelf: ShelfTier::new(config.shelf_capacity, config.decay_factor.max(1)),
            actions,
        }
    }

    /// Admit a freshly cooked order.
    ///
    /// Validation failures return the aggregate error without touching any
    /// tier or emitting a log line. A valid order always lands somewhere:
    /// capacity exhaustion is absorbed by promotion or forced eviction and
    /// is never an error.
    pub fn place(&mut self, order: Order) -> Result<()> {
        let temperature = validate_order(&order)?;
        let admitted = KitchenOrder::admit(order, temperature);

        match temperature {
            Temperature::Hot => {
                let id = admitted.id().clone();
                match self.heater.add(admitted) {
                    Ok(()) => self.actions.record(ActionKind::Place, &id, StorageTarget::Heater),
                    Err(rejected) => self.place_on_shelf(rejected),
                }
            }
            Temperature::Cold => {
                let id = admitted.id().clone();
                match self.cooler.add(admitted) {
                    Ok(()) => self.actions.record(ActionKind::Place, &id, StorageTarget::Cooler),
                    Err(rejected) => self.place_on_shelf(rejected),
                }
            }
            Temperature::Room => self.place_on_shelf(admitted),
        }
        Ok(())
    }

    /// Collect an order.
    ///
    /// Probes heater, cooler, then shelf; the removing tier debits the
    /// freshness consumed there. An order found with no freshness left is
    /// expired and does not return to any tier.
    pub fn pickup(&mut self, id: &OrderId) -> Result<Order> {
        let (order, target) = if let Some(order) = self.heater.remove(id) {
            (order, StorageTarget::Heater)
        } else if let Some(order) = self.cooler.remove(id) {
            (order, StorageTarget::Cooler)
        } else if let Some(order) = self.shelf.remove(id) {
            (order, StorageTarget::Shelf)
        } else {
            return Err(Error::not_found(id.clone()));
        };

        self.actions.record(ActionKind::Pickup, id, target);

        if order.is_expired() {
            return Err(Error::expired(id.clone()));
        }
        Ok(order.into_wire())
    }

    pub fn heater_len(&self) -> usize {
        self.heater.len()
    }

    pub fn cooler_len(&self) -> usize {
        self.cooler.len()
    }

    pub fn shelf_len(&self) -> usize {
        self.shelf.len()
    }

    /// True iff exactly one tier currently holds the id.
    pub fn holds(&self, id: &OrderId) -> bool {
        let hits = [
            self.heater.contains(id),
            self.cooler.contains(id),
            self.shelf.contains(id),
        ];
        hits.iter().filter(|&&h| h).count() == 1
    }

    /// Overflow path: shelf first, then promotion-then-place, then forced
    /// eviction. The order ends up on the shelf in every branch.
    fn place_on_shelf(&mut self, order: KitchenOrder) {
        let id = order.id().clone();
        let order = match self.shelf.add(order) {
            Ok(()) => {
                self.actions.record(ActionKind::Place, &id, StorageTarget::Shelf);
                return;
            }
            Err(rejected) => rejected,
        };

        let promoted = match order.temperature() {
            Temperature::Hot => self.promote_first_cold(),
            Temperature::Cold => self.promote_first_hot(),
            Temperature::Room => false,
        };
        if !promoted {
            self.discard_shelf_victim();
        }

        match self.shelf.add(order) {
            Ok(()) => self.actions.record(ActionKind::Place, &id, StorageTarget::Shelf),
            Err(_) => {
                tracing::error!(order_id = %id, "shelf still full after promotion/eviction");
            }
        }
    }

    /// Move the shelf's oldest cold order into the cooler, if both exist and
    /// the cooler has room. Frees one shelf slot on success.
    fn promote_first_cold(&mut self) -> bool {
        if !self.cooler.has_space() {
            return false;
        }
        let Some(id) = self.shelf.first_cold().map(|order| order.id().clone()) else {
            return false;
        };
        let Some(order) = self.shelf.remove(&id) else {
            return false;
        };
        match self.cooler.add(order) {
            Ok(()) => {
                self.actions.record(ActionKind::Move, &id, StorageTarget::Cooler);
                true
            }
            Err(rejected) => {
                // Unreachable while the outer guard serializes calls; put the
                // order back rather than lose it.
                let _ = self.shelf.add(rejected);
                false
            }
        }
    }

    /// Mirror image: oldest hot shelf order into the heater.
    fn promote_first_hot(&mut self) -> bool {
        if !self.heater.has_space() {
            return false;
        }
        let Some(id) = self.shelf.first_hot().map(|order| order.id().clone()) else {
            return false;
        };
        let Some(order) = self.shelf.remove(&id) else {
            return false;
        };
        match self.heater.add(order) {
            Ok(()) => {
                self.actions.record(ActionKind::Move, &id, StorageTarget::Heater);
                true
            }
            Err(rejected) => {
                let _ = self.shelf.add(rejected);
                false
            }
        }
    }

    /// Forced eviction: remove the shelf's discard candidate.
    fn discard_shelf_victim(&mut self) {
        let Some(id) = self.shelf.order_to_discard().map(|order| order.id().clone()) else {
            return;
        };
        if self.shelf.remove(&id).is_some() {
            self.actions.record(ActionKind::Discard, &id, StorageTarget::Shelf);
        }
    }
}
