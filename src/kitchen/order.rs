//! Order value model: wire shape, temperatures, and freshness accounting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::types::OrderId;

/// Required storage temperature of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Room,
}

impl Temperature {
    pub fn as_str(self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Room => "room",
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Temperature {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Temperature::Hot),
            "cold" => Ok(Temperature::Cold),
            "room" => Ok(Temperature::Room),
            _ => Err(()),
        }
    }
}

/// Wire shape of an order, as received from the order source and returned on
/// pickup.
///
/// `temp` stays a plain string here so an invalid value lands in the
/// validation aggregate rather than failing deserialization, and `price` /
/// `freshness` are signed so non-positive inputs survive parsing long enough
/// to be rejected by the same aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub temp: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Maximum remaining shelf life at the time of cooking, in seconds.
    pub freshness: i64,
}

/// An admitted order as tracked inside the tiers.
///
/// `cooked_at` is fixed at admission and orders the shelf's eviction
/// tiebreak; `stored_at` is reset on every tier entry and anchors the decay
/// charge for the current residency interval.
#[derive(Debug, Clone)]
pub struct KitchenOrder {
    id: OrderId,
    name: String,
    temperature: Temperature,
    price: i64,
    remaining: Duration,
    cooked_at: Instant,
    stored_at: Instant,
}

impl KitchenOrder {
    /// Build the internal record for a validated wire order.
    ///
    /// `temperature` must be the parse result for `order.temp`; validation
    /// already produced it.
    pub fn admit(order: Order, temperature: Temperature) -> Self {
        let now = Instant::now();
        Self {
            id: OrderId::new(order.id),
            name: order.name,
            temperature,
            price: order.price,
            remaining: Duration::from_secs(order.freshness.max(0) as u64),
            cooked_at: now,
            stored_at: now,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Remaining effective freshness after all debits so far.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Instant this order first entered the system.
    pub fn cooked_at(&self) -> Instant {
        self.cooked_at
    }

    /// Mark entry into a tier; the decay clock restarts here.
    pub(crate) fn enter_tier(&mut self, now: Instant) {
        self.stored_at = now;
    }

    /// Charge freshness for the residency interval ending at `now`, at the
    /// given decay rate (wall time consumed per unit of freshness).
    ///
    /// Saturates at zero; a zero remainder is the expired state.
    pub(crate) fn debit(&mut self, rate: u32, now: Instant) {
        let elapsed = now.saturating_duration_since(self.stored_at);
        self.remaining = self.remaining.saturating_sub(elapsed * rate);
        self.stored_at = now;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Project back to the wire shape. Freshness mirrors the input units:
    /// whole remaining seconds.
    pub fn into_wire(self) -> Order {
        Order {
            id: self.id.to_string(),
            name: self.name,
            temp: self.temperature.to_string(),
            price: self.price,
            freshness: self.remaining.as_secs() as i64,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_test(id: &str, temperature: Temperature, remaining: Duration) -> Self {
        let now = Instant::now();
        Self {
            id: OrderId::from(id),
            name: format!("test {id}"),
            temperature,
            price: 100,
            remaining,
            cooked_at: now,
            stored_at: now,
        }
    }

    /// Shift both timestamps into the past, simulating elapsed residency
    /// without sleeping.
    #[cfg(test)]
    pub(crate) fn age_by(&mut self, elapsed: Duration) {
        if let Some(cooked) = self.cooked_at.checked_sub(elapsed) {
            self.cooked_at = cooked;
        }
        if let Some(stored) = self.stored_at.checked_sub(elapsed) {
            self.stored_at = stored;
        }
    }
}
