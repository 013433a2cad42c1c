//! Workload driver.
//!
//! Feeds orders into the kitchen on a fixed cadence and spawns one task per
//! placed order that picks it up after a uniformly random delay. All kitchen
//! access goes through one `Arc<Mutex<_>>` — the serialization guard the
//! coordinator's correctness rests on. The driver holds the lock only for
//! the duration of a single `place` or `pickup` call.

use std::sync::Arc;
use std::time::Duration;

use rand::prelude::*;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::kitchen::{Kitchen, Order};
use crate::types::{Error, HarnessConfig, OrderId};

/// Tallies of one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverReport {
    /// Orders admitted into a tier.
    pub placed: usize,
    /// Orders rejected by validation.
    pub rejected: usize,
    /// Pickups that returned the order.
    pub delivered: usize,
    /// Pickups that found the order expired.
    pub expired: usize,
    /// Pickups that found nothing (the order was discarded).
    pub missing: usize,
}

/// Drive the full workload to completion.
///
/// One placement per `rate` tick; each successfully placed order gets an
/// independent pickup task delayed by a random duration in
/// `[min_pickup, max_pickup]`.
pub async fn run(
    kitchen: Arc<Mutex<Kitchen>>,
    orders: Vec<Order>,
    config: &HarnessConfig,
) -> DriverReport {
    let mut report = DriverReport::default();
    let mut pickups: JoinSet<PickupOutcome> = JoinSet::new();

    let mut ticker = tokio::time::interval(config.rate.max(Duration::from_millis(1)));
    for order in orders {
        ticker.tick().await;

        let id = OrderId::new(order.id.clone());
        info!(order_id = %id, temp = %order.temp, "received");

        match kitchen.lock().await.place(order) {
            Ok(()) => report.placed += 1,
            Err(err) => {
                warn!(order_id = %id, "rejected: {err}");
                report.rejected += 1;
                continue;
            }
        }

        let delay = random_delay(config.min_pickup, config.max_pickup);
        let kitchen = Arc::clone(&kitchen);
        pickups.spawn(async move {
            tokio::time::sleep(delay).await;
            match kitchen.lock().await.pickup(&id) {
                Ok(order) => {
                    info!(order_id = %id, freshness = order.freshness, "delivered");
                    PickupOutcome::Delivered
                }
                Err(err @ Error::Expired(_)) => {
                    warn!(order_id = %id, "{err}");
                    PickupOutcome::Expired
                }
                Err(err @ Error::NotFound(_)) => {
                    warn!(order_id = %id, "{err}");
                    PickupOutcome::Missing
                }
                Err(err) => {
                    warn!(order_id = %id, "pickup failed: {err}");
                    PickupOutcome::Missing
                }
            }
        });
    }

    while let Some(joined) = pickups.join_next().await {
        match joined {
            Ok(PickupOutcome::Delivered) => report.delivered += 1,
            Ok(PickupOutcome::Expired) => report.expired += 1,
            Ok(PickupOutcome::Missing) => report.missing += 1,
            Err(err) => warn!("pickup task failed: {err}"),
        }
    }

    report
}

#[derive(Debug, Clone, Copy)]
enum PickupOutcome {
    Delivered,
    Expired,
    Missing,
}

fn random_delay(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let spread = (max - min).as_millis() as u64;
    min + Duration::from_millis(rand::rng().random_range(0..=spread))
}
