//! Kitchen integration tests — the coordinator under the same
//! `Arc<Mutex<_>>` guard and driver the production harness uses.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use kitchen_core::actions::{parse_actions, ActionKind, ActionLog, SharedBuffer};
use kitchen_core::harness;
use kitchen_core::{HarnessConfig, Kitchen, KitchenConfig, Order, OrderId};

/// Helper: a guarded kitchen plus the buffer its action log lands in.
fn guarded_kitchen(config: KitchenConfig) -> (Arc<Mutex<Kitchen>>, SharedBuffer) {
    let (log, buffer) = ActionLog::in_memory();
    (Arc::new(Mutex::new(Kitchen::new(config, log))), buffer)
}

fn order(id: &str, temp: &str, freshness: i64) -> Order {
    Order {
        id: id.to_string(),
        name: format!("dish {id}"),
        temp: temp.to_string(),
        price: 750,
        freshness,
    }
}

#[tokio::test]
async fn test_shelf_resident_expires_under_accelerated_decay() {
    let config = KitchenConfig {
        heater_capacity: 1,
        cooler_capacity: 1,
        shelf_capacity: 1,
        decay_factor: 2,
    };
    let (kitchen, _buffer) = guarded_kitchen(config);

    // cold2 takes the cooler; cold3 overflows onto the shelf where a cold
    // order burns freshness at double rate
    kitchen.lock().await.place(order("cold2", "cold", 1)).unwrap();
    kitchen.lock().await.place(order("cold3", "cold", 2)).unwrap();

    // 1.3s on the shelf at rate 2 exceeds cold3's 2s of freshness
    tokio::time::sleep(Duration::from_millis(1300)).await;

    let err = kitchen.lock().await.pickup(&OrderId::from("cold3")).unwrap_err();
    assert!(err.is_expired());

    // The expired order did not return to any tier; the cooler is untouched
    let guard = kitchen.lock().await;
    assert_eq!(guard.shelf_len(), 0);
    assert_eq!(guard.cooler_len(), 1);
}

#[tokio::test]
async fn test_concurrent_traffic_preserves_invariants() {
    let config = KitchenConfig {
        heater_capacity: 2,
        cooler_capacity: 2,
        shelf_capacity: 3,
        decay_factor: 2,
    };
    let (kitchen, _buffer) = guarded_kitchen(config);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..40 {
        let kitchen = Arc::clone(&kitchen);
        let temp = ["hot", "cold", "room"][i % 3];
        let id = format!("o-{i}");
        tasks.spawn(async move {
            kitchen.lock().await.place(order(&id, temp, 120)).unwrap();
            tokio::time::sleep(Duration::from_millis(5 + (i as u64 % 7))).await;
            // Discarded orders legitimately come back not-found
            let _ = kitchen.lock().await.pickup(&OrderId::new(id));
        });
    }

    // Capacity bounds hold at every observation point
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(2)).await;
        let guard = kitchen.lock().await;
        assert!(guard.heater_len() <= 2);
        assert!(guard.cooler_len() <= 2);
        assert!(guard.shelf_len() <= 3);
    }

    while tasks.join_next().await.is_some() {}

    let guard = kitchen.lock().await;
    assert_eq!(guard.heater_len() + guard.cooler_len() + guard.shelf_len(), 0);
}

#[tokio::test]
async fn test_driver_end_to_end_log_is_coherent() {
    let config = KitchenConfig {
        heater_capacity: 1,
        cooler_capacity: 1,
        shelf_capacity: 2,
        decay_factor: 2,
    };
    let (kitchen, buffer) = guarded_kitchen(config);

    let orders: Vec<Order> = (0..12)
        .map(|i| order(&format!("o-{i}"), ["hot", "cold", "room"][i % 3], 60))
        .collect();

    let harness_config = HarnessConfig {
        rate: Duration::from_millis(5),
        min_pickup: Duration::from_millis(10),
        max_pickup: Duration::from_millis(40),
    };
    let report = harness::run(Arc::clone(&kitchen), orders, &harness_config).await;

    assert_eq!(report.placed, 12);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.delivered + report.expired + report.missing, 12);

    let actions = parse_actions(std::io::Cursor::new(buffer.contents())).unwrap();

    // Every placed order has exactly one place record, and any pickup or
    // discard of an id comes after its place
    for i in 0..12 {
        let id = format!("o-{i}");
        let place_idx = actions
            .iter()
            .position(|a| a.id == id && a.action == ActionKind::Place)
            .unwrap_or_else(|| panic!("no place record for {id}"));
        for (idx, action) in actions.iter().enumerate() {
            if action.id == id && action.action != ActionKind::Place {
                assert!(idx > place_idx, "{:?} for {id} precedes its place", action.action);
            }
        }
        assert_eq!(
            actions
                .iter()
                .filter(|a| a.id == id && a.action == ActionKind::Place)
                .count(),
            1
        );
    }

    // Terminal outcomes in the log agree with the report
    let discards = actions.iter().filter(|a| a.action == ActionKind::Discard).count();
    let pickups = actions.iter().filter(|a| a.action == ActionKind::Pickup).count();
    assert_eq!(discards, report.missing);
    assert_eq!(pickups + discards, 12);

    // Timestamps are non-decreasing: the guard serializes log appends
    for pair in actions.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }

    let guard = kitchen.lock().await;
    assert_eq!(guard.heater_len() + guard.cooler_len() + guard.shelf_len(), 0);
}

#[tokio::test]
async fn test_driver_skips_pickup_for_rejected_orders() {
    let (kitchen, buffer) = guarded_kitchen(KitchenConfig::default());

    let mut orders = vec![order("good", "hot", 60)];
    orders.push(Order {
        id: "bad".to_string(),
        name: String::new(),
        temp: "plasma".to_string(),
        price: 0,
        freshness: 60,
    });

    let harness_config = HarnessConfig {
        rate: Duration::from_millis(1),
        min_pickup: Duration::from_millis(1),
        max_pickup: Duration::from_millis(5),
    };
    let report = harness::run(Arc::clone(&kitchen), orders, &harness_config).await;

    assert_eq!(report.placed, 1);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.delivered, 1);

    let actions = parse_actions(std::io::Cursor::new(buffer.contents())).unwrap();
    assert!(actions.iter().all(|a| a.id != "bad"));
}
