//! Order sources for the workload driver.
//!
//! Orders come either from a JSON file (the array shape the upstream problem
//! server hands out) or from the synthetic generator used by demos and load
//! tests.

use std::path::Path;

use rand::prelude::*;

use crate::kitchen::{Order, Temperature};
use crate::types::Result;

/// Load a JSON array of wire orders from disk.
pub fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let file = std::fs::File::open(path)?;
    let orders = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(orders)
}

const DISH_NAMES: &[(&str, Temperature)] = &[
    ("Beef Stew", Temperature::Hot),
    ("Ramen", Temperature::Hot),
    ("Pad Thai", Temperature::Hot),
    ("Margherita Pizza", Temperature::Hot),
    ("Ice Cream", Temperature::Cold),
    ("Poke Bowl", Temperature::Cold),
    ("Cheesecake", Temperature::Cold),
    ("Cobb Salad", Temperature::Cold),
    ("Sourdough Loaf", Temperature::Room),
    ("Granola Bar", Temperature::Room),
    ("Banh Mi", Temperature::Room),
];

/// Generate a synthetic workload of `count` valid orders.
pub fn synthetic_orders(count: usize) -> Vec<Order> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let (name, temperature) = DISH_NAMES[rng.random_range(0..DISH_NAMES.len())];
            Order {
                id: uuid::Uuid::new_v4().simple().to_string(),
                name: name.to_string(),
                temp: temperature.to_string(),
                price: rng.random_range(100..3000),
                freshness: rng.random_range(20..300),
            }
        })
        .collect()
}
