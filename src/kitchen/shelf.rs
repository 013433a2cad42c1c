//! Shelf tier: the shared overflow store.
//!
//! Accepts orders of any temperature. Keeps one FIFO sublist per temperature
//! next to the id index, so the oldest shelf resident of a given temperature
//! (the promotion candidate, and the eviction candidate) is a `front()` away.
//!
//! Time spent here is charged at `decay_factor` for hot and cold orders; room
//! orders are at their preferred location on the shelf and decay at baseline.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use super::order::{KitchenOrder, Temperature};
use crate::types::OrderId;

#[derive(Debug)]
pub struct ShelfTier {
    capacity: usize,
    decay_factor: u32,
    entries: HashMap<OrderId, KitchenOrder>,
    hot: VecDeque<OrderId>,
    cold: VecDeque<OrderId>,
    room: VecDeque<OrderId>,
}

impl ShelfTier {
    pub fn new(capacity: usize, decay_factor: u32) -> Self {
        Self {
            capacity,
            decay_factor,
            entries: HashMap::with_capacity(capacity),
            hot: VecDeque::new(),
            cold: VecDeque::new(),
            room: VecDeque::new(),
        }
    }

    /// Insert iff there is space. The order joins the back of the sublist
    /// matching its temperature and its decay clock restarts.
    pub fn add(&mut self, mut order: KitchenOrder) -> std::result::Result<(), KitchenOrder> {
        if self.entries.len() >= self.capacity {
            return Err(order);
        }
        order.enter_tier(Instant::now());
        let id = order.id().clone();
        self.sublist_mut(order.temperature()).push_back(id.clone());
        self.entries.insert(id, order);
        Ok(())
    }

    /// Remove by id, debiting freshness for the shelf residency.
    ///
    /// Hot and cold orders pay the accelerated rate; room orders pay
    /// baseline.
    pub fn remove(&mut self, id: &OrderId) -> Option<KitchenOrder> {
        let mut order = self.entries.remove(id)?;

        let sublist = self.sublist_mut(order.temperature());
        if let Some(pos) = sublist.iter().position(|held| held == id) {
            sublist.remove(pos);
        }

        let rate = match order.temperature() {
            Temperature::Hot | Temperature::Cold => self.decay_factor,
            Temperature::Room => 1,
        };
        order.debit(rate, Instant::now());
        Some(order)
    }

    /// Oldest shelf-resident hot order, if any. Non-destructive.
    pub fn first_hot(&self) -> Option<&KitchenOrder> {
        self.front_of(&self.hot)
    }

    /// Oldest shelf-resident cold order, if any. Non-destructive.
    pub fn first_cold(&self) -> Option<&KitchenOrder> {
        self.front_of(&self.cold)
    }

    /// Oldest shelf-resident room order, if any. Non-destructive.
    pub fn first_room(&self) -> Option<&KitchenOrder> {
        self.front_of(&self.room)
    }

    /// Select the victim for a forced eviction. Non-destructive; the caller
    /// follows with `remove`.
    ///
    /// Misplaced (hot/cold) residents go first so the freed slot stops their
    /// accelerated decay; between the two sublist heads the one cooked
    /// earlier loses, with cold losing a tie. Only a shelf with no misplaced
    /// resident gives up a room order.
    pub fn order_to_discard(&self) -> Option<&KitchenOrder> {
        match (self.first_hot(), self.first_cold()) {
            (Some(hot), Some(cold)) => {
                if hot.cooked_at() < cold.cooked_at() {
                    Some(hot)
                } else {
                    Some(cold)
                }
            }
            (Some(hot), None) => Some(hot),
            (None, Some(cold)) => Some(cold),
            (None, None) => self.first_room(),
        }
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

    fn sublist_mut(&mut self, temperature: Temperature) -> &mut VecDeque<OrderId> {
        match temperature {
            Temperature::Hot => &mut self.hot,
            Temperature::Cold => &mut self.cold,
            Temperature::Room => &mut self.room,
        }
    }

    fn front_of(&self, sublist: &VecDeque<OrderId>) -> Option<&KitchenOrder> {
        sublist.front().and_then(|id| self.entries.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn order(id: &str, temperature: Temperature, secs: u64) -> KitchenOrder {
        KitchenOrder::for_test(id, temperature, Duration::from_secs(secs))
    }

    /// An order that entered the system `age` ago.
    fn aged(id: &str, temperature: Temperature, age: Duration) -> KitchenOrder {
        let mut o = order(id, temperature, 300);
        o.age_by(age);
        o
    }

    #[test]
    fn test_sublists_are_fifo() {
        let mut shelf = ShelfTier::new(6, 2);
        shelf.add(order("h1", Temperature::Hot, 60)).unwrap();
        shelf.add(order("c1", Temperature::Cold, 60)).unwrap();
        shelf.add(order("h2", Temperature::Hot, 60)).unwrap();
        shelf.add(order("r1", Temperature::Room, 60)).unwrap();

        assert_eq!(shelf.first_hot().unwrap().id().as_str(), "h1");
        assert_eq!(shelf.first_cold().unwrap().id().as_str(), "c1");
        assert_eq!(shelf.first_room().unwrap().id().as_str(), "r1");

        shelf.remove(&OrderId::from("h1")).unwrap();
        assert_eq!(shelf.first_hot().unwrap().id().as_str(), "h2");
        assert_eq!(shelf.len(), 3);
    }

    #[test]
    fn test_full_shelf_hands_order_back() {
        let mut shelf = ShelfTier::new(1, 2);
        shelf.add(order("a", Temperature::Room, 60)).unwrap();
        let rejected = shelf.add(order("b", Temperature::Hot, 60)).unwrap_err();
        assert_eq!(rejected.id().as_str(), "b");
        assert_eq!(shelf.len(), 1);
    }

    #[test]
    fn test_misplaced_orders_pay_accelerated_decay() {
        let mut shelf = ShelfTier::new(4, 2);
        shelf.add(order("cold", Temperature::Cold, 10)).unwrap();
        shelf.add(order("room", Temperature::Room, 10)).unwrap();

        std::thread::sleep(Duration::from_millis(40));

        let cold = shelf.remove(&OrderId::from("cold")).unwrap();
        let room = shelf.remove(&OrderId::from("room")).unwrap();

        let cold_spent = Duration::from_secs(10) - cold.remaining();
        let room_spent = Duration::from_secs(10) - room.remaining();
        // Roughly double; bounds are loose to absorb scheduling jitter
        assert!(cold_spent > room_spent * 3 / 2, "{cold_spent:?} vs {room_spent:?}");
    }

    #[test]
    fn test_discard_prefers_older_misplaced_head() {
        let mut shelf = ShelfTier::new(4, 2);
        shelf.add(aged("old-hot", Temperature::Hot, Duration::from_secs(3))).unwrap();
        shelf.add(aged("young-cold", Temperature::Cold, Duration::from_millis(500))).unwrap();
        shelf.add(aged("ancient-room", Temperature::Room, Duration::from_secs(8))).unwrap();

        // Room never beats a misplaced candidate, however old
        assert_eq!(shelf.order_to_discard().unwrap().id().as_str(), "old-hot");
    }

    #[test]
    fn test_discard_picks_older_of_hot_and_cold_heads() {
        let mut shelf = ShelfTier::new(4, 2);
        shelf.add(aged("hot", Temperature::Hot, Duration::from_secs(1))).unwrap();
        shelf.add(aged("cold", Temperature::Cold, Duration::from_secs(4))).unwrap();
        assert_eq!(shelf.order_to_discard().unwrap().id().as_str(), "cold");

        let mut shelf = ShelfTier::new(4, 2);
        shelf.add(aged("hot", Temperature::Hot, Duration::from_secs(4))).unwrap();
        shelf.add(aged("cold", Temperature::Cold, Duration::from_secs(1))).unwrap();
        assert_eq!(shelf.order_to_discard().unwrap().id().as_str(), "hot");
    }

    #[test]
    fn test_discard_single_candidate_and_room_fallback() {
        let mut shelf = ShelfTier::new(4, 2);
        shelf.add(order("r", Temperature::Room, 60)).unwrap();
        assert_eq!(shelf.order_to_discard().unwrap().id().as_str(), "r");

        shelf.add(order("c", Temperature::Cold, 60)).unwrap();
        assert_eq!(shelf.order_to_discard().unwrap().id().as_str(), "c");

        shelf.remove(&OrderId::from("c")).unwrap();
        shelf.remove(&OrderId::from("r")).unwrap();
        assert!(shelf.order_to_discard().is_none());
    }

    #[test]
    fn test_discard_within_sublist_is_fifo_not_youngest() {
        let mut shelf = ShelfTier::new(4, 2);
        shelf.add(aged("c-first", Temperature::Cold, Duration::from_millis(200))).unwrap();
        shelf.add(aged("c-second", Temperature::Cold, Duration::from_secs(6))).unwrap();

        // Only sublist heads are candidates: c-first entered the shelf first
        // and stays the candidate even though c-second was cooked earlier.
        assert_eq!(shelf.order_to_discard().unwrap().id().as_str(), "c-first");
    }
}
