//! In-memory session registry.
//!
//! # Responsibilities
//! - Own the session id → cart mapping exclusively
//! - Apply add/merge, set-quantity, remove, clear and checkout settlement
//! - Hand out owned snapshots so no caller ever holds a registry lock
//!
//! # Design Decisions
//! - `DashMap` shards the registry; a session's entry is write-locked for the
//!   whole read-modify-snapshot step, so same-session mutations are
//!   linearizable while unrelated sessions proceed on other shards
//! - Reads never materialize an entry; only a successful add creates one
//! - Entries that become empty are dropped, so the registry only holds
//!   active (non-empty) carts
//! - No operation blocks on I/O

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;

use crate::cart::model::{Cart, CartLine};
use crate::observability::metrics;

/// Registry-wide figures for the admin API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartStats {
    pub active_sessions: usize,
    pub total_lines: usize,
    pub total_items: i64,
}

/// Thread-safe, cloneable handle to the session registry.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    inner: Arc<DashMap<String, Vec<CartLine>>>,
}

impl CartStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cart for the session; empty when the session is unknown.
    pub fn get(&self, session_id: &str) -> Cart {
        self.inner
            .get(session_id)
            .map(|r| Cart::new(r.value().clone()))
            .unwrap_or_default()
    }

    /// Add a line, merging into an existing line for the same product.
    ///
    /// A merge only sums quantities; the price and name recorded by the first
    /// add are kept. Non-positive quantities are ignored and the current cart
    /// is returned unchanged.
    pub fn add(&self, session_id: &str, line: CartLine) -> Cart {
        if line.quantity <= 0 {
            tracing::debug!(
                session_id = %session_id,
                product_id = line.product_id,
                quantity = line.quantity,
                "Ignoring non-positive cart add"
            );
            return self.get(session_id);
        }

        let product_id = line.product_id;
        let snapshot = {
            let mut entry = self.inner.entry(session_id.to_owned()).or_default();
            let lines = entry.value_mut();
            match lines.iter_mut().find(|l| l.product_id == product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
            Cart::new(lines.clone())
        };

        tracing::debug!(session_id = %session_id, product_id, "Cart line added");
        self.record("add");
        snapshot
    }

    /// Overwrite a line's quantity; a value of zero or less removes the line.
    ///
    /// Does nothing when the product is not already in the cart.
    pub fn set_quantity(&self, session_id: &str, product_id: i64, quantity: i64) -> Cart {
        self.mutate_existing(session_id, "set_quantity", |lines| {
            if quantity <= 0 {
                lines.retain(|l| l.product_id != product_id);
            } else if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity = quantity;
            }
        })
    }

    /// Remove the product's line if present.
    pub fn remove(&self, session_id: &str, product_id: i64) -> Cart {
        self.mutate_existing(session_id, "remove", |lines| {
            lines.retain(|l| l.product_id != product_id);
        })
    }

    /// Drop the session's cart entirely.
    pub fn clear(&self, session_id: &str) -> Cart {
        if self.inner.remove(session_id).is_some() {
            tracing::debug!(session_id = %session_id, "Cart cleared");
        }
        self.record("clear");
        Cart::default()
    }

    /// Subtract quantities that were successfully ordered.
    ///
    /// Lines added after the order snapshot was taken are left alone; lines
    /// whose remaining quantity reaches zero are removed.
    pub fn settle(&self, session_id: &str, ordered: &[CartLine]) -> Cart {
        self.mutate_existing(session_id, "settle", |lines| {
            for placed in ordered {
                if let Some(line) = lines.iter_mut().find(|l| l.product_id == placed.product_id) {
                    line.quantity = line.quantity.saturating_sub(placed.quantity);
                }
            }
            lines.retain(|l| l.quantity > 0);
        })
    }

    /// Registry-wide counts.
    pub fn stats(&self) -> CartStats {
        let mut stats = CartStats::default();
        for entry in self.inner.iter() {
            stats.active_sessions += 1;
            stats.total_lines += entry.value().len();
            stats.total_items = entry
                .value()
                .iter()
                .fold(stats.total_items, |acc, l| acc.saturating_add(l.quantity));
        }
        stats
    }

    /// Number of sessions holding a non-empty cart.
    pub fn active_sessions(&self) -> usize {
        self.inner.len()
    }

    /// Run `f` under the session's entry lock, without creating the entry.
    fn mutate_existing<F>(&self, session_id: &str, op: &'static str, f: F) -> Cart
    where
        F: FnOnce(&mut Vec<CartLine>),
    {
        let snapshot = match self.inner.get_mut(session_id) {
            Some(mut entry) => {
                f(entry.value_mut());
                Cart::new(entry.value().clone())
            }
            None => return Cart::default(),
        };

        // Re-checked under the lock: a concurrent add may have refilled it.
        if snapshot.is_empty() {
            self.inner.remove_if(session_id, |_, lines| lines.is_empty());
        }

        tracing::debug!(session_id = %session_id, op, lines = snapshot.len(), "Cart updated");
        self.record(op);
        snapshot
    }

    fn record(&self, op: &'static str) {
        metrics::record_cart_mutation(op);
        metrics::record_active_sessions(self.inner.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn latte(quantity: i64) -> CartLine {
        CartLine::new(1, quantity, 500, "Latte")
    }

    #[test]
    fn test_unknown_session_is_empty() {
        let store = CartStore::new();
        assert!(store.get("never-seen").is_empty());
        assert_eq!(store.active_sessions(), 0, "reads must not create entries");
    }

    #[test]
    fn test_add_merge_then_zero_removes() {
        let store = CartStore::new();

        let cart = store.add("s1", latte(2));
        assert_eq!(cart.lines(), &[CartLine::new(1, 2, 500, "Latte")]);

        let cart = store.add("s1", CartLine::new(1, 3, 450, "Iced Latte"));
        assert_eq!(cart.lines(), &[CartLine::new(1, 5, 500, "Latte")]);

        let cart = store.set_quantity("s1", 1, 0);
        assert!(cart.is_empty());
        assert!(store.get("s1").is_empty());
    }

    #[test]
    fn test_new_lines_append_in_order() {
        let store = CartStore::new();
        store.add("s1", CartLine::new(3, 1, 350, "Cappuccino"));
        store.add("s1", CartLine::new(1, 1, 300, "Espresso"));
        let cart = store.add("s1", CartLine::new(3, 2, 350, "Cappuccino"));

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(cart.line(3).unwrap().quantity, 3);
    }

    #[test]
    fn test_non_positive_add_is_ignored() {
        let store = CartStore::new();
        assert!(store.add("s1", latte(0)).is_empty());
        assert_eq!(store.active_sessions(), 0);

        store.add("s1", latte(2));
        let cart = store.add("s1", latte(-5));
        assert_eq!(cart.line(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_overwrites_only_target() {
        let store = CartStore::new();
        store.add("s1", latte(2));
        store.add("s1", CartLine::new(2, 4, 250, "Americano"));

        let cart = store.set_quantity("s1", 2, 7);
        assert_eq!(cart.line(2).unwrap().quantity, 7);
        assert_eq!(cart.line(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_unknown_line_is_noop() {
        let store = CartStore::new();
        store.add("s1", latte(2));
        let cart = store.set_quantity("s1", 99, 3);
        assert_eq!(cart.lines(), &[latte(2)]);

        assert!(store.set_quantity("ghost", 1, 3).is_empty());
        assert_eq!(store.active_sessions(), 1);
    }

    #[test]
    fn test_remove() {
        let store = CartStore::new();
        store.add("s1", latte(2));
        store.add("s1", CartLine::new(2, 1, 250, "Americano"));

        let unchanged = store.remove("s1", 42);
        assert_eq!(unchanged.len(), 2);

        let cart = store.remove("s1", 1);
        assert_eq!(cart.lines(), &[CartLine::new(2, 1, 250, "Americano")]);
    }

    #[test]
    fn test_clear_drops_session() {
        let store = CartStore::new();
        store.add("s1", latte(2));
        assert!(store.clear("s1").is_empty());
        assert!(store.get("s1").is_empty());
        assert_eq!(store.active_sessions(), 0);

        let cart = store.add("s1", latte(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = CartStore::new();
        store.add("a", latte(1));
        store.add("b", CartLine::new(2, 3, 250, "Americano"));
        store.clear("a");
        assert_eq!(store.get("b").len(), 1);
    }

    #[test]
    fn test_settle_keeps_lines_added_after_snapshot() {
        let store = CartStore::new();
        store.add("s1", latte(2));
        let ordered = store.get("s1").into_lines();

        store.add("s1", latte(1));
        store.add("s1", CartLine::new(2, 1, 250, "Americano"));

        let cart = store.settle("s1", &ordered);
        assert_eq!(cart.line(1).unwrap().quantity, 1);
        assert_eq!(cart.line(2).unwrap().quantity, 1);

        let cart = store.settle("s1", &store.get("s1").into_lines());
        assert!(cart.is_empty());
        assert_eq!(store.active_sessions(), 0);
    }

    #[test]
    fn test_stats() {
        let store = CartStore::new();
        store.add("a", latte(2));
        store.add("a", CartLine::new(2, 1, 250, "Americano"));
        store.add("b", latte(4));

        let stats = store.stats();
        assert_eq!(stats.active_sessions, 2);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.total_items, 7);
    }

    #[test]
    fn test_item_totals_saturate_instead_of_overflowing() {
        let store = CartStore::new();
        store.add("s", latte(i64::MAX));
        store.add("s", CartLine::new(2, 1, 250, "Americano"));
        store.add("t", latte(i64::MAX));

        assert_eq!(store.get("s").summary().item_count, i64::MAX);
        assert_eq!(store.stats().total_items, i64::MAX);
    }

    #[test]
    fn test_concurrent_adds_same_product_sum() {
        let store = CartStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        store.add("shared", latte(1));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let cart = store.get("shared");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(1).unwrap().quantity, 2000);
    }

    #[test]
    fn test_concurrent_adds_distinct_products_all_present() {
        let store = CartStore::new();
        let handles: Vec<_> = (0..16)
            .map(|id| {
                let store = store.clone();
                thread::spawn(move || {
                    store.add("shared", CartLine::new(id, 1, 100, format!("item-{id}")));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let cart = store.get("shared");
        assert_eq!(cart.len(), 16);
        for id in 0..16 {
            assert!(cart.line(id).is_some(), "missing product {id}");
        }
    }
}
