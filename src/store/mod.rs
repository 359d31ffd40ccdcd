//! Order stores.
//!
//! The scheduling engine never touches storage. Callers load an order
//! snapshot through an [`OrderStore`], hand it to the engine, and append
//! new orders through the same store.
//!
//! - [`CsvOrderStore`]: one record per line in a text file.
//! - [`MemoryOrderStore`]: a vector behind a lock, for tests and embedding.

mod csv;
pub mod record;

pub use self::csv::CsvOrderStore;

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::Order;
use crate::validation::validate_order;

/// Source and sink of orders.
///
/// Implementations own their own concurrency discipline; the engine only
/// ever sees the returned snapshot.
pub trait OrderStore: Send + Sync {
    /// Loads every stored order, in stored order.
    ///
    /// # Errors
    /// [`SchedulerError::StoreUnavailable`] or
    /// [`SchedulerError::MalformedRecord`].
    fn load_orders(&self) -> SchedulerResult<Vec<Order>>;

    /// Appends one order.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidOrder`] if the order violates its
    /// invariants; [`SchedulerError::StoreUnavailable`] if it cannot be
    /// written.
    fn append_order(&self, order: &Order) -> SchedulerResult<()>;
}

/// Rejects orders that could not be read back as a valid record.
pub(crate) fn check_storable(order: &Order) -> SchedulerResult<()> {
    validate_order(order).map_err(|errors| {
        let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
        SchedulerError::InvalidOrder(reasons.join("; "))
    })?;

    let has_line_break = [&order.customer_name, &order.dish_name, &order.category]
        .iter()
        .any(|field| field.contains(['\n', '\r']));
    if has_line_break {
        return Err(SchedulerError::InvalidOrder(
            "text fields must not contain line breaks".to_string(),
        ));
    }
    // Would be read back as a header row and dropped.
    if order.customer_name == record::HEADER[0] {
        return Err(SchedulerError::InvalidOrder(format!(
            "customer_name must not be {:?}",
            record::HEADER[0]
        )));
    }
    Ok(())
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `orders`.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store holds no orders.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderStore for MemoryOrderStore {
    fn load_orders(&self) -> SchedulerResult<Vec<Order>> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.clone())
    }

    fn append_order(&self, order: &Order) -> SchedulerResult<()> {
        check_storable(order)?;
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.push(order.clone());
        debug!(customer = %order.customer_name, dish = %order.dish_name, total = orders.len(), "order stored in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::parse_timestamp;
    use std::sync::Arc;

    fn order(customer: &str, prep: u32) -> Order {
        Order::new(customer, "Samosa", prep, parse_timestamp("2025-03-01 16:00:00").unwrap())
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryOrderStore::new();
        assert!(store.is_empty());
        store.append_order(&order("Asha", 4)).unwrap();
        store.append_order(&order("Ravi", 6)).unwrap();

        let loaded = store.load_orders().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].customer_name, "Asha");
        assert_eq!(loaded[1].customer_name, "Ravi");
    }

    #[test]
    fn test_memory_store_with_orders() {
        let store = MemoryOrderStore::with_orders(vec![order("Asha", 4)]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_orders() {
        let store = MemoryOrderStore::new();
        assert!(matches!(
            store.append_order(&order("Asha", 0)),
            Err(SchedulerError::InvalidOrder(_))
        ));
        assert!(matches!(
            store.append_order(&order("", 3)),
            Err(SchedulerError::InvalidOrder(_))
        ));
        assert!(matches!(
            store.append_order(&order("A\nB", 3)),
            Err(SchedulerError::InvalidOrder(_))
        ));
        assert!(matches!(
            store.append_order(&order("customer_name", 3)),
            Err(SchedulerError::InvalidOrder(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_appends() {
        let store = Arc::new(MemoryOrderStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.append_order(&order(&format!("c{i}"), i + 1)).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.load_orders().unwrap().len(), 8);
    }

    #[test]
    fn test_store_is_object_safe() {
        let store: Box<dyn OrderStore> = Box::new(MemoryOrderStore::new());
        assert!(store.load_orders().unwrap().is_empty());
    }
}
