//! Order store: append-only collection of completed checkouts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::Order;

use super::StoreError;

/// On-disk shape: `{"orders": [...]}`.
#[derive(Debug, Deserialize)]
struct OrdersFile {
    orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
struct OrdersFileRef<'a> {
    orders: &'a [Order],
}

/// In-memory order log backed by a JSON file.
///
/// Orders are only ever appended; the mutex serializes append + rewrite so
/// concurrent checkouts cannot interleave file writes.
#[derive(Debug)]
pub struct OrderStore {
    path: PathBuf,
    orders: Mutex<Vec<Order>>,
}

impl OrderStore {
    /// Open the order file, creating an empty collection on first run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on filesystem failure and
    /// [`StoreError::Corrupt`] if an existing file does not decode to
    /// `{"orders": [...]}`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        super::ensure_file(&path, &OrdersFileRef { orders: &[] }).await?;
        let file: OrdersFile = super::read_collection(&path).await?;

        Ok(Self {
            path,
            orders: Mutex::new(file.orders),
        })
    }

    /// Append one order and rewrite the file.
    ///
    /// On a failed write the order is removed from memory again, so memory
    /// and file stay in step; the caller decides whether to retry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the rewrite fails.
    pub async fn append(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.lock().await;
        orders.push(order);

        let result = super::write_collection(&self.path, &OrdersFileRef { orders: &orders }).await;
        if result.is_err() {
            orders.pop();
        }
        result
    }

    /// Number of recorded orders.
    pub async fn count(&self) -> usize {
        self.orders.lock().await.len()
    }

    /// All orders belonging to a user, oldest first.
    pub async fn for_user(&self, user_id: tienda_core::UserId) -> Vec<Order> {
        self.orders
            .lock()
            .await
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }
}
