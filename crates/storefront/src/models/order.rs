//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tienda_core::{OrderId, OrderStatus, Price, Sku, UserId};

/// A completed checkout.
///
/// Created exactly once per successful checkout; append-only and immutable
/// after creation. `createdAt` persists as epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque, generated order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Line items in cart order.
    pub items: Vec<OrderItem>,
    /// Sum of `price * qty` over items, in CLP.
    pub total: i64,
    /// When the order was placed.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Always `paid` in this flow (payment is mocked).
    pub status: OrderStatus,
}

/// One line of an order.
///
/// `price` is a snapshot of the unit price at order time: later catalog
/// price changes never rewrite history. `size` stays `null` for products
/// without variants, matching the persisted format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Canonical SKU (the catalog's casing, not the request's).
    pub sku: Sku,
    /// Variant size, if the product has variants.
    pub size: Option<String>,
    /// Units purchased; always >= 1.
    pub qty: u32,
    /// Unit price at order time, in CLP.
    pub price: Price,
}
