//! Checkout processor: validate a cart, decrement stock, record the order.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tienda_core::{OrderId, OrderStatus, UserId};

use crate::models::{Order, OrderItem};
use crate::stock::{self, StockError};
use crate::store::{OrderStore, ProductStore, StoreError};

/// One `{sku, size?, qty}` entry of a checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    /// Raw SKU; trimmed and matched case-insensitively.
    pub sku: String,
    /// Variant size, for products that have variants.
    #[serde(default)]
    pub size: Option<String>,
    /// Units requested; missing or zero becomes 1.
    #[serde(default)]
    pub qty: Option<u32>,
}

/// The response body of a successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub total: i64,
    pub status: OrderStatus,
}

/// Errors from checkout.
///
/// Every variant names enough detail (SKU, size) for the caller to fix the
/// request; retrying is the caller's decision.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request contained no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// No product matches the given SKU.
    #[error("unknown product: {0}")]
    ProductNotFound(String),

    /// Unknown variant or not enough units.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Persistence failed; the checkout did not take durable effect.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Runs the two-phase checkout against the shared stores.
///
/// The whole flow holds the product collection's write lock, so two
/// concurrent checkouts for the last unit serialize instead of overselling.
/// This is a deliberate strengthening over a validate-then-commit flow with
/// no lock between the phases.
pub struct CheckoutProcessor<'a> {
    products: &'a ProductStore,
    orders: &'a OrderStore,
}

impl<'a> CheckoutProcessor<'a> {
    /// Create a processor borrowing the shared stores.
    #[must_use]
    pub const fn new(products: &'a ProductStore, orders: &'a OrderStore) -> Self {
        Self { products, orders }
    }

    /// Validate the cart, decrement stock, persist, and record the order.
    ///
    /// Phase 1 validates every line without mutating anything, so any
    /// rejection (unknown SKU, unknown variant, insufficient stock) leaves
    /// no side effects. Phase 2 decrements in place and rewrites the
    /// product file, then appends the order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty request,
    /// [`CheckoutError::ProductNotFound`] / [`CheckoutError::Stock`] for
    /// validation failures, and [`CheckoutError::Store`] when persistence
    /// fails (in-memory state is rolled back from disk first).
    pub async fn checkout(
        &self,
        user_id: UserId,
        lines: &[CartLine],
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut products = self.products.write().await;

        // Phase 1: validate, no mutation.
        let mut total: i64 = 0;
        let mut items: Vec<OrderItem> = Vec::with_capacity(lines.len());
        for line in lines {
            let sku = line.sku.trim();
            let qty = line.qty.unwrap_or(1).max(1);
            let size = line.size.as_deref();

            let product = products
                .iter()
                .find(|p| p.sku.matches(sku))
                .ok_or_else(|| CheckoutError::ProductNotFound(sku.to_string()))?;

            let available = stock::available_stock(product, size)?;
            if qty > available {
                return Err(StockError::Insufficient {
                    sku: product.sku.to_string(),
                    size: size.map(str::to_owned),
                    requested: qty,
                    available,
                }
                .into());
            }

            total += product.precio.line_total(qty);
            items.push(OrderItem {
                sku: product.sku.clone(),
                size: line.size.clone(),
                qty,
                price: product.precio,
            });
        }

        // Phase 2: commit under the same lock.
        for item in &items {
            let product = products
                .iter_mut()
                .find(|p| p.sku == item.sku)
                .ok_or_else(|| CheckoutError::ProductNotFound(item.sku.to_string()))?;

            if let Err(err) = stock::decrement_stock(product, item.size.as_deref(), item.qty) {
                // Reachable when one cart repeats a SKU: each line passed
                // phase 1 alone but together they exhaust the stock. Undo
                // the earlier decrements so nothing is taken.
                self.rollback(&mut products).await;
                return Err(err.into());
            }
        }

        if let Err(err) = self.products.persist_locked(&products).await {
            tracing::error!(error = %err, "persisting products after checkout failed");
            self.rollback(&mut products).await;
            return Err(err.into());
        }
        drop(products);

        let order = Order {
            id: OrderId::generate(),
            user_id,
            items,
            total,
            created_at: Utc::now(),
            status: OrderStatus::Paid,
        };
        let receipt = CheckoutReceipt {
            order_id: order.id,
            total,
            status: order.status,
        };

        if let Err(err) = self.orders.append(order).await {
            // Stock is already durably decremented; losing the order record
            // needs operator attention, not silent continuation.
            tracing::error!(
                error = %err,
                order_id = %receipt.order_id,
                user_id = %user_id,
                "recording order after stock decrement failed"
            );
            return Err(err.into());
        }

        tracing::info!(
            order_id = %receipt.order_id,
            user_id = %user_id,
            total = receipt.total,
            "checkout completed"
        );

        Ok(receipt)
    }

    /// Restore the locked collection from disk after a failed commit.
    async fn rollback(&self, products: &mut Vec<crate::models::Product>) {
        if let Err(err) = self.products.reload_locked(products).await {
            tracing::error!(
                error = %err,
                "reload after failed checkout commit also failed; \
                 in-memory stock may be inconsistent until restart"
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tienda_core::{Price, Sku};

    use crate::models::{Product, Variant};

    fn product(sku: &str, precio: u32, stock: u32) -> Product {
        Product {
            sku: Sku::new(sku),
            nombre: format!("Producto {sku}"),
            descripcion: String::new(),
            categoria: "poleras".to_string(),
            precio: Price::new(precio),
            imagen: String::new(),
            stock,
            variantes: None,
        }
    }

    fn sized(sku: &str, precio: u32, tallas: &[(&str, u32)]) -> Product {
        Product {
            variantes: Some(
                tallas
                    .iter()
                    .map(|(talla, stock)| Variant {
                        talla: (*talla).to_string(),
                        stock: *stock,
                    })
                    .collect(),
            ),
            ..product(sku, precio, 0)
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        products: ProductStore,
        orders: OrderStore,
    }

    async fn fixture(catalog: &[Product]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let products = ProductStore::create(dir.path().join("productos.json"), catalog)
            .await
            .unwrap();
        let orders = OrderStore::open(dir.path().join("orders.json"))
            .await
            .unwrap();
        Fixture {
            _dir: dir,
            products,
            orders,
        }
    }

    fn line(sku: &str, qty: u32) -> CartLine {
        CartLine {
            sku: sku.to_string(),
            size: None,
            qty: Some(qty),
        }
    }

    fn sized_line(sku: &str, size: &str, qty: u32) -> CartLine {
        CartLine {
            sku: sku.to_string(),
            size: Some(size.to_string()),
            qty: Some(qty),
        }
    }

    #[tokio::test]
    async fn test_checkout_decrements_and_totals() {
        let fx = fixture(&[product("P1", 1000, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let receipt = processor
            .checkout(UserId::generate(), &[line("P1", 3)])
            .await
            .unwrap();

        assert_eq!(receipt.total, 3000);
        assert_eq!(receipt.status, OrderStatus::Paid);
        assert_eq!(fx.products.get("P1").await.unwrap().stock, 2);
        assert_eq!(fx.orders.count().await, 1);
    }

    #[tokio::test]
    async fn test_insufficient_stock_decrements_nothing() {
        let fx = fixture(&[product("P1", 1000, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let err = processor
            .checkout(UserId::generate(), &[line("P1", 6)])
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Stock(StockError::Insufficient { .. })));
        assert_eq!(fx.products.get("P1").await.unwrap().stock, 5);
        assert_eq!(fx.orders.count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let fx = fixture(&[product("P1", 1000, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let err = processor.checkout(UserId::generate(), &[]).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_unknown_sku_names_it_and_leaves_stock_alone() {
        let fx = fixture(&[product("P1", 1000, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let err = processor
            .checkout(UserId::generate(), &[line("P1", 1), line("NOPE", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::ProductNotFound(ref sku) if sku == "NOPE"));
        assert_eq!(fx.products.get("P1").await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_normalizes_sku_and_qty() {
        let fx = fixture(&[product("POL-001", 2000, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let receipt = processor
            .checkout(
                UserId::generate(),
                &[CartLine {
                    sku: "  pol-001  ".to_string(),
                    size: None,
                    qty: Some(0), // floors to 1
                }],
            )
            .await
            .unwrap();

        assert_eq!(receipt.total, 2000);
        assert_eq!(fx.products.get("POL-001").await.unwrap().stock, 4);
    }

    #[tokio::test]
    async fn test_missing_qty_defaults_to_one() {
        let fx = fixture(&[product("P1", 1500, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let receipt = processor
            .checkout(
                UserId::generate(),
                &[CartLine {
                    sku: "P1".to_string(),
                    size: None,
                    qty: None,
                }],
            )
            .await
            .unwrap();

        assert_eq!(receipt.total, 1500);
    }

    #[tokio::test]
    async fn test_variant_checkout_touches_only_its_size() {
        let fx = fixture(&[
            sized("POL-002", 12990, &[("S", 2), ("M", 3)]),
            product("P1", 1000, 5),
        ])
        .await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        processor
            .checkout(UserId::generate(), &[sized_line("POL-002", "M", 2)])
            .await
            .unwrap();

        let updated = fx.products.get("POL-002").await.unwrap();
        let variantes = updated.variantes.unwrap();
        assert_eq!(variantes[0].stock, 2); // S untouched
        assert_eq!(variantes[1].stock, 1); // M decremented
        // Unrelated SKU untouched
        assert_eq!(fx.products.get("P1").await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_unknown_variant_rejected_with_detail() {
        let fx = fixture(&[sized("POL-002", 12990, &[("S", 2)])]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let err = processor
            .checkout(UserId::generate(), &[sized_line("POL-002", "XL", 1)])
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("POL-002"));
        assert!(msg.contains("XL"));
    }

    #[tokio::test]
    async fn test_repeated_sku_exhausting_stock_takes_nothing() {
        // Each line passes phase 1 alone; together they need 6 of 5
        let fx = fixture(&[product("P1", 1000, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);

        let err = processor
            .checkout(UserId::generate(), &[line("P1", 3), line("P1", 3)])
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Stock(StockError::Insufficient { .. })));
        assert_eq!(fx.products.get("P1").await.unwrap().stock, 5);
        assert_eq!(fx.orders.count().await, 0);
    }

    #[tokio::test]
    async fn test_order_snapshot_preserves_price_and_input_order() {
        let fx = fixture(&[product("P1", 1000, 5), product("P2", 2500, 5)]).await;
        let processor = CheckoutProcessor::new(&fx.products, &fx.orders);
        let user_id = UserId::generate();

        processor
            .checkout(user_id, &[line("P2", 1), line("P1", 2)])
            .await
            .unwrap();

        let orders = fx.orders.for_user(user_id).await;
        assert_eq!(orders.len(), 1);
        let items = &orders[0].items;
        assert_eq!(items[0].sku.as_str(), "P2");
        assert_eq!(items[0].price.amount(), 2500);
        assert_eq!(items[1].sku.as_str(), "P1");
        assert_eq!(orders[0].total, 2500 + 2000);
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_never_oversell() {
        let fx = fixture(&[product("P1", 1000, 1)]).await;
        let fx = std::sync::Arc::new(fx);

        let a = {
            let fx = std::sync::Arc::clone(&fx);
            tokio::spawn(async move {
                CheckoutProcessor::new(&fx.products, &fx.orders)
                    .checkout(UserId::generate(), &[line("P1", 1)])
                    .await
            })
        };
        let b = {
            let fx = std::sync::Arc::clone(&fx);
            tokio::spawn(async move {
                CheckoutProcessor::new(&fx.products, &fx.orders)
                    .checkout(UserId::generate(), &[line("P1", 1)])
                    .await
            })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();

        // Exactly one of the two racing checkouts gets the last unit
        assert_eq!(successes, 1);
        assert_eq!(fx.products.get("P1").await.unwrap().stock, 0);
    }
}
