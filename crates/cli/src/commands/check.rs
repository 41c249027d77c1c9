//! Validate that every collection file loads.
//!
//! Exercises the same loading path the storefront uses at startup, so a
//! corrupt file is caught here with the same error the server would refuse
//! to start with.

use std::path::Path;

use tracing::info;

use tienda_storefront::store::{OrderStore, ProductStore, UserStore};

/// Load all three stores from `data_dir` and report counts.
///
/// # Errors
///
/// Returns an error - and exits nonzero via `main` - when any collection
/// file is missing (products) or fails shape validation.
pub async fn run(data_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dir = Path::new(data_dir);

    let products = ProductStore::load(dir.join("productos.json")).await?;
    let users = UserStore::open(dir.join("users.json")).await?;
    let orders = OrderStore::open(dir.join("orders.json")).await?;

    info!("Store check passed");
    info!("  Products: {}", products.count().await);
    info!("  Users: {}", users.count().await);
    info!("  Orders: {}", orders.count().await);

    Ok(())
}
