//! Variant-aware stock resolution and decrement.
//!
//! When a product carries `variantes`, the per-size counts are the only
//! truth and the bare `stock` field is ignored; otherwise `stock` is it.

use thiserror::Error;

use crate::models::Product;

/// Errors from stock resolution.
#[derive(Debug, Error)]
pub enum StockError {
    /// The product has variants but none matches the requested size.
    #[error("product {sku} has no variant for size {}", .size.as_deref().unwrap_or("(none)"))]
    VariantNotFound {
        /// Product SKU (catalog casing).
        sku: String,
        /// Requested size, if any.
        size: Option<String>,
    },

    /// Not enough units to satisfy the request.
    #[error(
        "insufficient stock for {sku}{}: requested {requested}, available {available}",
        .size.as_deref().map(|s| format!(" {s}")).unwrap_or_default()
    )]
    Insufficient {
        /// Product SKU (catalog casing).
        sku: String,
        /// Requested size, if any.
        size: Option<String>,
        /// Units asked for.
        requested: u32,
        /// Units actually sellable.
        available: u32,
    },
}

/// Sellable units for the product, optionally keyed by size.
///
/// # Errors
///
/// Returns [`StockError::VariantNotFound`] when the product has variants
/// and `size` matches none of them (including `size = None`).
pub fn available_stock(product: &Product, size: Option<&str>) -> Result<u32, StockError> {
    match &product.variantes {
        Some(variantes) => variantes
            .iter()
            .find(|v| Some(v.talla.as_str()) == size)
            .map(|v| v.stock)
            .ok_or_else(|| StockError::VariantNotFound {
                sku: product.sku.to_string(),
                size: size.map(str::to_owned),
            }),
        None => Ok(product.stock),
    }
}

/// Reduce the resolved target's stock by `qty`, in place.
///
/// The mutation is visible to every subsequent read of the same `Product`
/// value; there is no copy-on-write.
///
/// # Errors
///
/// Returns [`StockError::VariantNotFound`] for an unknown size and
/// [`StockError::Insufficient`] when `qty` exceeds the available units; in
/// both cases nothing is modified.
pub fn decrement_stock(product: &mut Product, size: Option<&str>, qty: u32) -> Result<(), StockError> {
    let available = available_stock(product, size)?;
    if qty > available {
        return Err(StockError::Insufficient {
            sku: product.sku.to_string(),
            size: size.map(str::to_owned),
            requested: qty,
            available,
        });
    }

    match &mut product.variantes {
        Some(variantes) => {
            // available_stock already proved the variant exists
            if let Some(variant) = variantes.iter_mut().find(|v| Some(v.talla.as_str()) == size) {
                variant.stock -= qty;
            }
        }
        None => product.stock -= qty,
    }

    Ok(())
}
