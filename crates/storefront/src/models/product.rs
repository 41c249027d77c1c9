//! Product domain types.

use serde::{Deserialize, Serialize};

use tienda_core::{Price, Sku};

/// A catalog product.
///
/// `stock` is the sellable count only when `variantes` is absent; when a
/// product carries variants, the per-size counts are authoritative and the
/// bare `stock` field is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, matched case-insensitively.
    pub sku: Sku,
    /// Display name.
    pub nombre: String,
    /// Free-text description, searched together with `nombre`.
    pub descripcion: String,
    /// Exact-match category tag.
    pub categoria: String,
    /// Unit price in CLP.
    pub precio: Price,
    /// Image URI.
    pub imagen: String,
    /// Sellable units when the product has no variants.
    #[serde(default)]
    pub stock: u32,
    /// Per-size stock records; `talla` values are unique within a product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variantes: Option<Vec<Variant>>,
}

/// A per-size stock sub-record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Size label (e.g., "S", "M", "L").
    pub talla: String,
    /// Sellable units for this size.
    pub stock: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_variants() {
        let json = r#"{
            "sku": "POL-001",
            "nombre": "Polera basica",
            "descripcion": "Algodon organico",
            "categoria": "poleras",
            "precio": 9990,
            "imagen": "/imagenes/pol-001.jpg",
            "stock": 5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.sku.as_str(), "POL-001");
        assert_eq!(product.stock, 5);
        assert!(product.variantes.is_none());
    }

    #[test]
    fn test_deserialize_with_variants_and_no_stock() {
        let json = r#"{
            "sku": "POL-002",
            "nombre": "Polera estampada",
            "descripcion": "Serigrafia local",
            "categoria": "poleras",
            "precio": 12990,
            "imagen": "/imagenes/pol-002.jpg",
            "variantes": [
                {"talla": "S", "stock": 2},
                {"talla": "M", "stock": 0}
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        // Missing bare stock defaults to zero; variants carry the real counts
        assert_eq!(product.stock, 0);
        let variantes = product.variantes.unwrap();
        assert_eq!(variantes.len(), 2);
        assert_eq!(variantes[0].talla, "S");
    }

    #[test]
    fn test_serialize_omits_absent_variants() {
        let product = Product {
            sku: Sku::new("POL-001"),
            nombre: "Polera".to_string(),
            descripcion: String::new(),
            categoria: "poleras".to_string(),
            precio: Price::new(9990),
            imagen: String::new(),
            stock: 5,
            variantes: None,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("variantes").is_none());
        assert_eq!(json["precio"], 9990);
    }
}
