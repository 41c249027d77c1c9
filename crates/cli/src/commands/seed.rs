//! Seed the data directory with a demo catalog.
//!
//! Writes `productos.json` with a small clothing catalog (with and without
//! size variants) and creates empty `users.json` / `orders.json` files, so
//! the storefront can start immediately afterwards.

use std::path::Path;

use tracing::info;

use tienda_core::{Price, Sku};
use tienda_storefront::models::{Product, Variant};
use tienda_storefront::store::{OrderStore, ProductStore, UserStore};

/// Write demo data into `data_dir`.
///
/// # Arguments
///
/// * `data_dir` - Target directory; created if missing
/// * `force` - Overwrite an existing `productos.json`
///
/// # Errors
///
/// Returns an error if the catalog already exists (without `--force`) or
/// any file cannot be written.
pub async fn run(data_dir: &str, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = Path::new(data_dir);
    tokio::fs::create_dir_all(dir).await?;

    let products_file = dir.join("productos.json");
    if !force && tokio::fs::try_exists(&products_file).await? {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            products_file.display()
        )
        .into());
    }

    let catalog = demo_catalog();
    ProductStore::create(&products_file, &catalog).await?;
    info!(path = %products_file.display(), products = catalog.len(), "Catalog written");

    // Created empty only when missing; existing accounts and orders survive
    UserStore::open(dir.join("users.json")).await?;
    OrderStore::open(dir.join("orders.json")).await?;
    info!("User and order collections ready");

    Ok(())
}

fn variant(talla: &str, stock: u32) -> Variant {
    Variant {
        talla: talla.to_string(),
        stock,
    }
}

/// The demo catalog: Chilean street-wear basics.
fn demo_catalog() -> Vec<Product> {
    vec![
        Product {
            sku: Sku::new("POL-001"),
            nombre: "Polera lisa negra".to_string(),
            descripcion: "Polera de algodon organico, corte clasico".to_string(),
            categoria: "poleras".to_string(),
            precio: Price::new(9_990),
            imagen: "/imagenes/pol-001.jpg".to_string(),
            stock: 0,
            variantes: Some(vec![variant("S", 8), variant("M", 12), variant("L", 6)]),
        },
        Product {
            sku: Sku::new("POL-002"),
            nombre: "Polera estampada valdivia".to_string(),
            descripcion: "Serigrafia artesanal, edicion limitada".to_string(),
            categoria: "poleras".to_string(),
            precio: Price::new(12_990),
            imagen: "/imagenes/pol-002.jpg".to_string(),
            stock: 0,
            variantes: Some(vec![variant("S", 4), variant("M", 5), variant("L", 2)]),
        },
        Product {
            sku: Sku::new("PLR-001"),
            nombre: "Poleron canguro gris".to_string(),
            descripcion: "Poleron con capucha y bolsillo frontal".to_string(),
            categoria: "polerones".to_string(),
            precio: Price::new(24_990),
            imagen: "/imagenes/plr-001.jpg".to_string(),
            stock: 0,
            variantes: Some(vec![variant("M", 7), variant("L", 3), variant("XL", 2)]),
        },
        Product {
            sku: Sku::new("JOC-001"),
            nombre: "Jockey clasico".to_string(),
            descripcion: "Jockey ajustable, bordado frontal".to_string(),
            categoria: "accesorios".to_string(),
            precio: Price::new(7_990),
            imagen: "/imagenes/joc-001.jpg".to_string(),
            stock: 15,
            variantes: None,
        },
        Product {
            sku: Sku::new("BOT-001"),
            nombre: "Botella reutilizable".to_string(),
            descripcion: "Botella de acero inoxidable 600ml".to_string(),
            categoria: "accesorios".to_string(),
            precio: Price::new(11_990),
            imagen: "/imagenes/bot-001.jpg".to_string(),
            stock: 20,
            variantes: None,
        },
    ]
}
