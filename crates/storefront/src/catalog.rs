//! Catalog query engine.
//!
//! Pure filter/sort/paginate over a product snapshot. No I/O here: handlers
//! take a snapshot from the product store and pass it in, so queries run in
//! parallel without touching the store's locks.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::Product;

/// Page size used when the request carries no usable `limit`.
const DEFAULT_LIMIT: i64 = 100;
/// Hard cap on page size.
const MAX_LIMIT: i64 = 100;

/// Requested sort order for catalog queries.
///
/// Unknown or empty values parse to [`SortOrder::Relevance`], never an
/// error: a bad `sort` query parameter degrades to the default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Numeric price, cheapest first.
    PrecioAsc,
    /// Numeric price, most expensive first.
    PrecioDesc,
    /// Name, A first.
    NombreAsc,
    /// Name, Z first.
    NombreDesc,
    /// Default rule: with a search term, products whose name contains the
    /// term rank before those where only the description matches, stable
    /// otherwise; without a search term, stable input order.
    #[default]
    Relevance,
}

impl SortOrder {
    /// Parse the wire value; anything unrecognized is [`Self::Relevance`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "precio-asc" => Self::PrecioAsc,
            "precio-desc" => Self::PrecioDesc,
            "nombre-asc" => Self::NombreAsc,
            "nombre-desc" => Self::NombreDesc,
            _ => Self::Relevance,
        }
    }

    /// The wire value for this order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrecioAsc => "precio-asc",
            Self::PrecioDesc => "precio-desc",
            Self::NombreAsc => "nombre-asc",
            Self::NombreDesc => "nombre-desc",
            Self::Relevance => "",
        }
    }
}

/// Parsed catalog query parameters.
#[derive(Debug, Clone, Default)]
pub struct CatalogParams {
    /// Free-text needle; empty means no text filter.
    pub search: String,
    /// Exact category; empty means no category filter.
    pub cat: String,
    /// Sort order.
    pub sort: SortOrder,
    /// Requested page size; clamped to `[1, 100]`, `None` means default.
    pub limit: Option<i64>,
    /// Requested start index; clamped to `>= 0`, `None` means 0.
    pub offset: Option<i64>,
}

/// One page of catalog results.
///
/// `total` is the filtered count before pagination; `limit` and `offset`
/// echo the clamped values actually applied.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub total: usize,
    pub items: Vec<Product>,
    pub limit: usize,
    pub offset: usize,
}

/// Filter, sort, and paginate a product collection.
pub fn query(products: &[Product], params: &CatalogParams) -> CatalogPage {
    let needle = params.search.trim().to_lowercase();

    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| {
            let text_match = needle.is_empty()
                || format!("{} {}", p.nombre, p.descripcion)
                    .to_lowercase()
                    .contains(&needle);
            let cat_match = params.cat.is_empty() || p.categoria == params.cat;
            text_match && cat_match
        })
        .cloned()
        .collect();

    match params.sort {
        SortOrder::PrecioAsc => out.sort_by(|a, b| a.precio.cmp(&b.precio)),
        SortOrder::PrecioDesc => out.sort_by(|a, b| b.precio.cmp(&a.precio)),
        SortOrder::NombreAsc => out.sort_by(|a, b| collate(&a.nombre, &b.nombre)),
        SortOrder::NombreDesc => out.sort_by(|a, b| collate(&b.nombre, &a.nombre)),
        SortOrder::Relevance => {
            if !needle.is_empty() {
                // sort_by_key is stable: name matches keep their input
                // order among themselves, as do the rest
                out.sort_by_key(|p| !p.nombre.to_lowercase().contains(&needle));
            }
        }
    }

    let total = out.len();
    let offset = usize::try_from(params.offset.unwrap_or(0).max(0)).unwrap_or(0);
    let limit = usize::try_from(params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT))
        .unwrap_or(DEFAULT_LIMIT as usize);

    let items: Vec<Product> = out.into_iter().skip(offset).take(limit).collect();

    CatalogPage {
        total,
        items,
        limit,
        offset,
    }
}

/// Sorted, unique category list.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut cats: Vec<String> = products.iter().map(|p| p.categoria.clone()).collect();
    cats.sort_by(|a, b| collate(a, b));
    cats.dedup();
    cats
}

/// Case-insensitive string ordering.
///
/// Stands in for locale-aware collation: Unicode lowercasing first, exact
/// bytes as the tie-break so equal-ignoring-case strings still order
/// deterministically.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tienda_core::{Price, Sku};

    fn product(sku: &str, nombre: &str, descripcion: &str, categoria: &str, precio: u32) -> Product {
        Product {
            sku: Sku::new(sku),
            nombre: nombre.to_string(),
            descripcion: descripcion.to_string(),
            categoria: categoria.to_string(),
            precio: Price::new(precio),
            imagen: String::new(),
            stock: 10,
            variantes: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("P1", "Polera lisa", "algodon basico", "poleras", 9990),
            product("P2", "Polera estampada", "serigrafia local", "poleras", 12990),
            product("P3", "Poleron canguro", "con capucha, lleva polera de regalo", "polerones", 19990),
            product("P4", "Jockey clasico", "ajustable", "accesorios", 5990),
            product("P5", "Polera oversize", "corte ancho", "poleras", 11990),
        ]
    }

    fn params(search: &str, cat: &str, sort: &str) -> CatalogParams {
        CatalogParams {
            search: search.to_string(),
            cat: cat.to_string(),
            sort: SortOrder::parse(sort),
            limit: None,
            offset: None,
        }
    }

    #[test]
    fn test_no_filters_returns_everything_in_input_order() {
        let page = query(&catalog(), &CatalogParams::default());
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].sku.as_str(), "P1");
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_search_matches_name_and_description_case_insensitive() {
        // "polera" appears in P1/P2/P5 names and in P3's description only
        let page = query(&catalog(), &params("POLERA", "", ""));
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_category_filter_is_exact_and_case_sensitive() {
        let page = query(&catalog(), &params("", "poleras", ""));
        assert_eq!(page.total, 3);

        let page = query(&catalog(), &params("", "Poleras", ""));
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_search_and_category_combine() {
        let page = query(&catalog(), &params("oversize", "poleras", ""));
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].sku.as_str(), "P5");
    }

    #[test]
    fn test_sort_precio_asc_desc_are_reverses() {
        let asc = query(&catalog(), &params("", "", "precio-asc"));
        let desc = query(&catalog(), &params("", "", "precio-desc"));

        let asc_prices: Vec<u32> = asc.items.iter().map(|p| p.precio.amount()).collect();
        let mut reversed: Vec<u32> = desc.items.iter().map(|p| p.precio.amount()).collect();
        reversed.reverse();
        // All prices are distinct, so the orders must be exact mirrors
        assert_eq!(asc_prices, reversed);
        assert!(asc_prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_nombre_is_case_insensitive_lexicographic() {
        let page = query(&catalog(), &params("", "", "nombre-asc"));
        let names: Vec<&str> = page.items.iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Jockey clasico",
                "Polera estampada",
                "Polera lisa",
                "Polera oversize",
                "Poleron canguro",
            ]
        );
    }

    #[test]
    fn test_unknown_sort_falls_back_to_default() {
        let page = query(&catalog(), &params("", "", "precio-descending"));
        // Not an error, and not sorted: input order preserved
        assert_eq!(page.items[0].sku.as_str(), "P1");
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_relevance_puts_name_matches_first() {
        // P3 matches "polera" only via description; with default sort it
        // must come after the three name matches, which keep input order
        let page = query(&catalog(), &params("polera", "", ""));
        let skus: Vec<&str> = page.items.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["P1", "P2", "P5", "P3"]);
    }

    #[test]
    fn test_spec_scenario_search_sort_paginate() {
        // Five products matching "polera", two highest-priced returned
        let mut products = catalog();
        products.push(product("P6", "Polera retro", "estilo ochentero", "poleras", 14990));

        let page = query(
            &products,
            &CatalogParams {
                search: "polera".to_string(),
                sort: SortOrder::parse("precio-desc"),
                limit: Some(2),
                offset: Some(0),
                ..CatalogParams::default()
            },
        );

        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].precio.amount(), 19990);
        assert_eq!(page.items[1].precio.amount(), 14990);
    }

    #[test]
    fn test_pagination_bounds_hold_for_all_combinations() {
        let products = catalog();
        let sorts = ["", "precio-asc", "precio-desc", "nombre-asc", "nombre-desc"];
        let searches = ["", "polera", "zzz"];
        let cats = ["", "poleras"];

        for sort in sorts {
            for search in searches {
                for cat in cats {
                    for limit in [1_i64, 2, 100] {
                        for offset in [0_i64, 1, 3, 10] {
                            let page = query(
                                &products,
                                &CatalogParams {
                                    search: search.to_string(),
                                    cat: cat.to_string(),
                                    sort: SortOrder::parse(sort),
                                    limit: Some(limit),
                                    offset: Some(offset),
                                },
                            );
                            assert!(page.items.len() <= page.limit);
                            if page.offset < page.total {
                                assert!(page.offset + page.items.len() <= page.total);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_offset_beyond_total_returns_empty_with_correct_total() {
        let page = query(
            &catalog(),
            &CatalogParams {
                offset: Some(50),
                ..CatalogParams::default()
            },
        );
        assert_eq!(page.total, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.offset, 50);
    }

    #[test]
    fn test_limit_and_offset_clamping() {
        let page = query(
            &catalog(),
            &CatalogParams {
                limit: Some(0),
                offset: Some(-3),
                ..CatalogParams::default()
            },
        );
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);
        assert_eq!(page.items.len(), 1);

        let page = query(
            &catalog(),
            &CatalogParams {
                limit: Some(1000),
                ..CatalogParams::default()
            },
        );
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_empty_filtered_set() {
        let page = query(&catalog(), &params("no-such-product", "", ""));
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_query_is_idempotent() {
        let products = catalog();
        let params = CatalogParams {
            search: "polera".to_string(),
            sort: SortOrder::parse("precio-desc"),
            limit: Some(3),
            offset: Some(1),
            ..CatalogParams::default()
        };

        let first = query(&products, &params);
        let second = query(&products, &params);

        let firsts: Vec<&str> = first.items.iter().map(|p| p.sku.as_str()).collect();
        let seconds: Vec<&str> = second.items.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(firsts, seconds);
        assert_eq!(first.total, second.total);
    }

    #[test]
    fn test_categories_sorted_unique() {
        assert_eq!(
            categories(&catalog()),
            vec!["accesorios", "poleras", "polerones"]
        );
    }

    #[test]
    fn test_sort_order_parse_roundtrip() {
        for sort in [
            SortOrder::PrecioAsc,
            SortOrder::PrecioDesc,
            SortOrder::NombreAsc,
            SortOrder::NombreDesc,
        ] {
            assert_eq!(SortOrder::parse(sort.as_str()), sort);
        }
        assert_eq!(SortOrder::parse("garbage"), SortOrder::Relevance);
        assert_eq!(SortOrder::parse(""), SortOrder::Relevance);
    }
}
