//! Product and category route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::catalog::{self, CatalogPage, CatalogParams, SortOrder};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Deserialize a numeric query parameter leniently.
///
/// Absent, empty, or non-numeric values become `None` so they fall back to
/// the engine's defaults instead of rejecting the request.
fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse().ok()))
}

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub cat: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub offset: Option<i64>,
}

/// Response body of `GET /api/categories`.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Catalog listing: filter, sort, and paginate the product collection.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<CatalogPage> {
    let snapshot = state.products().snapshot().await;
    let params = CatalogParams {
        search: query.search,
        cat: query.cat,
        sort: SortOrder::parse(&query.sort),
        limit: query.limit,
        offset: query.offset,
    };

    Json(catalog::query(&snapshot, &params))
}

/// Product detail by SKU (case-insensitive).
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<Product>> {
    state
        .products()
        .get(&sku)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {sku}")))
}

/// Sorted unique category list.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let snapshot = state.products().snapshot().await;
    Json(CategoriesResponse {
        categories: catalog::categories(&snapshot),
    })
}
