//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # API (JSON)
//! GET  /api/health             - Store health summary
//! GET  /api/products           - Catalog query (search/cat/sort/limit/offset)
//! GET  /api/products/{sku}     - Product detail
//! GET  /api/categories         - Sorted unique category list
//!
//! # Auth
//! POST /api/auth/register      - Create account, start session
//! POST /api/auth/login         - Start session
//! GET  /api/auth/me            - Current identity (or null)
//! POST /api/auth/logout        - End session
//!
//! # Orders (requires auth)
//! POST /api/orders             - Checkout the cart
//! ```

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Response body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    pub ok: bool,
    pub products: usize,
    pub time: String,
}

/// Store health summary.
async fn api_health(State(state): State<AppState>) -> Json<ApiHealth> {
    Json(ApiHealth {
        ok: true,
        products: state.products().count().await,
        time: Utc::now().to_rfc3339(),
    })
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{sku}", get(products::show))
}

/// Create all API routes for the storefront.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(api_health))
        .route("/categories", get(products::categories))
        .nest("/products", product_routes())
        .nest("/auth", auth_routes())
        .route("/orders", post(orders::create))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}
