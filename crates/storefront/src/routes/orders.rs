//! Order route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::checkout::{CartLine, CheckoutProcessor, CheckoutReceipt};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Request body of `POST /api/orders`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Checkout the submitted cart for the logged-in user.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutReceipt>)> {
    let processor = CheckoutProcessor::new(state.products(), state.orders());
    let receipt = processor.checkout(user.id, &body.items).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
