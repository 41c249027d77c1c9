//! Status enums for orders.

use serde::{Deserialize, Serialize};

/// Order payment status.
///
/// Checkout is mocked as instantly paid, so `Paid` is the only value ever
/// written today. The enum leaves room for a real payment flow later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Paid,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
        }
    }
}
