//! Stock-keeping unit identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product's stock-keeping unit.
///
/// SKUs are unique per catalog and matched case-insensitively: `"POL-001"`,
/// `"pol-001"` and `"Pol-001"` all refer to the same product. The original
/// casing is preserved for display and persistence.
///
/// ## Examples
///
/// ```
/// use tienda_core::Sku;
///
/// let sku = Sku::new("POL-001");
/// assert!(sku.matches("pol-001"));
/// assert!(!sku.matches("pol-002"));
/// assert_eq!(sku.as_str(), "POL-001");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a SKU, preserving the given casing.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the SKU as a string slice (original casing).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw string.
    ///
    /// This is the lookup rule for every SKU match in the system.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        // eq_ignore_ascii_case is not enough: SKUs may carry accented
        // letters from product codes
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl PartialEq for Sku {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other.as_str())
    }
}

impl Eq for Sku {}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
