//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tienda_core::{Email, UserId};

/// A registered user.
///
/// Created at registration and never mutated afterwards. The serde shape is
/// the persisted one: `passwordHash` and `createdAt` (epoch milliseconds)
/// keep existing `users.json` files readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque, immutable ID generated at creation.
    pub id: UserId,
    /// Unique (case-insensitive, stored lowercased) email address.
    pub email: Email,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// Argon2 password hash. Never serialized into API responses; see
    /// [`PublicUser`].
    pub password_hash: String,
    /// When the account was created.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// The user view returned by the API (no hash, no timestamps).
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: Email,
    pub nombre: String,
    pub apellido: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nombre: user.nombre.clone(),
            apellido: user.apellido.clone(),
        }
    }
}
