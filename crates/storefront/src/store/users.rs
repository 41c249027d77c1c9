//! User store: accounts created at registration, keyed by email.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use tienda_core::UserId;

use crate::models::User;

use super::StoreError;

/// On-disk shape: `{"users": [...]}`.
#[derive(Debug, Deserialize)]
struct UsersFile {
    users: Vec<User>,
}

#[derive(Debug, Serialize)]
struct UsersFileRef<'a> {
    users: &'a [User],
}

/// In-memory user collection backed by a JSON file.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Open the user file, creating an empty collection on first run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on filesystem failure and
    /// [`StoreError::Corrupt`] if an existing file does not decode to
    /// `{"users": [...]}`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        super::ensure_file(&path, &UsersFileRef { users: &[] }).await?;
        let file: UsersFile = super::read_collection(&path).await?;

        Ok(Self {
            path,
            users: RwLock::new(file.users),
        })
    }

    /// Case-insensitive lookup by email.
    ///
    /// Stored emails are already lowercased, so the input is lowercased for
    /// the comparison.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let needle = email.trim().to_lowercase();
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.as_str() == needle)
            .cloned()
    }

    /// Lookup by ID.
    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Number of registered users.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Insert a new user and rewrite the file.
    ///
    /// The duplicate-email check runs under the same write lock as the
    /// insert, so two concurrent registrations for one address cannot both
    /// succeed. On a failed write the user is removed from memory again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is already registered
    /// and [`StoreError::Io`] if the rewrite fails.
    pub async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }

        users.push(user.clone());
        let result = super::write_collection(&self.path, &UsersFileRef { users: &users }).await;
        if result.is_err() {
            users.pop();
            result?;
        }

        Ok(user)
    }
}
