//! JSON-file stores for the three persisted collections.
//!
//! Each store loads its collection from a named top-level key
//! (`{"productos": [...]}`, `{"users": [...]}`, `{"orders": [...]}`) at
//! startup, serves reads from memory, and rewrites the complete file on
//! every mutation. Mutation and persistence always happen under the owning
//! store's write lock, so there is exactly one writer per file.
//!
//! A file that exists but does not match the expected shape is corrupt: the
//! loading process must refuse to serve traffic rather than start with an
//! empty collection.

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderStore;
pub use products::ProductStore;
pub use users::UserStore;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the collection file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The collection file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but its contents do not match the expected shape
    /// (unparseable JSON, or the top-level collection key is missing).
    #[error("store file {} is corrupt: {reason}", .path.display())]
    Corrupt {
        /// The collection file involved.
        path: PathBuf,
        /// What went wrong while decoding.
        reason: String,
    },

    /// A uniqueness rule was violated (e.g., duplicate user email).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Read and decode a whole collection file.
pub(crate) async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|err| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Serialize and rewrite a whole collection file.
///
/// Pretty-printed with a trailing newline so the files stay diffable and
/// hand-editable, like the seed data they start from.
pub(crate) async fn write_collection<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    let mut raw = serde_json::to_vec_pretty(value).map_err(|err| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    raw.push(b'\n');

    tokio::fs::write(path, raw).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the file with `init` content if it does not exist yet.
pub(crate) async fn ensure_file<T: Serialize + ?Sized>(
    path: &Path,
    init: &T,
) -> Result<(), StoreError> {
    let exists = tokio::fs::try_exists(path).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !exists {
        write_collection(path, init).await?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Numbers {
        values: Vec<u32>,
    }

    #[tokio::test]
    async fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.json");

        let out = Numbers {
            values: vec![1, 2, 3],
        };
        write_collection(&path, &out).await.unwrap();

        let back: Numbers = read_collection(&path).await.unwrap();
        assert_eq!(back, out);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = read_collection::<Numbers>(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.json");
        tokio::fs::write(&path, b"{\"other\": []}").await.unwrap();

        let err = read_collection::<Numbers>(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_ensure_file_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.json");

        write_collection(&path, &Numbers { values: vec![7] })
            .await
            .unwrap();
        ensure_file(&path, &Numbers { values: vec![] })
            .await
            .unwrap();

        let back: Numbers = read_collection(&path).await.unwrap();
        assert_eq!(back.values, vec![7]);
    }
}
