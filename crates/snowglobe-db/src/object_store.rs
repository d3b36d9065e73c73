//! Filesystem object store for snapshot images.
//!
//! Objects are addressed by relative keys such as `villages/<id>.png` and
//! written beneath a single root directory.

use std::path::{Component, Path, PathBuf};

use crate::error::DbError;

/// Blob storage rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidKey`] for keys that escape the root and
    /// [`DbError::Io`] if the write fails.
    pub async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DbError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(key, bytes = bytes.len(), "Stored object");
        Ok(())
    }

    /// Read the object under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidKey`] or [`DbError::Io`].
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, DbError> {
        let path = self.resolve(key)?;
        Ok(tokio::fs::read(&path).await?)
    }

    /// Remove the object under `key`. Removing a missing object succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidKey`] or [`DbError::Io`].
    pub async fn delete(&self, key: &str) -> Result<(), DbError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "Removed object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, DbError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(DbError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> FsObjectStore {
        FsObjectStore::new(std::env::temp_dir().join(format!("snowglobe-objects-{}", uuid::Uuid::now_v7())))
    }

    #[tokio::test]
    async fn put_get_delete() {
        let store = temp_store();
        store.put("villages/a.png", b"png").await.unwrap();
        assert_eq!(store.get("villages/a.png").await.unwrap(), b"png");

        store.delete("villages/a.png").await.unwrap();
        assert!(store.get("villages/a.png").await.is_err());
        store.delete("villages/a.png").await.unwrap();

        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_root() {
        let store = temp_store();
        for key in ["../evil.png", "/etc/passwd", "", "villages/../../x"] {
            assert!(matches!(store.put(key, b"x").await, Err(DbError::InvalidKey(_))), "{key}");
        }
    }
}
