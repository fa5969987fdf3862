use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Source of the opaque auth token attached to backend calls.
#[async_trait]
pub trait SessionContext: Send + Sync {
    async fn token(&self) -> Option<String>;
    async fn store_token(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

#[derive(Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl SessionContext for MemorySession {
    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// Token persisted to a single file so it survives process restarts.
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionContext for FileSession {
    async fn token(&self) -> Option<String> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create session directory '{}'", parent.display())
            })?;
        }
        tokio::fs::write(&self.path, token)
            .await
            .with_context(|| format!("failed to write session file '{}'", self.path.display()))?;
        debug!(path = %self.path.display(), "stored session token");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("failed to remove session file '{}'", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
