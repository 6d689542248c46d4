//! Ephemeral artifact store: one scratch file per in-flight request.
//!
//! `materialize` runs only after validation succeeds; `release` consumes
//! the artifact, so a materialized file can be removed exactly once and the
//! handle cannot outlive its request.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nanoid::nanoid;

use crate::error::{AppError, Result};

/// Handle to one request's on-disk image copy.
#[derive(Debug)]
pub struct ScratchArtifact {
    path: PathBuf,
    len: u64,
    created_at: DateTime<Utc>,
}

impl ScratchArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone)]
pub struct ScratchStore {
    dir: PathBuf,
}

impl ScratchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the image bytes under a fresh collision-resistant name,
    /// creating the scratch directory on first use. nanoid keeps names
    /// unique across concurrent requests, not merely across time.
    pub async fn materialize(&self, bytes: &[u8], extension: &str) -> Result<ScratchArtifact> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::StorageUnavailable(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let path = self.dir.join(format!("{}.{extension}", nanoid!()));
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            AppError::StorageUnavailable(format!("cannot write {}: {e}", path.display()))
        })?;

        Ok(ScratchArtifact {
            path,
            len: bytes.len() as u64,
            created_at: Utc::now(),
        })
    }

    /// Removes the artifact. Best-effort: failures are logged and
    /// swallowed so a leaked file cannot fail a response already in flight.
    pub async fn release(&self, artifact: ScratchArtifact) {
        if let Err(e) = tokio::fs::remove_file(&artifact.path).await {
            tracing::warn!(
                path = %artifact.path.display(),
                error = %e,
                "failed to remove scratch artifact"
            );
        }
    }
}
