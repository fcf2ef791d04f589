//! Content-addressed storage of rendered documents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Number of digest bytes kept in artifact names (128 bits).
const DIGEST_BYTES: usize = 16;

/// Hex digest of the document's UTF-8 bytes; identical documents hash identically.
pub fn content_digest(document: &str) -> String {
    let digest = Sha256::digest(document.as_bytes());
    hex::encode(&digest[..DIGEST_BYTES])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// First time this document was generated; the file was written.
    Written(PathBuf),
    /// An artifact with the same digest already exists and was left untouched.
    Duplicate(PathBuf),
}

impl StoreOutcome {
    pub fn path(&self) -> &Path {
        match self {
            StoreOutcome::Written(path) | StoreOutcome::Duplicate(path) => path,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, StoreOutcome::Written(_))
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn artifact_path(&self, digest: &str, name: &str) -> PathBuf {
        self.root.join(format!("{digest}-{name}.xml"))
    }

    /// Randomized sibling of the artifact, so concurrent writers never share a temp file.
    fn temp_path(&self, digest: &str, name: &str) -> PathBuf {
        let mut suffix = [0u8; 8];
        rand::thread_rng().fill(&mut suffix);
        self.root.join(format!(".{digest}-{name}.{}.tmp", hex::encode(suffix)))
    }

    /// Writes `document` under its digest unless it is already present.
    ///
    /// The file is written to a temporary sibling and renamed into place, so a
    /// failure never leaves a truncated artifact behind.
    pub async fn store(&self, name: &str, digest: &str, document: &str) -> Result<StoreOutcome> {
        let path = self.artifact_path(digest, name);
        if tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("failed to stat artifact: {}", path.display()))?
        {
            debug!(path = %path.display(), "artifact already generated");
            return Ok(StoreOutcome::Duplicate(path));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("failed to create directory: {}", self.root.display()))?;

        let tmp = self.temp_path(digest, name);
        tokio::fs::write(&tmp, document)
            .await
            .with_context(|| format!("failed to write artifact: {}", tmp.display()))?;
        if let Err(err) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err)
                .with_context(|| format!("failed to move artifact into place: {}", path.display()));
        }
        Ok(StoreOutcome::Written(path))
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
