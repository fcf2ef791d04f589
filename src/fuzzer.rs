//! One fuzzing round: sample, render, store, and optionally apply.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::artifact::{ArtifactStore, StoreOutcome, content_digest};
use crate::config::DeviceTarget;
use crate::device::{DeviceBridge, apply_document};
use crate::document;
use crate::preference::PreferenceSpec;
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Same document was generated before; nothing was written or applied.
    Duplicate,
    /// New document written to the artifact store only.
    Written,
    /// New document written and installed on the device.
    Applied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: usize,
    pub digest: String,
    pub artifact: PathBuf,
    pub status: RoundStatus,
    #[serde(skip)]
    pub document: String,
}

/// A device and the target installed on it.
pub struct DeviceSession<'a> {
    pub bridge: &'a dyn DeviceBridge,
    pub target: &'a DeviceTarget,
}

pub struct Fuzzer<R> {
    name: String,
    specs: Vec<PreferenceSpec>,
    sampler: ValueSampler<R>,
    store: ArtifactStore,
    rounds_run: usize,
}

impl<R: Rng> Fuzzer<R> {
    pub fn new(
        name: impl Into<String>,
        specs: Vec<PreferenceSpec>,
        sampler: ValueSampler<R>,
        store: ArtifactStore,
    ) -> Self {
        Self {
            name: name.into(),
            specs,
            sampler,
            store,
            rounds_run: 0,
        }
    }

    /// Draws fresh values and renders them into one document.
    pub fn generate(&mut self) -> String {
        let sampled = self.sampler.sample_all(&self.specs);
        document::render(&sampled)
    }

    pub async fn run_round(&mut self, device: Option<&DeviceSession<'_>>) -> Result<RoundReport> {
        self.rounds_run += 1;
        let round = self.rounds_run;
        let document = self.generate();
        let digest = content_digest(&document);

        let outcome = self.store.store(&self.name, &digest, &document).await?;
        let status = match (&outcome, device) {
            (StoreOutcome::Duplicate(path), _) => {
                info!(round, digest = %digest, path = %path.display(), "skipping duplicate document");
                RoundStatus::Duplicate
            }
            (StoreOutcome::Written(path), None) => {
                info!(round, digest = %digest, path = %path.display(), "document generated");
                RoundStatus::Written
            }
            (StoreOutcome::Written(path), Some(session)) => {
                info!(round, digest = %digest, path = %path.display(), "document generated, applying");
                apply_document(session.bridge, session.target, path, &digest)
                    .await
                    .with_context(|| format!("round {round}: failed to apply {}", path.display()))?;
                RoundStatus::Applied
            }
        };

        Ok(RoundReport {
            round,
            digest,
            artifact: outcome.path().to_path_buf(),
            status,
            document,
        })
    }
}

#[cfg(test)]
#[path = "fuzzer_tests.rs"]
mod tests;
