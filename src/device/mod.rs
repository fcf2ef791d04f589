//! Installing a generated document on a device and relaunching the target.

mod adb;

pub use adb::AdbBridge;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DeviceTarget;

/// Directory on the device that receives pushed documents.
pub const DEVICE_STAGING_DIR: &str = "/sdcard/fuzzer";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to run device bridge: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("{step} failed: {detail}")]
    StepFailed { step: ApplyStep, detail: String },
}

/// The steps of installing a document, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    Push,
    ForceStop,
    Install,
    Launch,
}

impl std::fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplyStep::Push => "push",
            ApplyStep::ForceStop => "force-stop",
            ApplyStep::Install => "install preferences",
            ApplyStep::Launch => "launch",
        };
        f.write_str(s)
    }
}

/// Command channel to a single device.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    async fn push(&self, local: &Path, remote: &str) -> Result<ShellOutput, DeviceError>;
    async fn shell(&self, args: &[String]) -> Result<ShellOutput, DeviceError>;
}

pub fn staging_path(digest: &str) -> String {
    format!("{DEVICE_STAGING_DIR}/{digest}.xml")
}

/// Pushes `artifact`, stops the target, overwrites its preferences file and
/// relaunches it. Stops at the first failing step.
pub async fn apply_document<B: DeviceBridge + ?Sized>(
    bridge: &B,
    target: &DeviceTarget,
    artifact: &Path,
    digest: &str,
) -> Result<(), DeviceError> {
    let remote = staging_path(digest);

    debug!(local = %artifact.display(), remote = %remote, "pushing document");
    check_step(ApplyStep::Push, bridge.push(artifact, &remote).await?)?;

    let force_stop = vec![
        "am".to_string(),
        "force-stop".to_string(),
        target.package.clone(),
    ];
    check_step(ApplyStep::ForceStop, bridge.shell(&force_stop).await?)?;

    let install = vec![
        "run-as".to_string(),
        target.package.clone(),
        "cp".to_string(),
        remote.clone(),
        format!("shared_prefs/{}.xml", target.prefs_name),
    ];
    check_step(ApplyStep::Install, bridge.shell(&install).await?)?;

    let launch = vec![
        "am".to_string(),
        "start".to_string(),
        "-n".to_string(),
        format!("{}/{}", target.package, target.activity),
    ];
    check_step(ApplyStep::Launch, bridge.shell(&launch).await?)?;

    info!(package = %target.package, digest = %digest, "document applied");
    Ok(())
}

fn check_step(step: ApplyStep, output: ShellOutput) -> Result<(), DeviceError> {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return Err(DeviceError::StepFailed {
            step,
            detail: stderr.to_string(),
        });
    }
    if !output.success {
        return Err(DeviceError::StepFailed {
            step,
            detail: "command exited with a failure status".to_string(),
        });
    }
    Ok(())
}
