use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{DeviceBridge, DeviceError, ShellOutput};

/// [`DeviceBridge`] backed by the `adb` command-line tool.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
    serial: Option<String>,
}

impl AdbBridge {
    pub fn new(program: impl Into<PathBuf>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            serial,
        }
    }

    /// Locates `adb` through `$ADB`, then the Android SDK variables, then `PATH`.
    pub fn discover(serial: Option<String>) -> Self {
        Self::new(locate_adb(|key| env::var_os(key)), serial)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        if let Some(serial) = &self.serial {
            command.arg("-s").arg(serial);
        }
        command.kill_on_drop(true);
        command
    }

    async fn run(&self, mut command: Command) -> Result<ShellOutput, DeviceError> {
        debug!(command = ?command.as_std(), "running adb");
        let output = command.output().await?;
        Ok(ShellOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

#[async_trait]
impl DeviceBridge for AdbBridge {
    async fn push(&self, local: &Path, remote: &str) -> Result<ShellOutput, DeviceError> {
        let mut command = self.command();
        command.arg("push").arg(local).arg(remote);
        let mut output = self.run(command).await?;
        // adb prints transfer progress on stderr even when the push succeeds.
        if output.success {
            output.stderr.clear();
        }
        Ok(output)
    }

    async fn shell(&self, args: &[String]) -> Result<ShellOutput, DeviceError> {
        let mut command = self.command();
        command.arg("shell").args(args);
        self.run(command).await
    }
}

pub(super) fn locate_adb(lookup: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    if let Some(explicit) = lookup("ADB").filter(|value| !value.is_empty()) {
        return PathBuf::from(explicit);
    }
    for sdk_var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
        if let Some(sdk) = lookup(sdk_var).filter(|value| !value.is_empty()) {
            return Path::new(&sdk).join("platform-tools").join("adb");
        }
    }
    PathBuf::from("adb")
}
