use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::preference::{ConfigError, PreferenceDecl, PreferenceSpec, resolve_preferences};

/// A fuzzing target as described in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct FuzzConfig {
    /// Name of the persisted-settings file on the device, without `.xml`.
    pub name: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default)]
    pub preferences: Vec<PreferenceDecl>,
}

/// Where a generated document is installed and which entry point is relaunched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTarget {
    pub package: String,
    pub activity: String,
    pub prefs_name: String,
}

impl FuzzConfig {
    pub fn resolve(&self) -> std::result::Result<Vec<PreferenceSpec>, ConfigError> {
        resolve_preferences(&self.preferences)
    }

    pub fn device_target(&self) -> Result<DeviceTarget> {
        let package = non_blank(self.package.as_deref())
            .ok_or_else(|| anyhow!("config is missing `package`, required to apply on a device"))?;
        let activity = non_blank(self.activity.as_deref())
            .ok_or_else(|| anyhow!("config is missing `activity`, required to apply on a device"))?;
        Ok(DeviceTarget {
            package: package.to_string(),
            activity: activity.to_string(),
            prefs_name: self.name.clone(),
        })
    }

    fn validate(self, path: &Path) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            anyhow::bail!("config {} has an empty `name`", path.display());
        }
        if name.contains(['/', '\\']) {
            anyhow::bail!(
                "config {} has `name` '{name}' containing a path separator",
                path.display()
            );
        }
        Ok(Self {
            name: name.to_string(),
            ..self
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

pub fn parse_config(raw: &str, format: ConfigFormat) -> Result<FuzzConfig> {
    let parsed = match format {
        ConfigFormat::Yaml => serde_yaml::from_str::<FuzzConfig>(raw)?,
        ConfigFormat::Toml => toml::from_str::<FuzzConfig>(raw)?,
    };
    Ok(parsed)
}

pub async fn load_config(path: &Path) -> Result<FuzzConfig> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            anyhow::bail!("config not found: {}", path.display());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config: {}", path.display()));
        }
    };
    let format = ConfigFormat::from_path(path);
    let parsed = parse_config(&raw, format)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    debug!(
        config = %path.display(),
        format = ?format,
        preferences = parsed.preferences.len(),
        "loaded fuzz config"
    );
    parsed.validate(path)
}
