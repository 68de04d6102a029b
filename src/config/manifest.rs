use crate::config::error::ConfigError;
use crate::generator::values::{is_dns_label, is_image_reference, TemplateValues};
use crate::types::requirements::{AppRequirements, STREAMLIT_DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_ENTRY_POINT: &str = "app.py";
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";
pub const DEFAULT_APP_NAME: &str = "streamlit-app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
    Auto,
}

/// Application description read from `deploy.yaml` (or JSON).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployManifest {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub requirements: AppRequirements,
    /// Replacement platform table, relative to the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl DeployManifest {
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self, ConfigError> {
        let detected_format = match format {
            ManifestFormat::Auto => detect_format(content)?,
            format => format,
        };

        let manifest: DeployManifest = match detected_format {
            ManifestFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::InvalidJson {
                    reason: e.to_string(),
                })?
            }
            ManifestFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                    reason: e.to_string(),
                })?
            }
            ManifestFormat::Auto => unreachable!("Auto format should be resolved by now"),
        };

        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ManifestFormat::Json,
            Some("yaml") | Some("yml") => ManifestFormat::Yaml,
            _ => ManifestFormat::Auto,
        };

        let mut manifest = Self::parse(&content, format)?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        info!("Loaded deploy manifest from {}", path.display());
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.app.name {
            if !is_dns_label(name) {
                return Err(ConfigError::Invalid {
                    field: "app.name".to_string(),
                    reason: format!(
                        "'{name}' must be 1-63 lowercase letters, digits or '-' and start and end alphanumeric"
                    ),
                });
            }
        }

        if let Some(image) = &self.app.image {
            if !is_image_reference(image) {
                return Err(ConfigError::Invalid {
                    field: "app.image".to_string(),
                    reason: format!("'{image}' is not a container image reference"),
                });
            }
        }

        if self.requirements.desired_port == Some(0) {
            return Err(ConfigError::Invalid {
                field: "requirements.desired_port".to_string(),
                reason: "port must be between 1 and 65535".to_string(),
            });
        }

        if let Some(entry_point) = &self.app.entry_point {
            if entry_point.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "app.entry_point".to_string(),
                    reason: "entry point must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Replacement table path, resolved against the manifest's directory.
    pub fn registry_path(&self) -> Option<PathBuf> {
        let path = self.registry.as_ref()?;
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }

    pub fn app_name(&self) -> &str {
        self.app.name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Template values with defaults filled in for anything not declared.
    pub fn values(&self) -> TemplateValues {
        let app_name = self.app_name();
        let image = self
            .app
            .image
            .clone()
            .unwrap_or_else(|| format!("{app_name}:latest"));

        TemplateValues::new()
            .with_app_name(app_name)
            .with_entry_point(
                self.app
                    .entry_point
                    .as_deref()
                    .unwrap_or(DEFAULT_ENTRY_POINT),
            )
            .with_python_version(
                self.app
                    .python_version
                    .as_deref()
                    .unwrap_or(DEFAULT_PYTHON_VERSION),
            )
            .with_image(image)
            .with_port(
                self.requirements
                    .desired_port
                    .unwrap_or(STREAMLIT_DEFAULT_PORT),
            )
    }
}

fn detect_format(content: &str) -> Result<ManifestFormat, ConfigError> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') {
        Ok(ManifestFormat::Json)
    } else if trimmed.starts_with("---")
        || trimmed.contains("app:")
        || trimmed.contains("requirements:")
    {
        Ok(ManifestFormat::Yaml)
    } else if serde_json::from_str::<serde_json::Value>(content).is_ok() {
        Ok(ManifestFormat::Json)
    } else if serde_yaml::from_str::<serde_yaml::Value>(content).is_ok() {
        Ok(ManifestFormat::Yaml)
    } else {
        Err(ConfigError::UnknownFormat)
    }
}
