//! Replacement tables loaded from YAML or JSON

use crate::registry::error::RegistryError;
use crate::registry::table::PlatformRegistry;
use crate::types::platform::PlatformProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Json,
    Yaml,
    Auto,
}

/// On-disk layout of a registry table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub platforms: Vec<PlatformProfile>,
}

pub struct RegistryLoader;

impl RegistryLoader {
    pub fn parse(content: &str, format: RegistryFormat) -> Result<PlatformRegistry, RegistryError> {
        let detected_format = match format {
            RegistryFormat::Auto => Self::detect_format(content)?,
            format => format,
        };

        let document: RegistryDocument = match detected_format {
            RegistryFormat::Json => {
                serde_json::from_str(content).map_err(|e| RegistryError::InvalidJson {
                    reason: e.to_string(),
                })?
            }
            RegistryFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| RegistryError::InvalidYaml {
                    reason: e.to_string(),
                })?
            }
            RegistryFormat::Auto => unreachable!("Auto format should be resolved by now"),
        };

        PlatformRegistry::from_profiles(document.platforms)
    }

    pub fn load(path: &Path) -> Result<PlatformRegistry, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => RegistryFormat::Json,
            Some("yaml") | Some("yml") => RegistryFormat::Yaml,
            _ => RegistryFormat::Auto,
        };

        let registry = Self::parse(&content, format)?;
        info!(
            "Loaded {} platform profiles from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    fn detect_format(content: &str) -> Result<RegistryFormat, RegistryError> {
        let trimmed = content.trim();

        if trimmed.starts_with('{') {
            Ok(RegistryFormat::Json)
        } else if trimmed.starts_with("---") || trimmed.contains("platforms:") {
            Ok(RegistryFormat::Yaml)
        } else if serde_json::from_str::<serde_json::Value>(content).is_ok() {
            Ok(RegistryFormat::Json)
        } else if serde_yaml::from_str::<serde_yaml::Value>(content).is_ok() {
            Ok(RegistryFormat::Yaml)
        } else {
            Err(RegistryError::UnknownFormat)
        }
    }
}
