use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ENTRY_POINT: &str = "entry_point";
pub const PORT: &str = "port";
pub const IMAGE: &str = "image";
pub const APP_NAME: &str = "app_name";
pub const PYTHON_VERSION: &str = "python_version";

/// Substitution values for artifact templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateValues {
    values: BTreeMap<String, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with_entry_point(self, entry_point: impl Into<String>) -> Self {
        self.set(ENTRY_POINT, entry_point)
    }

    pub fn with_port(self, port: u16) -> Self {
        self.set(PORT, port.to_string())
    }

    pub fn with_image(self, image: impl Into<String>) -> Self {
        self.set(IMAGE, image)
    }

    pub fn with_app_name(self, app_name: impl Into<String>) -> Self {
        self.set(APP_NAME, app_name)
    }

    pub fn with_python_version(self, version: impl Into<String>) -> Self {
        self.set(PYTHON_VERSION, version)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fills keys that are not set yet from `defaults`.
    pub fn merge_missing(mut self, defaults: &TemplateValues) -> Self {
        for (key, value) in &defaults.values {
            self.values
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Parses a `key=value` assignment as given on the command line.
    pub fn parse_assignment(input: &str) -> Result<(String, String), String> {
        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{input}'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("empty key in '{input}'"));
        }
        Ok((key.to_string(), value.to_string()))
    }
}

/// DNS-1123 label: what Kubernetes, Cloud Run and Render accept as a service name.
pub fn is_dns_label(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
}

/// Container image reference such as `ghcr.io/acme/app:1.0` or `app@sha256:...`.
pub fn is_image_reference(image: &str) -> bool {
    image.starts_with(|c: char| c.is_ascii_alphanumeric())
        && image
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/' | ':' | '@'))
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
