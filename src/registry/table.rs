//! Immutable table of platform profiles

use crate::registry::error::RegistryError;
use crate::types::platform::PlatformProfile;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Validated, read-only set of platform profiles.
///
/// There are no mutation methods: a different table is built and swapped in
/// whole through [`crate::registry::RegistryHandle`].
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PlatformRegistry {
    profiles: Vec<Arc<PlatformProfile>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl PlatformRegistry {
    pub fn from_profiles(profiles: Vec<PlatformProfile>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(profiles.len());
        let mut table = Vec::with_capacity(profiles.len());

        for profile in profiles {
            validate_profile(&profile)?;
            if index.contains_key(&profile.id) {
                return Err(RegistryError::DuplicateProfile { id: profile.id });
            }
            index.insert(profile.id.clone(), table.len());
            table.push(Arc::new(profile));
        }

        Ok(Self {
            profiles: table,
            index,
        })
    }

    /// Builds a table from profiles already known to be valid.
    pub(crate) fn from_trusted(profiles: Vec<PlatformProfile>) -> Self {
        let index = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            profiles: profiles.into_iter().map(Arc::new).collect(),
            index,
        }
    }

    pub fn get(&self, id: &str) -> Result<&Arc<PlatformProfile>, RegistryError> {
        self.index
            .get(id)
            .map(|&i| &self.profiles[i])
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    /// Profiles in table order. Each call starts a fresh pass.
    pub fn all(&self) -> impl Iterator<Item = &Arc<PlatformProfile>> + Clone + '_ {
        self.profiles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.profiles.iter().map(|p| p.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn validate_profile(profile: &PlatformProfile) -> Result<(), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidProfile {
        id: profile.id.clone(),
        reason: reason.to_string(),
    };

    if profile.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if profile.id.chars().any(char::is_whitespace) {
        return Err(invalid("id must not contain whitespace"));
    }
    if profile.supports_dynamic_port && profile.fixed_port.is_some() {
        return Err(invalid(
            "a profile cannot both inject a dynamic port and require a fixed port",
        ));
    }
    if profile.fixed_port == Some(0) {
        return Err(invalid("fixed port must be between 1 and 65535"));
    }

    let mut roles = HashSet::new();
    for role in &profile.required_files {
        if !roles.insert(role) {
            return Err(invalid(&format!("file role {role} listed more than once")));
        }
    }

    let mut caveats = HashSet::new();
    for caveat in &profile.exceptions {
        if !caveats.insert(caveat.as_str()) {
            return Err(invalid(&format!("exception '{caveat}' listed more than once")));
        }
    }

    Ok(())
}
