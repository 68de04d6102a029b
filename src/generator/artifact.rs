use crate::generator::error::GenerateError;
use crate::generator::helpers::env_or_helper;
use crate::generator::placeholders::PlaceholderScanner;
use crate::generator::template_set::template_source;
use crate::generator::values::{
    is_dns_label, is_image_reference, TemplateValues, APP_NAME, IMAGE, PORT,
};
use crate::types::platform::{FileRole, PlatformProfile};
use handlebars::Handlebars;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    pub role: FileRole,
    pub path: String,
    pub content: String,
}

/// Files generated for one platform, in the profile's declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSet {
    pub platform: String,
    pub artifacts: Vec<RenderedArtifact>,
}

impl ArtifactSet {
    pub fn get(&self, role: FileRole) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| a.role == role)
            .map(|a| a.content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedArtifact> {
        self.artifacts.iter()
    }

    pub fn roles(&self) -> Vec<FileRole> {
        self.artifacts.iter().map(|a| a.role).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Role id to rendered content.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.artifacts
            .iter()
            .map(|a| (a.role.id().to_string(), a.content.clone()))
            .collect()
    }

    /// SHA-256 over every role and its content, for reproducibility checks.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for artifact in &self.artifacts {
            hasher.update(artifact.role.id().as_bytes());
            hasher.update([0u8]);
            hasher.update(artifact.content.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Renders a platform's required files from the built-in templates.
pub struct ArtifactGenerator {
    handlebars: Handlebars<'static>,
    scanner: PlaceholderScanner,
}

impl ArtifactGenerator {
    pub fn new() -> Result<Self, GenerateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("env_or", Box::new(env_or_helper));

        for role in FileRole::ALL {
            handlebars
                .register_template_string(role.id(), template_source(role))
                .map_err(Box::new)?;
        }

        let scanner = PlaceholderScanner::new()?;

        Ok(Self {
            handlebars,
            scanner,
        })
    }

    /// Substitution keys a role's template refers to, in order of appearance.
    pub fn required_keys(&self, role: FileRole) -> Vec<String> {
        self.scanner.keys(template_source(role))
    }

    pub fn generate(
        &self,
        profile: &PlatformProfile,
        values: &TemplateValues,
    ) -> Result<ArtifactSet, GenerateError> {
        let values = pin_fixed_port(profile, values);
        let values = values.as_ref();
        self.check_missing(profile, values)?;
        validate_values(values, &self.profile_keys(profile))?;

        let mut artifacts = Vec::with_capacity(profile.required_files.len());
        for &role in &profile.required_files {
            let content = self
                .handlebars
                .render(role.id(), values)
                .map_err(|e| GenerateError::Render {
                    role,
                    message: e.to_string(),
                })?;
            debug!(platform = %profile.id, role = %role, bytes = content.len(), "Rendered artifact");
            artifacts.push(RenderedArtifact {
                role,
                path: role.default_path().to_string(),
                content,
            });
        }

        info!(
            "Generated {} artifacts for {}",
            artifacts.len(),
            profile.id
        );

        Ok(ArtifactSet {
            platform: profile.id.clone(),
            artifacts,
        })
    }

    /// Every key the profile's templates refer to.
    fn profile_keys(&self, profile: &PlatformProfile) -> BTreeSet<String> {
        profile
            .required_files
            .iter()
            .flat_map(|&role| self.required_keys(role))
            .collect()
    }

    fn check_missing(
        &self,
        profile: &PlatformProfile,
        values: &TemplateValues,
    ) -> Result<(), GenerateError> {
        for &role in &profile.required_files {
            if let Some(key) = self
                .required_keys(role)
                .into_iter()
                .find(|key| !values.contains(key))
            {
                return Err(GenerateError::MissingValue { key, role });
            }
        }
        Ok(())
    }
}

/// A platform that only routes to one port gets files listening on that port.
fn pin_fixed_port<'a>(
    profile: &PlatformProfile,
    values: &'a TemplateValues,
) -> Cow<'a, TemplateValues> {
    let Some(fixed) = profile.fixed_port else {
        return Cow::Borrowed(values);
    };
    let fixed = fixed.to_string();
    match values.get(PORT) {
        Some(port) if port == fixed => Cow::Borrowed(values),
        requested => {
            if let Some(port) = requested {
                warn!(
                    "{} only routes to port {fixed}; rendering with {fixed} instead of {port}",
                    profile.id
                );
            }
            Cow::Owned(values.clone().set(PORT, fixed))
        }
    }
}

/// Checks the values the profile's templates will actually render.
fn validate_values(
    values: &TemplateValues,
    used: &BTreeSet<String>,
) -> Result<(), GenerateError> {
    for (key, value) in values.iter().filter(|(key, _)| used.contains(*key)) {
        let invalid = |reason: &str| GenerateError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.contains('\n') || value.contains('\r') {
            return Err(invalid("value must be a single line"));
        }
        if value.contains('"') {
            return Err(invalid("value must not contain double quotes"));
        }
        match key {
            PORT => match value.parse::<u16>() {
                Ok(port) if port > 0 => {}
                _ => return Err(invalid("port must be a number between 1 and 65535")),
            },
            APP_NAME if !is_dns_label(value) => {
                return Err(invalid(
                    "app name must be 1-63 lowercase letters, digits or '-' and start and end alphanumeric",
                ));
            }
            IMAGE if !is_image_reference(value) => {
                return Err(invalid(
                    "image must be a registry reference without whitespace",
                ));
            }
            _ => {}
        }
        if value.contains('$') {
            warn!("Template value {key} contains '$' and may be expanded by a shell");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> TemplateValues {
        TemplateValues::new()
            .with_entry_point("app.py")
            .with_port(8501)
            .with_image("ghcr.io/acme/pdf-qa:1.0")
            .with_app_name("pdf-qa")
            .with_python_version("3.11")
    }

    #[test]
    fn test_every_role_template_registers() {
        let generator = ArtifactGenerator::new().unwrap();
        for role in FileRole::ALL {
            // Every key a template uses is one the CLI knows how to fill.
            for key in generator.required_keys(role) {
                assert!(values().contains(&key), "{role} uses unknown key {key}");
            }
        }
    }

    #[test]
    fn test_procfile_missing_port() {
        let generator = ArtifactGenerator::new().unwrap();
        let heroku = PlatformProfile::new("heroku", "Heroku")
            .dynamic_port()
            .files(&[FileRole::Procfile]);
        let values = TemplateValues::new().with_entry_point("app.py");

        let err = generator.generate(&heroku, &values).unwrap_err();
        assert_eq!(err.missing_key(), Some("port"));
    }

    #[test]
    fn test_first_missing_placeholder_is_named() {
        let generator = ArtifactGenerator::new().unwrap();
        let profile = PlatformProfile::new("docker", "Docker").files(&[FileRole::Dockerfile]);

        let err = generator
            .generate(&profile, &TemplateValues::new())
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MissingValue { ref key, role: FileRole::Dockerfile } if key == "python_version"
        ));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let generator = ArtifactGenerator::new().unwrap();
        let profile = PlatformProfile::new("docker", "Docker").files(&[FileRole::Dockerfile]);
        let err = generator
            .generate(&profile, &values().set(PORT, "http"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidValue { .. }));
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let generator = ArtifactGenerator::new().unwrap();
        let profile = PlatformProfile::new("docker", "Docker").files(&[FileRole::Dockerfile]);
        let set = generator
            .generate(&profile, &values().with_entry_point("pages/q&a<1>.py"))
            .unwrap();
        assert!(set
            .get(FileRole::Dockerfile)
            .unwrap()
            .contains("streamlit run pages/q&a<1>.py"));
    }

    #[test]
    fn test_unused_values_are_not_validated() {
        let generator = ArtifactGenerator::new().unwrap();
        let pages = PlatformProfile::new("github-pages", "GitHub Pages")
            .static_only()
            .files(&[FileRole::PagesWorkflow]);
        assert!(!generator
            .required_keys(FileRole::PagesWorkflow)
            .contains(&PORT.to_string()));

        let set = generator
            .generate(&pages, &values().set(PORT, "notaport"))
            .unwrap();
        assert_eq!(set.roles(), vec![FileRole::PagesWorkflow]);
    }

    #[test]
    fn test_fixed_port_overrides_requested_port() {
        let generator = ArtifactGenerator::new().unwrap();
        let azure = PlatformProfile::new("azure", "Azure")
            .docker()
            .fixed_port(8000)
            .files(&[FileRole::Dockerfile]);

        let set = generator.generate(&azure, &values()).unwrap();
        let dockerfile = set.get(FileRole::Dockerfile).unwrap();
        assert!(dockerfile.contains("EXPOSE 8000\n"));
        assert!(!dockerfile.contains("8501"));

        // The fixed port also fills a missing value.
        let without_port = TemplateValues::new()
            .with_entry_point("app.py")
            .with_python_version("3.11");
        assert!(generator.generate(&azure, &without_port).is_ok());
    }

    #[test]
    fn test_app_name_must_be_a_dns_label() {
        let generator = ArtifactGenerator::new().unwrap();
        let profile = PlatformProfile::new("k8s", "K8s").files(&[FileRole::K8sService]);
        let err = generator
            .generate(&profile, &values().with_app_name("my app: x #c"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidValue { ref key, .. } if key == APP_NAME));
    }

    #[test]
    fn test_profile_without_files_yields_empty_set() {
        let generator = ArtifactGenerator::new().unwrap();
        let profile = PlatformProfile::new("bare", "Bare");
        let set = generator.generate(&profile, &TemplateValues::new()).unwrap();
        assert!(set.is_empty());
    }
}
