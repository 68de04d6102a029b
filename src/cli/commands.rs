use crate::cli::error::{CliError, Result};
use crate::cli::options::RequirementArgs;
use crate::config::DeployManifest;
use crate::generator::{ArtifactGenerator, ArtifactSet, TemplateValues};
use crate::registry::{PlatformRegistry, RegistryLoader};
use crate::resolver::CapabilityResolver;
use crate::types::{AppRequirements, DeploymentPlan, PlatformProfile};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a command needs: the platform table and the app description.
pub struct PlannerSession {
    registry: Arc<PlatformRegistry>,
    manifest: DeployManifest,
}

impl PlannerSession {
    /// The table comes from `--registry`, else from the manifest's `registry`
    /// entry, else the built-in table.
    pub fn open(registry_flag: Option<&Path>, manifest_path: Option<&Path>) -> Result<Self> {
        let manifest = match manifest_path {
            Some(path) => DeployManifest::load(path)?,
            None => DeployManifest::default(),
        };

        let registry_path = registry_flag
            .map(Path::to_path_buf)
            .or_else(|| manifest.registry_path());

        let registry = match registry_path {
            Some(path) => Arc::new(RegistryLoader::load(&path)?),
            None => PlatformRegistry::builtin(),
        };
        debug!("Using platform table with {} profiles", registry.len());

        Ok(Self { registry, manifest })
    }

    pub fn with_parts(registry: Arc<PlatformRegistry>, manifest: DeployManifest) -> Self {
        Self { registry, manifest }
    }

    pub fn registry(&self) -> &Arc<PlatformRegistry> {
        &self.registry
    }

    pub fn manifest(&self) -> &DeployManifest {
        &self.manifest
    }

    pub fn list(&self) -> Vec<Arc<PlatformProfile>> {
        self.registry.all().cloned().collect()
    }

    pub fn show(&self, id: &str) -> Result<Arc<PlatformProfile>> {
        Ok(Arc::clone(self.registry.get(id)?))
    }

    /// Manifest requirements with command-line flags layered on top.
    pub fn requirements(&self, args: &RequirementArgs) -> AppRequirements {
        let mut requirements = self.manifest.requirements;
        if args.static_site {
            requirements.has_backend = false;
        }
        if args.no_docker {
            requirements.docker_available = false;
        }
        if args.port.is_some() {
            requirements.desired_port = args.port;
        }
        requirements
    }

    pub fn resolve(&self, args: &RequirementArgs) -> Vec<DeploymentPlan> {
        let resolver = CapabilityResolver::new(Arc::clone(&self.registry));
        resolver.resolve(&self.requirements(args))
    }

    /// Manifest values, then `--port`, then `--set` assignments.
    pub fn values(&self, args: &RequirementArgs, assignments: &[String]) -> Result<TemplateValues> {
        let mut values = self.manifest.values();
        if let Some(port) = args.port {
            values = values.with_port(port);
        }
        for assignment in assignments {
            let (key, value) =
                TemplateValues::parse_assignment(assignment).map_err(CliError::InvalidAssignment)?;
            values.insert(key, value);
        }
        Ok(values)
    }

    pub fn generate(
        &self,
        id: &str,
        args: &RequirementArgs,
        assignments: &[String],
    ) -> Result<ArtifactSet> {
        let profile = self.registry.get(id)?;
        let values = self.values(args, assignments)?;
        let generator = ArtifactGenerator::new()?;
        Ok(generator.generate(profile, &values)?)
    }
}

/// Writes every artifact under `output_dir`, creating parent directories.
pub async fn write_artifacts(set: &ArtifactSet, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(set.len());

    for artifact in set.iter() {
        let path = output_dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CliError::Write {
                    path: parent.display().to_string(),
                    source,
                })?;
        }
        tokio::fs::write(&path, &artifact.content)
            .await
            .map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
