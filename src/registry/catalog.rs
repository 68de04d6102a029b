//! Built-in platform table
//!
//! Port and file conventions follow each platform's own documentation. When
//! a platform changes its conventions, ship a replacement table through
//! [`crate::registry::RegistryLoader`] rather than editing entries at runtime.

use crate::registry::table::PlatformRegistry;
use crate::types::platform::{FileRole, PlatformProfile};
use once_cell::sync::Lazy;
use std::sync::Arc;

static BUILTIN: Lazy<Arc<PlatformRegistry>> =
    Lazy::new(|| Arc::new(PlatformRegistry::from_trusted(builtin_profiles())));

impl PlatformRegistry {
    /// Shared built-in table, initialised on first use.
    pub fn builtin() -> Arc<PlatformRegistry> {
        Arc::clone(&BUILTIN)
    }
}

const DOCKER_FILES: [FileRole; 2] = [FileRole::Dockerfile, FileRole::Dockerignore];

pub fn builtin_profiles() -> Vec<PlatformProfile> {
    vec![
        PlatformProfile::new("streamlit-cloud", "Streamlit Community Cloud")
            .fixed_port(8501)
            .files(&[FileRole::StreamlitConfig])
            .exception("public GitHub repository required on the free tier")
            .exception("only Streamlit apps are supported"),
        PlatformProfile::new("railway", "Railway")
            .dynamic_port()
            .files(&[FileRole::RailwayToml])
            .exception("usage-based billing after the trial credit"),
        PlatformProfile::new("render", "Render")
            .docker()
            .dynamic_port()
            .files(&with_docker(&[FileRole::RenderYaml]))
            .exception("free instances spin down after inactivity"),
        PlatformProfile::new("heroku", "Heroku")
            .dynamic_port()
            .files(&[FileRole::Procfile, FileRole::RuntimeTxt])
            .exception("no free tier")
            .exception("ephemeral filesystem")
            .exception("dynos restart daily"),
        PlatformProfile::new("vercel", "Vercel")
            .static_only()
            .files(&[FileRole::VercelJson])
            .exception("static content and serverless functions only")
            .exception("no long-running processes or websockets"),
        PlatformProfile::new("github-pages", "GitHub Pages")
            .static_only()
            .files(&[FileRole::PagesWorkflow])
            .exception("static content only"),
        PlatformProfile::new("aws", "AWS ECS on Fargate")
            .docker()
            .files(&with_docker(&[FileRole::EcsTaskDefinition]))
            .exception("IAM roles and VPC networking configured out of band")
            .exception("image must be pushed to ECR before deploying"),
        PlatformProfile::new("azure", "Azure App Service")
            .docker()
            .fixed_port(8000)
            .files(&DOCKER_FILES)
            .exception("WEBSITES_PORT app setting must match the container port"),
        PlatformProfile::new("gcp", "Google Cloud Run")
            .docker()
            .dynamic_port()
            .files(&with_docker(&[FileRole::CloudbuildYaml])),
        PlatformProfile::new("koyeb", "Koyeb")
            .docker()
            .dynamic_port()
            .files(&DOCKER_FILES),
        PlatformProfile::new("fly", "Fly.io")
            .docker()
            .files(&with_docker(&[FileRole::FlyToml])),
        PlatformProfile::new("kubernetes", "Kubernetes")
            .docker()
            .files(&with_docker(&[FileRole::K8sDeployment, FileRole::K8sService]))
            .exception("cluster provisioning and ingress are out of band")
            .exception("no native IaC support"),
        PlatformProfile::new("docker", "Generic Docker host")
            .docker()
            .files(&DOCKER_FILES),
    ]
}

fn with_docker(extra: &[FileRole]) -> Vec<FileRole> {
    DOCKER_FILES.iter().chain(extra).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_passes_validation() {
        let registry = PlatformRegistry::from_profiles(builtin_profiles());
        assert!(registry.is_ok(), "built-in table invalid: {registry:?}");
        assert_eq!(registry.unwrap().len(), 13);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = PlatformRegistry::builtin();
        let b = PlatformRegistry::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_static_hosts_need_no_docker() {
        let registry = PlatformRegistry::builtin();
        for profile in registry.all().filter(|p| !p.supports_backend) {
            assert!(!profile.requires_docker, "{} is static", profile.id);
            assert!(profile.fixed_port.is_none());
        }
    }

    #[test]
    fn test_docker_platforms_ship_a_dockerfile() {
        let registry = PlatformRegistry::builtin();
        for profile in registry.all().filter(|p| p.requires_docker) {
            assert!(profile.requires_file(FileRole::Dockerfile), "{}", profile.id);
        }
    }
}
