use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A hosting target's fixed capabilities and constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub requires_docker: bool,
    #[serde(default)]
    pub supports_dynamic_port: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_port: Option<u16>,
    #[serde(default = "default_supports_backend")]
    pub supports_backend: bool,
    #[serde(default)]
    pub required_files: Vec<FileRole>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

fn default_supports_backend() -> bool {
    true
}

impl PlatformProfile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            requires_docker: false,
            supports_dynamic_port: false,
            fixed_port: None,
            supports_backend: true,
            required_files: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    pub fn docker(mut self) -> Self {
        self.requires_docker = true;
        self
    }

    pub fn dynamic_port(mut self) -> Self {
        self.supports_dynamic_port = true;
        self
    }

    pub fn fixed_port(mut self, port: u16) -> Self {
        self.fixed_port = Some(port);
        self
    }

    pub fn static_only(mut self) -> Self {
        self.supports_backend = false;
        self
    }

    pub fn files(mut self, roles: &[FileRole]) -> Self {
        self.required_files = roles.to_vec();
        self
    }

    pub fn exception(mut self, caveat: impl Into<String>) -> Self {
        self.exceptions.push(caveat.into());
        self
    }

    pub fn requires_file(&self, role: FileRole) -> bool {
        self.required_files.contains(&role)
    }

    /// Port handling as a single value, once the dynamic/fixed invariant holds.
    pub fn port_policy(&self) -> PortPolicy {
        match (self.supports_dynamic_port, self.fixed_port) {
            (true, _) => PortPolicy::Dynamic,
            (false, Some(port)) => PortPolicy::Fixed(port),
            (false, None) => PortPolicy::Configurable,
        }
    }

    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortPolicy {
    /// Platform injects `$PORT` at runtime.
    Dynamic,
    /// Platform only routes traffic to this port.
    Fixed(u16),
    /// Port is declared in the platform's own manifest.
    Configurable,
}

/// Kind of generated file a platform needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRole {
    Dockerfile,
    Dockerignore,
    Procfile,
    RuntimeTxt,
    StreamlitConfig,
    RailwayToml,
    RenderYaml,
    VercelJson,
    PagesWorkflow,
    EcsTaskDefinition,
    CloudbuildYaml,
    FlyToml,
    K8sDeployment,
    K8sService,
}

impl FileRole {
    pub const ALL: [FileRole; 14] = [
        FileRole::Dockerfile,
        FileRole::Dockerignore,
        FileRole::Procfile,
        FileRole::RuntimeTxt,
        FileRole::StreamlitConfig,
        FileRole::RailwayToml,
        FileRole::RenderYaml,
        FileRole::VercelJson,
        FileRole::PagesWorkflow,
        FileRole::EcsTaskDefinition,
        FileRole::CloudbuildYaml,
        FileRole::FlyToml,
        FileRole::K8sDeployment,
        FileRole::K8sService,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FileRole::Dockerfile => "dockerfile",
            FileRole::Dockerignore => "dockerignore",
            FileRole::Procfile => "procfile",
            FileRole::RuntimeTxt => "runtime-txt",
            FileRole::StreamlitConfig => "streamlit-config",
            FileRole::RailwayToml => "railway-toml",
            FileRole::RenderYaml => "render-yaml",
            FileRole::VercelJson => "vercel-json",
            FileRole::PagesWorkflow => "pages-workflow",
            FileRole::EcsTaskDefinition => "ecs-task-definition",
            FileRole::CloudbuildYaml => "cloudbuild-yaml",
            FileRole::FlyToml => "fly-toml",
            FileRole::K8sDeployment => "k8s-deployment",
            FileRole::K8sService => "k8s-service",
        }
    }

    /// Conventional path of the file relative to the project root.
    pub fn default_path(&self) -> &'static str {
        match self {
            FileRole::Dockerfile => "Dockerfile",
            FileRole::Dockerignore => ".dockerignore",
            FileRole::Procfile => "Procfile",
            FileRole::RuntimeTxt => "runtime.txt",
            FileRole::StreamlitConfig => ".streamlit/config.toml",
            FileRole::RailwayToml => "railway.toml",
            FileRole::RenderYaml => "render.yaml",
            FileRole::VercelJson => "vercel.json",
            FileRole::PagesWorkflow => ".github/workflows/pages.yml",
            FileRole::EcsTaskDefinition => "ecs-task-definition.json",
            FileRole::CloudbuildYaml => "cloudbuild.yaml",
            FileRole::FlyToml => "fly.toml",
            FileRole::K8sDeployment => "k8s/deployment.yaml",
            FileRole::K8sService => "k8s/service.yaml",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FileRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileRole::ALL
            .iter()
            .find(|role| role.id() == s)
            .copied()
            .ok_or_else(|| format!("Unknown file role: {s}"))
    }
}
