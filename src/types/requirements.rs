use serde::{Deserialize, Serialize};

/// Port Streamlit binds to unless told otherwise.
pub const STREAMLIT_DEFAULT_PORT: u16 = 8501;

/// What the application being deployed needs from its host.
///
/// Absent fields are unconstrained: a missing `desired_port` never rules a
/// platform out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRequirements {
    #[serde(default = "default_true")]
    pub has_backend: bool,
    #[serde(default)]
    pub docker_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_port: Option<u16>,
}

fn default_true() -> bool {
    true
}

impl AppRequirements {
    pub fn new(has_backend: bool, docker_available: bool, desired_port: Option<u16>) -> Self {
        Self {
            has_backend,
            docker_available,
            desired_port,
        }
    }

    /// A containerized Streamlit app on its conventional port.
    pub fn streamlit() -> Self {
        Self::new(true, true, Some(STREAMLIT_DEFAULT_PORT))
    }

    /// Static content with no Dockerfile and no port preference.
    pub fn static_site() -> Self {
        Self::new(false, false, None)
    }

    pub fn with_backend(mut self, has_backend: bool) -> Self {
        self.has_backend = has_backend;
        self
    }

    pub fn with_docker(mut self, docker_available: bool) -> Self {
        self.docker_available = docker_available;
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.desired_port = port;
        self
    }
}

impl Default for AppRequirements {
    fn default() -> Self {
        Self::streamlit()
    }
}
