use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::platform::PlatformProfile;

/// Resolver verdict for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub profile: Arc<PlatformProfile>,
    pub compatible: bool,
    pub reasons: Vec<PlanReason>,
}

impl DeploymentPlan {
    pub fn id(&self) -> &str {
        &self.profile.id
    }

    /// Reasons that made the plan incompatible.
    pub fn failures(&self) -> impl Iterator<Item = &PlanReason> {
        self.reasons.iter().filter(|r| r.kind.is_failure())
    }

    pub fn has_reason(&self, kind: ReasonKind) -> bool {
        self.reasons.iter().any(|r| r.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonKind {
    BackendUnsupported,
    DockerRequired,
    PortConflict,
    DynamicPort,
    FixedPort,
    StaticHost,
    DockerOptional,
}

impl ReasonKind {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ReasonKind::BackendUnsupported | ReasonKind::DockerRequired | ReasonKind::PortConflict
        )
    }
}

/// Human-readable compatibility note attached to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReason {
    pub kind: ReasonKind,
    pub message: String,
}

impl PlanReason {
    pub fn new(kind: ReasonKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PlanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
