use crate::registry::PlatformRegistry;
use crate::resolver::rules::{RuleOutcome, RULES};
use crate::types::plan::DeploymentPlan;
use crate::types::platform::PlatformProfile;
use crate::types::requirements::AppRequirements;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// Ranks every registered platform against an application's requirements.
#[derive(Debug, Clone)]
pub struct CapabilityResolver {
    registry: Arc<PlatformRegistry>,
}

impl CapabilityResolver {
    pub fn new(registry: Arc<PlatformRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<PlatformRegistry> {
        &self.registry
    }

    /// One plan per registered profile, best first.
    ///
    /// Compatible plans come before incompatible ones; within each group,
    /// profiles with fewer caveats come first and ties fall back to the id.
    pub fn resolve(&self, requirements: &AppRequirements) -> Vec<DeploymentPlan> {
        let mut plans: Vec<DeploymentPlan> = self
            .registry
            .all()
            .map(|profile| Self::assess(profile, requirements))
            .collect();

        plans.sort_by(rank);

        info!(
            "Resolved {} platforms ({} compatible)",
            plans.len(),
            plans.iter().filter(|p| p.compatible).count()
        );
        plans
    }

    pub fn compatible(&self, requirements: &AppRequirements) -> Vec<DeploymentPlan> {
        self.resolve(requirements)
            .into_iter()
            .filter(|plan| plan.compatible)
            .collect()
    }

    pub fn best(&self, requirements: &AppRequirements) -> Option<DeploymentPlan> {
        self.resolve(requirements)
            .into_iter()
            .next()
            .filter(|plan| plan.compatible)
    }

    /// Evaluates a single profile, independent of any registry.
    pub fn assess(profile: &Arc<PlatformProfile>, requirements: &AppRequirements) -> DeploymentPlan {
        let mut failures = Vec::new();
        let mut notes = Vec::new();

        for rule in RULES {
            match rule(profile, requirements) {
                RuleOutcome::Fail(reason) => failures.push(reason),
                RuleOutcome::Pass(Some(note)) => notes.push(note),
                RuleOutcome::Pass(None) => {}
            }
        }

        let compatible = failures.is_empty();
        debug!(
            platform = %profile.id,
            compatible,
            failures = failures.len(),
            "Assessed platform"
        );

        // Incompatible plans only explain the rejection.
        let reasons = if compatible { notes } else { failures };

        DeploymentPlan {
            profile: Arc::clone(profile),
            compatible,
            reasons,
        }
    }
}

fn rank(a: &DeploymentPlan, b: &DeploymentPlan) -> Ordering {
    b.compatible
        .cmp(&a.compatible)
        .then_with(|| a.profile.exceptions.len().cmp(&b.profile.exceptions.len()))
        .then_with(|| a.profile.id.cmp(&b.profile.id))
}

impl Default for CapabilityResolver {
    fn default() -> Self {
        Self::new(PlatformRegistry::builtin())
    }
}
