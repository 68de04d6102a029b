//! Compatibility rules between an application and a platform

use crate::types::plan::{PlanReason, ReasonKind};
use crate::types::platform::{PlatformProfile, PortPolicy};
use crate::types::requirements::AppRequirements;

/// Outcome of one rule: either the platform fails it, or the rule leaves an
/// informational note (or nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass(Option<PlanReason>),
    Fail(PlanReason),
}

pub type Rule = fn(&PlatformProfile, &AppRequirements) -> RuleOutcome;

/// Rules in the order their reasons appear on a plan.
pub const RULES: [Rule; 3] = [backend_rule, docker_rule, port_rule];

pub fn backend_rule(profile: &PlatformProfile, req: &AppRequirements) -> RuleOutcome {
    match (req.has_backend, profile.supports_backend) {
        (true, false) => RuleOutcome::Fail(PlanReason::new(
            ReasonKind::BackendUnsupported,
            format!(
                "{} only serves static content but the app has a backend",
                profile.name()
            ),
        )),
        (false, false) => RuleOutcome::Pass(Some(PlanReason::new(
            ReasonKind::StaticHost,
            format!("{} serves the static build directly", profile.name()),
        ))),
        _ => RuleOutcome::Pass(None),
    }
}

pub fn docker_rule(profile: &PlatformProfile, req: &AppRequirements) -> RuleOutcome {
    match (profile.requires_docker, req.docker_available) {
        (true, false) => RuleOutcome::Fail(PlanReason::new(
            ReasonKind::DockerRequired,
            format!(
                "{} deploys from a Docker image but no Dockerfile is available",
                profile.name()
            ),
        )),
        (false, true) => RuleOutcome::Pass(Some(PlanReason::new(
            ReasonKind::DockerOptional,
            format!("{} builds from source; the Dockerfile is not used", profile.name()),
        ))),
        _ => RuleOutcome::Pass(None),
    }
}

pub fn port_rule(profile: &PlatformProfile, req: &AppRequirements) -> RuleOutcome {
    // A fixed port conflicts regardless of the dynamic flag; profiles built
    // outside a registry are not validated.
    if let (Some(fixed), Some(desired)) = (profile.fixed_port, req.desired_port) {
        if fixed != desired {
            return RuleOutcome::Fail(PlanReason::new(
                ReasonKind::PortConflict,
                format!(
                    "{} only routes to port {fixed} but the app wants port {desired}",
                    profile.name()
                ),
            ));
        }
    }

    match (profile.port_policy(), req.desired_port) {
        (PortPolicy::Fixed(fixed), _) => RuleOutcome::Pass(Some(PlanReason::new(
            ReasonKind::FixedPort,
            format!("{} routes traffic to port {fixed}", profile.name()),
        ))),
        (PortPolicy::Dynamic, Some(desired)) => RuleOutcome::Pass(Some(PlanReason::new(
            ReasonKind::DynamicPort,
            format!(
                "{} injects $PORT at runtime; port {desired} is used only as a local fallback",
                profile.name()
            ),
        ))),
        (PortPolicy::Dynamic, None) => RuleOutcome::Pass(Some(PlanReason::new(
            ReasonKind::DynamicPort,
            format!("{} injects $PORT at runtime", profile.name()),
        ))),
        (PortPolicy::Configurable, _) => RuleOutcome::Pass(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_rule() {
        let pages = PlatformProfile::new("github-pages", "GitHub Pages").static_only();
        let req = AppRequirements::new(true, false, None);
        assert!(matches!(backend_rule(&pages, &req), RuleOutcome::Fail(_)));

        let req = AppRequirements::static_site();
        assert!(matches!(backend_rule(&pages, &req), RuleOutcome::Pass(Some(_))));
    }

    #[test]
    fn test_port_rule_absent_port_is_unconstrained() {
        let azure = PlatformProfile::new("azure", "Azure").docker().fixed_port(8000);
        let req = AppRequirements::new(true, true, None);
        assert!(matches!(port_rule(&azure, &req), RuleOutcome::Pass(_)));
    }

    #[test]
    fn test_port_rule_conflict() {
        let azure = PlatformProfile::new("azure", "Azure").docker().fixed_port(8000);
        let req = AppRequirements::new(true, true, Some(8501));
        match port_rule(&azure, &req) {
            RuleOutcome::Fail(reason) => {
                assert_eq!(reason.kind, ReasonKind::PortConflict);
                assert!(reason.message.contains("8000"));
                assert!(reason.message.contains("8501"));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_port_rule_checks_fixed_port_on_unvalidated_profile() {
        let odd = PlatformProfile::new("odd", "Odd").dynamic_port().fixed_port(80);
        let req = AppRequirements::new(true, true, Some(8501));
        assert!(matches!(
            port_rule(&odd, &req),
            RuleOutcome::Fail(PlanReason { kind: ReasonKind::PortConflict, .. })
        ));
    }
}
