use deploy_planner::registry::PlatformRegistry;
use deploy_planner::resolver::CapabilityResolver;
use deploy_planner::types::{AppRequirements, PlatformProfile, ReasonKind};
use std::sync::Arc;

fn resolver_for(profiles: Vec<PlatformProfile>) -> CapabilityResolver {
    CapabilityResolver::new(Arc::new(PlatformRegistry::from_profiles(profiles).unwrap()))
}

#[test]
fn test_render_requires_docker() {
    let resolver = resolver_for(vec![PlatformProfile::new("render", "Render")
        .docker()
        .dynamic_port()]);
    let plans = resolver.resolve(&AppRequirements::new(true, false, None));

    assert_eq!(plans.len(), 1);
    let plan = &plans[0];
    assert_eq!(plan.id(), "render");
    assert!(!plan.compatible);
    assert!(plan.has_reason(ReasonKind::DockerRequired));
    assert!(plan.reasons.iter().any(|r| r.message.contains("Docker")));
}

#[test]
fn test_koyeb_dynamic_port_absorbs_desired_port() {
    let resolver = resolver_for(vec![PlatformProfile::new("koyeb", "Koyeb")
        .docker()
        .dynamic_port()]);
    let plans = resolver.resolve(&AppRequirements::new(true, true, Some(8501)));
    assert!(plans[0].compatible);
}

#[test]
fn test_static_hosts_reject_backends() {
    let resolver = CapabilityResolver::default();
    let plans = resolver.resolve(&AppRequirements::streamlit());

    for id in ["vercel", "github-pages"] {
        let plan = plans.iter().find(|p| p.id() == id).unwrap();
        assert!(!plan.compatible, "{id} should be incompatible");
        assert!(plan.has_reason(ReasonKind::BackendUnsupported));
    }
}

#[test]
fn test_fixed_port_conflict_and_match() {
    let resolver = CapabilityResolver::default();

    let plans = resolver.resolve(&AppRequirements::new(true, true, Some(8501)));
    let azure = plans.iter().find(|p| p.id() == "azure").unwrap();
    assert!(!azure.compatible);
    assert!(azure.has_reason(ReasonKind::PortConflict));
    let cloud = plans.iter().find(|p| p.id() == "streamlit-cloud").unwrap();
    assert!(cloud.compatible);
    assert!(cloud.has_reason(ReasonKind::FixedPort));

    let plans = resolver.resolve(&AppRequirements::new(true, true, Some(8000)));
    let azure = plans.iter().find(|p| p.id() == "azure").unwrap();
    assert!(azure.compatible);
    let cloud = plans.iter().find(|p| p.id() == "streamlit-cloud").unwrap();
    assert!(!cloud.compatible);
}

#[test]
fn test_absent_port_widens_compatibility() {
    let resolver = CapabilityResolver::default();
    let plans = resolver.resolve(&AppRequirements::new(true, true, None));
    let compatible: Vec<&str> = plans
        .iter()
        .filter(|p| p.compatible)
        .map(|p| p.id())
        .collect();
    assert!(compatible.contains(&"azure"));
    assert!(compatible.contains(&"streamlit-cloud"));
}

#[test]
fn test_ranking_for_streamlit_app() {
    let resolver = CapabilityResolver::default();
    let order: Vec<String> = resolver
        .resolve(&AppRequirements::streamlit())
        .iter()
        .map(|p| p.id().to_string())
        .collect();

    assert_eq!(
        order,
        vec![
            // compatible, no caveats
            "docker",
            "fly",
            "gcp",
            "koyeb",
            // compatible, one caveat
            "railway",
            "render",
            // compatible, two caveats
            "aws",
            "kubernetes",
            "streamlit-cloud",
            // compatible, three caveats
            "heroku",
            // incompatible
            "azure",
            "github-pages",
            "vercel",
        ]
    );
}

#[test]
fn test_without_docker_only_source_builds_remain() {
    let resolver = CapabilityResolver::default();
    let compatible: Vec<String> = resolver
        .compatible(&AppRequirements::new(true, false, None))
        .iter()
        .map(|p| p.id().to_string())
        .collect();
    assert_eq!(compatible, vec!["railway", "streamlit-cloud", "heroku"]);
}

#[test]
fn test_static_site_prefers_static_hosts_and_notes_them() {
    let resolver = CapabilityResolver::default();
    let plans = resolver.resolve(&AppRequirements::static_site());
    let pages = plans.iter().find(|p| p.id() == "github-pages").unwrap();
    assert!(pages.compatible);
    assert!(pages.has_reason(ReasonKind::StaticHost));
    assert!(pages.failures().next().is_none());
}

#[test]
fn test_plans_share_registry_profiles() {
    let registry = PlatformRegistry::builtin();
    let resolver = CapabilityResolver::new(Arc::clone(&registry));
    let plans = resolver.resolve(&AppRequirements::streamlit());
    for plan in &plans {
        assert!(Arc::ptr_eq(&plan.profile, registry.get(plan.id()).unwrap()));
    }
}

#[test]
fn test_plan_serializes_reason_kinds() {
    let resolver = CapabilityResolver::default();
    let plans = resolver.resolve(&AppRequirements::new(true, false, None));
    let render = plans.iter().find(|p| p.id() == "render").unwrap();
    let json = serde_json::to_value(render).unwrap();
    assert_eq!(json["profile"]["id"], "render");
    assert_eq!(json["compatible"], false);
    assert_eq!(json["reasons"][0]["kind"], "docker-required");
}

#[test]
fn test_assess_flags_fixed_port_even_when_dynamic_is_also_set() {
    // Only registry construction rejects this combination; assess still sees the conflict.
    let profile = Arc::new(PlatformProfile::new("odd", "Odd").dynamic_port().fixed_port(80));
    let plan = CapabilityResolver::assess(&profile, &AppRequirements::new(true, true, Some(8501)));

    assert!(!plan.compatible);
    assert!(plan.has_reason(ReasonKind::PortConflict));
}
