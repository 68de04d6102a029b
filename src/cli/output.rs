use crate::cli::error::Result;
use crate::generator::ArtifactSet;
use crate::types::{DeploymentPlan, PlatformProfile, PortPolicy};
use std::path::PathBuf;
use std::sync::Arc;

/// Print the platform table
pub fn print_platform_list(profiles: &[Arc<PlatformProfile>]) {
    println!("📦 Known Platforms ({}):", profiles.len());
    for profile in profiles {
        println!(
            "  • {:<16} {} [{}]",
            profile.id,
            profile.name(),
            capability_tags(profile).join(", ")
        );
    }
}

/// Print one profile in detail
pub fn print_platform(profile: &PlatformProfile) {
    println!("🎯 {} ({})", profile.name(), profile.id);
    println!("  Docker required: {}", yes_no(profile.requires_docker));
    println!("  Backend support: {}", yes_no(profile.supports_backend));
    println!("  Port: {}", describe_port(profile));

    if !profile.required_files.is_empty() {
        println!("  Files:");
        for role in &profile.required_files {
            println!("    - {} ({})", role.default_path(), role);
        }
    }

    if !profile.exceptions.is_empty() {
        println!("  Caveats:");
        for caveat in &profile.exceptions {
            println!("    ⚠️  {caveat}");
        }
    }
}

/// Print ranked plans, compatible first
pub fn print_plans(plans: &[DeploymentPlan]) {
    let compatible = plans.iter().filter(|p| p.compatible).count();
    println!(
        "🔍 {compatible} of {} platforms are compatible",
        plans.len()
    );
    println!();

    for (rank, plan) in plans.iter().enumerate() {
        let icon = if plan.compatible { "✅" } else { "❌" };
        println!("{:>3}. {icon} {} ({})", rank + 1, plan.profile.name(), plan.id());
        for reason in &plan.reasons {
            println!("       {reason}");
        }
        if plan.compatible {
            for caveat in &plan.profile.exceptions {
                println!("       ⚠️  {caveat}");
            }
        }
    }
}

/// Print generated files (dry run)
pub fn print_artifacts(set: &ArtifactSet) {
    for artifact in set.iter() {
        println!("==> {} <==", artifact.path);
        print!("{}", artifact.content);
        if !artifact.content.ends_with('\n') {
            println!();
        }
        println!();
    }
    println!("digest: {}", set.digest());
}

pub fn print_written(set: &ArtifactSet, written: &[PathBuf]) {
    println!("✅ Generated {} files for {}:", written.len(), set.platform);
    for path in written {
        println!("  • {}", path.display());
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn capability_tags(profile: &PlatformProfile) -> Vec<String> {
    let mut tags = Vec::new();
    tags.push(if profile.supports_backend {
        "backend".to_string()
    } else {
        "static".to_string()
    });
    if profile.requires_docker {
        tags.push("docker".to_string());
    }
    tags.push(describe_port(profile));
    tags
}

fn describe_port(profile: &PlatformProfile) -> String {
    match profile.port_policy() {
        PortPolicy::Dynamic => "$PORT injected".to_string(),
        PortPolicy::Fixed(port) => format!("port {port}"),
        PortPolicy::Configurable => "any port".to_string(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
