use deploy_planner::registry::{
    builtin_profiles, PlatformRegistry, RegistryError, RegistryHandle, RegistryLoader,
};
use deploy_planner::types::{FileRole, PlatformProfile};
use std::sync::Arc;
use std::thread;

#[test]
fn test_builtin_covers_documented_platforms() {
    let registry = PlatformRegistry::builtin();
    for id in [
        "streamlit-cloud",
        "railway",
        "render",
        "heroku",
        "vercel",
        "github-pages",
        "aws",
        "azure",
        "gcp",
        "koyeb",
        "fly",
        "kubernetes",
        "docker",
    ] {
        assert!(registry.contains(id), "missing platform {id}");
    }
}

#[test]
fn test_get_nonexistent_fails_with_not_found() {
    let registry = PlatformRegistry::builtin();
    let result = registry.get("nonexistent");
    assert!(
        matches!(result, Err(RegistryError::NotFound { ref id }) if id == "nonexistent"),
        "unexpected result: {result:?}"
    );
}

#[test]
fn test_no_builtin_profile_declares_both_port_modes() {
    for profile in builtin_profiles() {
        assert!(
            !(profile.supports_dynamic_port && profile.fixed_port.is_some()),
            "{} declares both a dynamic and a fixed port",
            profile.id
        );
    }
}

#[test]
fn test_all_can_be_iterated_repeatedly() {
    let registry = PlatformRegistry::builtin();
    let iter = registry.all();
    let first: Vec<&str> = iter.clone().map(|p| p.id.as_str()).collect();
    let second: Vec<&str> = iter.map(|p| p.id.as_str()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), registry.len());
}

#[test]
fn test_concurrent_readers_share_one_table() {
    let registry = PlatformRegistry::builtin();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .get("kubernetes")
                    .map(|p| p.required_files.clone())
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let files = handle.join().unwrap();
        assert_eq!(
            files,
            vec![
                FileRole::Dockerfile,
                FileRole::Dockerignore,
                FileRole::K8sDeployment,
                FileRole::K8sService
            ]
        );
    }
}

#[test]
fn test_load_replacement_table_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("platforms.yaml");
    std::fs::write(
        &path,
        r#"
platforms:
  - id: on-prem
    display_name: On-prem cluster
    requires_docker: true
    fixed_port: 8080
    required_files: [dockerfile, k8s-deployment, k8s-service]
    exceptions:
      - VPN access required
"#,
    )
    .unwrap();

    let registry = RegistryLoader::load(&path).unwrap();
    assert_eq!(registry.len(), 1);
    let profile = registry.get("on-prem").unwrap();
    assert_eq!(profile.name(), "On-prem cluster");
    assert_eq!(profile.fixed_port, Some(8080));
    assert!(profile.supports_backend);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RegistryLoader::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, RegistryError::Io { .. }));
}

#[test]
fn test_handle_swaps_whole_table() {
    let handle = RegistryHandle::default();
    let reader = handle.snapshot();

    let replacement = PlatformRegistry::from_profiles(vec![
        PlatformProfile::new("a", "A").docker(),
        PlatformProfile::new("b", "B").static_only(),
    ])
    .unwrap();
    handle.replace(replacement);

    // A reader that started before the swap still sees the full old table.
    assert_eq!(reader.len(), 13);
    assert!(reader.get("heroku").is_ok());

    let current = handle.snapshot();
    assert_eq!(current.ids().collect::<Vec<_>>(), vec!["a", "b"]);
}
