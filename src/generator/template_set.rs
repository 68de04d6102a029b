use crate::types::platform::FileRole;

/// Template source for each file role. The Dockerfile template is shared by
/// every Docker-based platform.
pub fn template_source(role: FileRole) -> &'static str {
    match role {
        FileRole::Dockerfile => include_str!("templates/dockerfile.hbs"),
        FileRole::Dockerignore => include_str!("templates/dockerignore.hbs"),
        FileRole::Procfile => include_str!("templates/procfile.hbs"),
        FileRole::RuntimeTxt => include_str!("templates/runtime_txt.hbs"),
        FileRole::StreamlitConfig => include_str!("templates/streamlit_config.hbs"),
        FileRole::RailwayToml => include_str!("templates/railway_toml.hbs"),
        FileRole::RenderYaml => include_str!("templates/render_yaml.hbs"),
        FileRole::VercelJson => include_str!("templates/vercel_json.hbs"),
        FileRole::PagesWorkflow => include_str!("templates/pages_workflow.hbs"),
        FileRole::EcsTaskDefinition => include_str!("templates/ecs_task_definition.hbs"),
        FileRole::CloudbuildYaml => include_str!("templates/cloudbuild_yaml.hbs"),
        FileRole::FlyToml => include_str!("templates/fly_toml.hbs"),
        FileRole::K8sDeployment => include_str!("templates/k8s_deployment.hbs"),
        FileRole::K8sService => include_str!("templates/k8s_service.hbs"),
    }
}
