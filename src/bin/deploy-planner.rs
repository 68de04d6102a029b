use anyhow::{Context, Result};
use clap::Parser;
use deploy_planner::cli::{
    print_artifacts, print_json, print_platform, print_platform_list, print_plans, print_written,
    write_artifacts, Commands, DeployPlannerCli, OutputFormat, PlannerSession,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = DeployPlannerCli::parse();

    // Initialize tracing
    let level = match cli.verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: DeployPlannerCli) -> Result<()> {
    info!("Starting deploy-planner v{}", env!("CARGO_PKG_VERSION"));

    let manifest = match &cli.command {
        Commands::Resolve { requirements } | Commands::Generate { requirements, .. } => {
            requirements.manifest.clone()
        }
        _ => None,
    };
    let session = PlannerSession::open(cli.registry.as_deref(), manifest.as_deref())
        .context("Failed to load planner configuration")?;

    match &cli.command {
        Commands::List => {
            let profiles = session.list();
            match cli.format {
                OutputFormat::Text => print_platform_list(&profiles),
                OutputFormat::Json => print_json(&profiles)?,
            }
        }
        Commands::Show { platform } => {
            let profile = session.show(platform)?;
            match cli.format {
                OutputFormat::Text => print_platform(&profile),
                OutputFormat::Json => print_json(&*profile)?,
            }
        }
        Commands::Resolve { requirements } => {
            let plans = session.resolve(requirements);
            match cli.format {
                OutputFormat::Text => print_plans(&plans),
                OutputFormat::Json => print_json(&plans)?,
            }
        }
        Commands::Generate {
            platform,
            requirements,
            set,
            output_dir,
            dry_run,
        } => {
            let artifacts = session
                .generate(platform, requirements, set)
                .with_context(|| format!("Failed to generate files for {platform}"))?;

            if *dry_run {
                match cli.format {
                    OutputFormat::Text => print_artifacts(&artifacts),
                    OutputFormat::Json => print_json(&artifacts)?,
                }
            } else {
                let written = write_artifacts(&artifacts, output_dir).await?;
                match cli.format {
                    OutputFormat::Text => print_written(&artifacts, &written),
                    OutputFormat::Json => print_json(&written)?,
                }
            }
        }
    }

    Ok(())
}
