use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main deploy-planner CLI interface
#[derive(Parser, Debug)]
#[command(name = "deploy-planner")]
#[command(about = "Pick a hosting platform for a web app and generate its deployment files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct DeployPlannerCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Replacement platform table (YAML or JSON)
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every known platform
    List,

    /// Show one platform's capabilities
    Show {
        /// Platform id
        platform: String,
    },

    /// Rank platforms against the app's requirements
    Resolve {
        #[command(flatten)]
        requirements: RequirementArgs,
    },

    /// Render the deployment files for one platform
    Generate {
        /// Platform id
        platform: String,

        #[command(flatten)]
        requirements: RequirementArgs,

        /// Override a template value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Directory the files are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Print the files instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RequirementArgs {
    /// Deploy manifest (YAML or JSON)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// The app is static content with no backend
    #[arg(long = "static")]
    pub static_site: bool,

    /// No Dockerfile may be used
    #[arg(long)]
    pub no_docker: bool,

    /// Port the app listens on
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
