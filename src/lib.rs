//! Deploy Planner - deployment target resolver and artifact generator
//!
//! This crate matches a web application's requirements against a catalog of
//! hosting platforms, ranks the compatible ones, and renders the files
//! (Dockerfile, Procfile, manifests) needed to deploy to the chosen platform.

pub mod cli;
pub mod config;
pub mod generator;
pub mod registry;
pub mod resolver;
pub mod types;

pub use config::DeployManifest;
pub use generator::{ArtifactGenerator, ArtifactSet, GenerateError, TemplateValues};
pub use registry::{PlatformRegistry, RegistryError, RegistryHandle, RegistryLoader};
pub use resolver::CapabilityResolver;
pub use types::*;
