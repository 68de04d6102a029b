//! Deploy manifests describing the application to plan for

pub mod error;
pub mod manifest;

pub use error::*;
pub use manifest::*;
