//! Matches application requirements against the platform registry

pub mod capability;
pub mod rules;

pub use capability::*;
pub use rules::*;
