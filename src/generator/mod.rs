//! Renders deployment artifacts for a chosen platform

pub mod artifact;
pub mod error;
pub mod helpers;
pub mod placeholders;
pub mod template_set;
pub mod values;

pub use artifact::*;
pub use error::*;
pub use placeholders::PlaceholderScanner;
pub use template_set::template_source;
pub use values::TemplateValues;
