//! Catalog of deployment target profiles

pub mod catalog;
pub mod error;
pub mod handle;
pub mod loader;
pub mod table;

pub use catalog::*;
pub use error::*;
pub use handle::*;
pub use loader::*;
pub use table::*;
