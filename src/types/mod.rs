pub mod plan;
pub mod platform;
pub mod requirements;

pub use plan::*;
pub use platform::*;
pub use requirements::*;
