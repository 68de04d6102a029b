use crate::registry::table::PlatformRegistry;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Holds the current registry table and swaps it as a whole.
///
/// The lock only guards the pointer. Readers take a snapshot and keep a
/// consistent table for as long as they hold it.
#[derive(Debug)]
pub struct RegistryHandle {
    current: RwLock<Arc<PlatformRegistry>>,
}

impl RegistryHandle {
    pub fn new(registry: Arc<PlatformRegistry>) -> Self {
        Self {
            current: RwLock::new(registry),
        }
    }

    pub fn snapshot(&self) -> Arc<PlatformRegistry> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Replaces the whole table and returns the previous one.
    pub fn replace(&self, registry: PlatformRegistry) -> Arc<PlatformRegistry> {
        let next = Arc::new(registry);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!("Replacing platform table ({} profiles)", next.len());
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for RegistryHandle {
    fn default() -> Self {
        Self::new(PlatformRegistry::builtin())
    }
}
