//! Asynchronous facade over the host's synchronous key/value storage.

use crate::config::PersistenceScope;
use crate::host::{StorageArea, StorageSlot};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage bound to one scope. Every operation suspends once before touching
/// the primitive, so no result is ready on the first poll.
#[derive(Clone)]
pub struct PlatformStorage {
    scope: PersistenceScope,
    area: Arc<dyn StorageArea>,
}

impl PlatformStorage {
    pub fn new(scope: PersistenceScope, area: Arc<dyn StorageArea>) -> Self {
        Self { scope, area }
    }

    /// Pick the slot for `scope`. Missing and denied slots both disable storage.
    pub fn select(
        scope: PersistenceScope,
        session: &StorageSlot,
        durable: &StorageSlot,
    ) -> Option<Self> {
        let slot = match scope {
            PersistenceScope::Session => session,
            PersistenceScope::Durable => durable,
        };

        match slot {
            StorageSlot::Available(area) => {
                debug!("Using {} storage", scope.as_str());
                Some(Self::new(scope, Arc::clone(area)))
            }
            StorageSlot::Missing => {
                debug!("No {} storage on this host", scope.as_str());
                None
            }
            StorageSlot::Denied(reason) => {
                warn!("{} storage is disabled: {}", scope.as_str(), reason);
                None
            }
        }
    }

    pub fn scope(&self) -> PersistenceScope {
        self.scope
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        tokio::task::yield_now().await;
        self.area.get_item(key)
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::task::yield_now().await;
        self.area.set_item(key, value)
    }

    pub async fn clear(&self, key: &str) -> Result<()> {
        tokio::task::yield_now().await;
        self.area.remove_item(key)
    }
}

impl fmt::Debug for PlatformStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformStorage")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
