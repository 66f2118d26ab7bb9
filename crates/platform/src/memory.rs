//! In-memory host primitives for tests and non-browser hosts.

use crate::host::{HostEnvironment, Location, PrivacySignals, StorageArea};
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.remove(key);
        Ok(())
    }
}

/// Location whose href changes only through [`StaticLocation::navigate`].
#[derive(Debug)]
pub struct StaticLocation {
    href: RwLock<String>,
}

impl StaticLocation {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: RwLock::new(href.into()),
        }
    }

    pub fn navigate(&self, href: impl Into<String>) {
        let mut current = self.href.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = href.into();
    }
}

impl Location for StaticLocation {
    fn href(&self) -> String {
        self.href
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticPrivacySignals {
    pub standard: Option<Value>,
    pub vendor_prefixed: Option<Value>,
    pub global: Option<Value>,
}

impl PrivacySignals for StaticPrivacySignals {
    fn standard(&self) -> Option<Value> {
        self.standard.clone()
    }

    fn vendor_prefixed(&self) -> Option<Value> {
        self.vendor_prefixed.clone()
    }

    fn global(&self) -> Option<Value> {
        self.global.clone()
    }
}

impl HostEnvironment {
    /// Server-side rendering style host: a fixed URL and nothing else.
    pub fn headless(href: impl Into<String>) -> Self {
        Self::new(
            Arc::new(StaticLocation::new(href)),
            Arc::new(StaticPrivacySignals::default()),
        )
    }
}
