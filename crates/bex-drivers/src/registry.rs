//! Driver registry for the supported backends

use bex_core::{DatabaseDriver, Provider};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of available database drivers, keyed by provider
pub struct DriverRegistry {
    drivers: HashMap<Provider, Arc<dyn DatabaseDriver>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in drivers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::sqlite::SqliteDriver::new()));
        registry.register(Arc::new(crate::access::AccessDriver::new()));
        registry.register(Arc::new(crate::mssql::MssqlDriver::new()));
        registry
    }

    /// Register a driver, replacing any existing driver for its provider
    pub fn register(&mut self, driver: Arc<dyn DatabaseDriver>) {
        let provider = driver.provider();
        tracing::info!(driver = %provider, "registering database driver");
        self.drivers.insert(provider, driver);
    }

    /// Get the driver for a provider
    pub fn get(&self, provider: Provider) -> Option<Arc<dyn DatabaseDriver>> {
        let driver = self.drivers.get(&provider).cloned();
        if driver.is_none() {
            tracing::warn!(driver = %provider, "driver not found in registry");
        }
        driver
    }

    /// Check if a driver is registered
    pub fn has(&self, provider: Provider) -> bool {
        self.drivers.contains_key(&provider)
    }

    /// List all registered providers
    pub fn list(&self) -> Vec<Provider> {
        self.drivers.keys().copied().collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_provider() {
        let registry = DriverRegistry::with_defaults();
        for provider in Provider::ALL {
            assert!(registry.has(*provider), "missing driver for {}", provider);
        }
    }

    #[test]
    fn empty_registry_has_no_drivers() {
        let registry = DriverRegistry::new();
        assert!(registry.get(Provider::Sqlite).is_none());
        assert!(registry.list().is_empty());
    }
}
