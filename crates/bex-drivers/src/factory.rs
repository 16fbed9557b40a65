//! Connection factory
//!
//! Composes path configuration, provider resolution, and the driver
//! registry: callers hand it a `(source, provider)` pair and get back a
//! live connection handle.

use bex_core::{BexError, Connection, PathConfig, Provider, ProviderConfig, Result, Source};
use std::sync::Arc;

use crate::DriverRegistry;

/// Opens connections for `(source, provider)` pairs.
pub struct ConnectionFactory {
    paths: PathConfig,
    registry: DriverRegistry,
}

impl ConnectionFactory {
    /// Create a factory over the built-in drivers.
    pub fn new(paths: PathConfig) -> Self {
        Self {
            paths,
            registry: DriverRegistry::with_defaults(),
        }
    }

    /// Create a factory with a caller-supplied registry.
    pub fn with_registry(paths: PathConfig, registry: DriverRegistry) -> Self {
        Self { paths, registry }
    }

    /// Resolve the provider configuration for a pair without connecting.
    pub fn resolve(&self, source: Source, provider: Provider) -> ProviderConfig {
        ProviderConfig::resolve(source, provider, &self.paths)
    }

    /// Open a connection. The caller owns the handle and is responsible
    /// for closing it.
    #[tracing::instrument(skip(self), fields(source = %source, provider = %provider))]
    pub async fn connect(
        &self,
        source: Source,
        provider: Provider,
    ) -> Result<Arc<dyn Connection>> {
        let config = self.resolve(source, provider);
        let driver = self.registry.get(provider).ok_or_else(|| {
            BexError::Resolution(format!("No driver registered for {}", provider))
        })?;
        driver.connect(&config).await
    }

    /// Open and immediately exercise a connection.
    pub async fn test_connection(&self, source: Source, provider: Provider) -> Result<()> {
        let config = self.resolve(source, provider);
        let driver = self.registry.get(provider).ok_or_else(|| {
            BexError::Resolution(format!("No driver registered for {}", provider))
        })?;
        driver.test_connection(&config).await
    }
}
