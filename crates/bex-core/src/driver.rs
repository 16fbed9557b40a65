//! Database driver trait definition

use crate::{Connection, Provider, ProviderConfig, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Capabilities that a driver may support
#[derive(Debug, Clone, Default)]
pub struct DriverCapabilities {
    /// Storage is a local file rather than a server
    pub file_based: bool,
    /// Supports transactions
    pub supports_transactions: bool,
    /// Maximum parameters per statement (None = no limit)
    pub max_parameters: Option<usize>,
}

/// Core driver trait that every backend implements
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// The backend this driver serves
    fn provider(&self) -> Provider;

    /// Human-readable name
    fn display_name(&self) -> &'static str;

    /// Supported features
    fn capabilities(&self) -> DriverCapabilities;

    /// Default connection port (None for file-based backends)
    fn default_port(&self) -> Option<u16> {
        None
    }

    /// Open a connection for a resolved configuration
    async fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn Connection>>;

    /// Open and immediately exercise a connection
    async fn test_connection(&self, config: &ProviderConfig) -> Result<()>;

    /// Render the backend's connection string for a resolved configuration
    fn build_connection_string(&self, config: &ProviderConfig) -> String {
        config.connection_string.clone()
    }
}
