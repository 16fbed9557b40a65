//! Access driver
//!
//! Access data files are reachable only through the Windows ODBC driver
//! manager; no native client exists in this stack. The driver carries the
//! full configuration surface so resolution and connection-string
//! composition work like any other backend, and `connect` reports a typed
//! `NotSupported` error instead of opening a handle.

use async_trait::async_trait;
use bex_core::{
    BexError, Connection, DatabaseDriver, DriverCapabilities, Provider, ProviderConfig, Result,
};
use std::sync::Arc;

/// Microsoft Access database driver
pub struct AccessDriver;

impl AccessDriver {
    /// Create a new Access driver instance
    pub fn new() -> Self {
        tracing::debug!("Access driver initialized");
        Self
    }
}

impl Default for AccessDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for AccessDriver {
    fn provider(&self) -> Provider {
        Provider::Access
    }

    fn display_name(&self) -> &'static str {
        "Microsoft Access"
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities {
            file_based: true,
            supports_transactions: false,
            max_parameters: None,
        }
    }

    #[tracing::instrument(skip(self, config), fields(source = %config.table_name))]
    async fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn Connection>> {
        tracing::warn!(
            path = %config.data_path,
            "Access connection requested without an ODBC client"
        );
        Err(BexError::NotSupported(
            "Access databases require the Microsoft Access ODBC driver, \
             which is not available to this client"
                .into(),
        ))
    }

    async fn test_connection(&self, config: &ProviderConfig) -> Result<()> {
        self.connect(config).await.map(|_| ())
    }
}
