//! Provider configuration resolution

use serde::{Deserialize, Serialize};

use crate::{PathConfig, Provider, Source};

/// ODBC driver clause for Access data files.
const ACCESS_DRIVER: &str = r"DRIVER={ Microsoft Access Driver (*.mdb, *.accdb) };DBQ=";

/// ODBC driver clause for the local SQL Server Express instance.
const SQLSERVER_DRIVER: &str = r"DRIVER={ ODBC Driver 17 for SQL Server };SERVER=.\SQLExpress;";

/// ODBC clause used in composed SQL Server connection strings. Differs from
/// [`SQLSERVER_DRIVER`] only in the `Server=` key casing; both spellings are
/// part of the deployed configuration surface.
const SQLSERVER_CONNECT_CLAUSE: &str = r"DRIVER={ ODBC Driver 17 for SQL Server };Server=.\SQLExpress;";

/// Resolved configuration for one `(source, provider)` pair.
///
/// Every field is derived from the inputs and the path roots at
/// construction; the record is immutable afterwards. Resolution is purely
/// textual — nothing here checks that the storage root exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub source: Source,
    pub provider: Provider,
    /// Table identity of `source`.
    pub table_name: String,
    /// Provider data file path, rendered as text.
    pub data_path: String,
    /// Provider driver clause. For SQLite this is the data path itself:
    /// the embedded client takes a file path where the ODBC backends take
    /// a driver prefix.
    pub driver_string: String,
    /// Composed connection string, per the provider's composition rule.
    pub connection_string: String,
}

impl ProviderConfig {
    /// Resolve the configuration for a dataset on a backend.
    ///
    /// Deterministic: two calls with equal inputs produce equal records.
    pub fn resolve(source: Source, provider: Provider, paths: &PathConfig) -> Self {
        let table_name = source.table_name().to_string();
        let data_path = paths.data_path(provider).to_string_lossy().into_owned();

        let driver_string = match provider {
            Provider::Sqlite => data_path.clone(),
            Provider::Access => ACCESS_DRIVER.to_string(),
            Provider::SqlServer => SQLSERVER_DRIVER.to_string(),
        };

        let connection_string = match provider {
            // The embedded client opens the file directly; the trailing
            // space is part of the deployed string format.
            Provider::Sqlite => format!("{} ", data_path),
            Provider::Access => format!("{}{}", driver_string, data_path),
            Provider::SqlServer => format!(
                "{}AttachDBFileName={}DATABASE={}Trusted_Connection=yes;",
                SQLSERVER_CONNECT_CLAUSE, table_name, data_path
            ),
        };

        tracing::debug!(
            source = %table_name,
            provider = %provider,
            data_path = %data_path,
            "provider configuration resolved"
        );

        Self {
            source,
            provider,
            table_name,
            data_path,
            driver_string,
            connection_string,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> PathConfig {
        PathConfig::new("/opt/bex", "bex")
    }

    #[test]
    fn resolution_is_deterministic() {
        for source in Source::ALL {
            for provider in Provider::ALL {
                let a = ProviderConfig::resolve(*source, *provider, &paths());
                let b = ProviderConfig::resolve(*source, *provider, &paths());
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn sqlite_connection_string_is_data_path_with_one_trailing_space() {
        let config = ProviderConfig::resolve(Source::Appropriations, Provider::Sqlite, &paths());
        assert_eq!(
            config.connection_string,
            format!("{} ", config.data_path)
        );
        assert!(!config.connection_string.ends_with("  "));
    }

    #[test]
    fn access_connection_string_concatenates_driver_and_path() {
        let config = ProviderConfig::resolve(Source::FiscalYears, Provider::Access, &paths());
        assert_eq!(
            config.connection_string,
            format!("{}{}", config.driver_string, config.data_path)
        );
        assert!(
            config
                .connection_string
                .starts_with(r"DRIVER={ Microsoft Access Driver (*.mdb, *.accdb) };DBQ=")
        );
        assert!(config.connection_string.ends_with("/db/access/bex.accdb"));
    }

    #[test]
    fn sqlserver_connection_string_attaches_the_table_database() {
        let config = ProviderConfig::resolve(Source::TreasurySymbols, Provider::SqlServer, &paths());
        assert!(
            config
                .connection_string
                .contains("AttachDBFileName=TreasurySymbols")
        );
        assert!(config.connection_string.contains("DATABASE=/opt/bex/db/sqlserver/bex.mdf"));
        assert!(config.connection_string.ends_with("Trusted_Connection=yes;"));
    }

    #[test]
    fn table_name_tracks_the_source_identity() {
        let config =
            ProviderConfig::resolve(Source::BudgetObjectClasses, Provider::Sqlite, &paths());
        assert_eq!(config.table_name, "BudgetObjectClasses");
    }

    #[test]
    fn sqlite_driver_string_is_the_data_path() {
        let config = ProviderConfig::resolve(Source::MainAccounts, Provider::Sqlite, &paths());
        assert_eq!(config.driver_string, config.data_path);
    }
}
