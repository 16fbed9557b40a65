//! Database backend identities

use serde::{Deserialize, Serialize};

/// A database backend. The set is closed: resolution code matches
/// exhaustively on it, so adding a provider is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Sqlite,
    Access,
    SqlServer,
}

impl Provider {
    /// Every supported backend.
    pub const ALL: &'static [Provider] = &[Provider::Sqlite, Provider::Access, Provider::SqlServer];

    /// Legacy identity string, matching the configuration files and
    /// script layout shipped with the application.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Sqlite => "SQLite",
            Provider::Access => "Access",
            Provider::SqlServer => "SqlServer",
        }
    }

    /// Filesystem segment under `db/` and `sql/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Provider::Sqlite => "sqlite",
            Provider::Access => "access",
            Provider::SqlServer => "sqlserver",
        }
    }

    /// Data file extension for the backend's storage format.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Provider::Sqlite => "db",
            Provider::Access => "accdb",
            Provider::SqlServer => "mdf",
        }
    }

    /// Driver identifier, as used by the driver registry.
    pub fn driver_id(&self) -> &'static str {
        match self {
            Provider::Sqlite => "sqlite",
            Provider::Access => "access",
            Provider::SqlServer => "mssql",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
