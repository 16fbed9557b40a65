//! Storage layout configuration
//!
//! All path resolution flows from an explicit [`PathConfig`] passed to the
//! resolvers at construction. Nothing in this layer reads global state, so
//! tests can point a config at a synthetic root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{BexError, Provider, Result};

/// Root paths for provider storage.
///
/// The on-disk layout is fixed relative to `root`:
///
/// ```text
/// <root>/db/<provider>/<database_name>.<ext>    data files
/// <root>/sql/<provider>/<COMMAND>/<Table>.sql   command text files
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Installation root the `db/` and `sql/` trees live under.
    pub root: PathBuf,
    /// Base name of the per-provider data files.
    pub database_name: String,
}

impl PathConfig {
    /// Create a config rooted at `root` with the given data-file base name.
    pub fn new(root: impl Into<PathBuf>, database_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            database_name: database_name.into(),
        }
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: PathConfig = toml::from_str(&text).map_err(|e| {
            BexError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), root = %config.root.display(), "path config loaded");
        Ok(config)
    }

    /// Default location of the config file in the user's config directory.
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bex").join("paths.toml"))
    }

    /// Path of the provider's data file.
    pub fn data_path(&self, provider: Provider) -> PathBuf {
        self.root
            .join("db")
            .join(provider.dir_name())
            .join(format!("{}.{}", self.database_name, provider.file_extension()))
    }

    /// Root folder of the provider's `.sql` command files.
    pub fn sql_root(&self, provider: Provider) -> PathBuf {
        self.root.join("sql").join(provider.dir_name())
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self::new(".", "bex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_paths_follow_the_fixed_layout() {
        let paths = PathConfig::new("/opt/bex", "bex");
        assert_eq!(
            paths.data_path(Provider::Sqlite),
            PathBuf::from("/opt/bex/db/sqlite/bex.db")
        );
        assert_eq!(
            paths.data_path(Provider::Access),
            PathBuf::from("/opt/bex/db/access/bex.accdb")
        );
        assert_eq!(
            paths.data_path(Provider::SqlServer),
            PathBuf::from("/opt/bex/db/sqlserver/bex.mdf")
        );
    }

    #[test]
    fn sql_roots_are_per_provider() {
        let paths = PathConfig::new("/opt/bex", "bex");
        assert_eq!(
            paths.sql_root(Provider::SqlServer),
            PathBuf::from("/opt/bex/sql/sqlserver")
        );
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.toml");
        let original = PathConfig::new("/data/bex", "execution");
        std::fs::write(&file, toml::to_string(&original).unwrap()).unwrap();

        let loaded = PathConfig::from_file(&file).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn malformed_config_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.toml");
        std::fs::write(&file, "root = 12").unwrap();

        let err = PathConfig::from_file(&file).unwrap_err();
        assert!(matches!(err, BexError::Configuration(_)));
    }
}
