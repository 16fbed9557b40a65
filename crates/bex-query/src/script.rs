//! External `.sql` command file location and loading
//!
//! Command text ships as deployment artifacts laid out per provider and
//! command kind: `<root>/sql/<provider>/<COMMAND>/<Table>.sql`. This layer
//! only reads them. Nothing is cached; every lookup re-scans storage so a
//! redeployed script takes effect immediately.

use bex_core::{BexError, CommandKind, PathConfig, Provider, Result, Source};
use std::path::PathBuf;

/// Sources that ship `.sql` command files. Lookups for anything else fall
/// back to the SQLite script root.
const SCRIPTED_SOURCES: &[Source] = &[
    Source::Appropriations,
    Source::BudgetaryResourceExecution,
    Source::BudgetFunctions,
    Source::BudgetObjectClasses,
    Source::FederalHolidays,
    Source::FiscalYears,
    Source::MainAccounts,
    Source::ProductCategories,
    Source::Regulations,
    Source::ResourceLines,
    Source::TreasurySymbols,
];

/// Resolves and reads externally stored SQL command files.
pub struct ScriptLocator {
    paths: PathConfig,
}

impl ScriptLocator {
    /// Create a locator over the given path roots.
    pub fn new(paths: PathConfig) -> Self {
        Self { paths }
    }

    /// Folder holding the command files for a `(source, provider, command)`
    /// triple. Sources without shipped scripts resolve against the SQLite
    /// root.
    pub fn folder_path(
        &self,
        source: Source,
        provider: Provider,
        command: CommandKind,
    ) -> PathBuf {
        let root = if SCRIPTED_SOURCES.contains(&source) {
            self.paths.sql_root(provider)
        } else {
            self.paths.sql_root(Provider::Sqlite)
        };
        root.join(command.dir_name())
    }

    /// Full path of the source's command file.
    pub fn file_path(&self, source: Source, provider: Provider, command: CommandKind) -> PathBuf {
        self.folder_path(source, provider, command)
            .join(format!("{}.sql", source.table_name()))
    }

    /// Read the command text for a triple.
    ///
    /// Scans the resolved folder for a file whose stem case-exactly
    /// matches the source's table identity and whose extension is `.sql`.
    /// A missing folder or file is an explicit `NotFound` error.
    #[tracing::instrument(skip(self), fields(source = %source, provider = %provider, command = %command))]
    pub fn command_text(
        &self,
        source: Source,
        provider: Provider,
        command: CommandKind,
    ) -> Result<String> {
        let folder = self.folder_path(source, provider, command);

        let entries = std::fs::read_dir(&folder).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                BexError::NotFound(format!("No script folder at {}", folder.display()))
            }
            _ => BexError::Io(e),
        })?;

        for entry in entries {
            let entry = entry.map_err(BexError::Io)?;
            let path = entry.path();
            let stem_matches = path
                .file_stem()
                .is_some_and(|stem| stem == source.table_name());
            let is_sql = path.extension().is_some_and(|ext| ext == "sql");
            if stem_matches && is_sql {
                let text = std::fs::read_to_string(&path)?;
                tracing::debug!(path = %path.display(), bytes = text.len(), "command text loaded");
                return Ok(text);
            }
        }

        Err(BexError::NotFound(format!(
            "No {}.sql under {}",
            source.table_name(),
            folder.display()
        )))
    }
}
