//! Full-table frame generation
//!
//! Materializes a dataset into memory as a tabular result or as positional
//! row tuples. No pagination or row limit: the reference tables are small
//! and fixed in size.

use bex_core::{
    Connection, PathConfig, Provider, ProviderConfig, QueryResult, Result, Row, Source, Value,
};
use bex_drivers::sqlite::SqliteConnection;

/// Materializes full-table results from the SQLite data file.
pub struct FrameGenerator {
    paths: PathConfig,
}

impl FrameGenerator {
    /// Create a generator over the given path roots.
    pub fn new(paths: PathConfig) -> Self {
        Self { paths }
    }

    /// The command this generator issues for a dataset.
    pub fn command_text(&self, source: Source) -> String {
        format!("SELECT * FROM {};", source.table_name())
    }

    /// Load the whole dataset as a tabular result.
    #[tracing::instrument(skip(self), fields(source = %source))]
    pub async fn create_frame(&self, source: Source) -> Result<QueryResult> {
        let config = ProviderConfig::resolve(source, Provider::Sqlite, &self.paths);
        let conn = SqliteConnection::open(&config.data_path).map_err(|e| {
            tracing::error!(source = %source, error = %e, "failed to open data file");
            e
        })?;

        let result = conn.query(&self.command_text(source), &[]).await?;
        tracing::debug!(rows = result.row_count(), "frame materialized");

        conn.close().await?;
        Ok(result)
    }

    /// Load the whole dataset as positional row tuples.
    pub async fn create_tuples(&self, source: Source) -> Result<Vec<Vec<Value>>> {
        let frame = self.create_frame(source).await?;
        Ok(frame.rows.into_iter().map(Row::into_values).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_paths(dir: &tempfile::TempDir) -> PathConfig {
        let paths = PathConfig::new(dir.path(), "bex");
        std::fs::create_dir_all(dir.path().join("db/sqlite")).unwrap();

        let data_path = paths.data_path(Provider::Sqlite);
        let conn = SqliteConnection::open(&data_path.to_string_lossy()).unwrap();
        conn.execute(
            "CREATE TABLE FederalHolidays (HolidayId INTEGER PRIMARY KEY, Name TEXT, Observed TEXT)",
            &[],
        )
        .await
        .unwrap();
        conn.execute(
            "INSERT INTO FederalHolidays (Name, Observed) VALUES ('Veterans Day', '2024-11-11'), ('Thanksgiving', '2024-11-28')",
            &[],
        )
        .await
        .unwrap();
        conn.close().await.unwrap();
        paths
    }

    #[tokio::test]
    async fn create_frame_materializes_the_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(&dir).await;

        let frame = FrameGenerator::new(paths)
            .create_frame(Source::FederalHolidays)
            .await
            .unwrap();

        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.column_count(), 3);
        assert_eq!(
            frame.rows[0].get_by_name("Name").unwrap().as_str(),
            Some("Veterans Day")
        );
    }

    #[tokio::test]
    async fn create_tuples_yields_positional_rows() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(&dir).await;

        let tuples = FrameGenerator::new(paths)
            .create_tuples(Source::FederalHolidays)
            .await
            .unwrap();

        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[1][1].as_str(), Some("Thanksgiving"));
    }

    #[tokio::test]
    async fn missing_table_is_a_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = seeded_paths(&dir).await;

        let err = FrameGenerator::new(paths)
            .create_frame(Source::TreasurySymbols)
            .await
            .unwrap_err();
        assert!(matches!(err, bex_core::BexError::Query(_)));
    }

    #[test]
    fn command_text_selects_the_table() {
        let generator = FrameGenerator::new(PathConfig::default());
        assert_eq!(
            generator.command_text(Source::Appropriations),
            "SELECT * FROM Appropriations;"
        );
    }
}
