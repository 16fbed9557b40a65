//! End-to-end tests against a real temporary SQLite database

use anyhow::Result;
use bex_drivers::{BexError, ConnectionFactory, PathConfig, Provider, Source, Value};

/// Build a path config rooted in a temp dir with the expected layout.
fn temp_paths(dir: &tempfile::TempDir) -> PathConfig {
    let root = dir.path();
    std::fs::create_dir_all(root.join("db").join("sqlite")).expect("create db/sqlite");
    PathConfig::new(root, "bex")
}

#[tokio::test]
async fn factory_opens_a_sqlite_database_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let factory = ConnectionFactory::new(temp_paths(&dir));

    let conn = factory
        .connect(Source::Appropriations, Provider::Sqlite)
        .await?;

    conn.execute(
        "CREATE TABLE Appropriations (AppropriationId INTEGER PRIMARY KEY, Title TEXT, Amount REAL)",
        &[],
    )
    .await?;

    conn.execute(
        "INSERT INTO Appropriations (Title, Amount) VALUES (?, ?)",
        &[Value::String("Operations".into()), Value::Float64(1_000_000.0)],
    )
    .await?;

    let result = conn.query("SELECT * FROM Appropriations", &[]).await?;
    assert_eq!(result.row_count(), 1);
    assert_eq!(
        result.rows[0].get_by_name("Title").unwrap().as_str(),
        Some("Operations")
    );

    conn.close().await?;
    assert!(conn.is_closed());

    // The database file landed at the resolved data path.
    assert!(dir.path().join("db/sqlite/bex.db").exists());
    Ok(())
}

#[tokio::test]
async fn factory_connect_is_repeatable_for_the_same_pair() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let factory = ConnectionFactory::new(temp_paths(&dir));

    let first = factory
        .connect(Source::FiscalYears, Provider::Sqlite)
        .await?;
    first
        .execute("CREATE TABLE FiscalYears (BFY TEXT)", &[])
        .await?;
    first.close().await?;

    // A second connection sees the same file.
    let second = factory
        .connect(Source::FiscalYears, Provider::Sqlite)
        .await?;
    let result = second.query("SELECT * FROM FiscalYears", &[]).await?;
    assert_eq!(result.row_count(), 0);
    assert_eq!(result.column_count(), 1);
    Ok(())
}

#[tokio::test]
async fn access_connect_reports_not_supported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let factory = ConnectionFactory::new(temp_paths(&dir));

    let err = factory
        .connect(Source::Regulations, Provider::Access)
        .await
        .unwrap_err();
    assert!(matches!(err, BexError::NotSupported(_)));
}

#[tokio::test]
async fn test_connection_exercises_the_backend() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let factory = ConnectionFactory::new(temp_paths(&dir));

    factory
        .test_connection(Source::MainAccounts, Provider::Sqlite)
        .await?;
    Ok(())
}
