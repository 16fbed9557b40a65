//! SQL Server driver and connection, built on tiberius

use async_trait::async_trait;
use bex_core::{
    BexError, ColumnMeta, Connection, DatabaseDriver, DriverCapabilities, Provider,
    ProviderConfig, QueryResult, Result, Row, StatementResult, Value,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tiberius::{AuthMethod, Client, ColumnData, Config, EncryptionLevel, Row as TiberiusRow};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use uuid::Uuid;

/// SQL Server connection errors
#[derive(Debug, thiserror::Error)]
pub enum MssqlConnectionError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Tiberius error: {0}")]
    Tiberius(#[from] tiberius::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MssqlConnectionError> for BexError {
    fn from(err: MssqlConnectionError) -> Self {
        BexError::Connection(err.to_string())
    }
}

/// SQL Server database driver
pub struct MssqlDriver;

impl MssqlDriver {
    /// Create a new SQL Server driver instance
    pub fn new() -> Self {
        tracing::debug!("SQL Server driver initialized");
        Self
    }
}

impl Default for MssqlDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for MssqlDriver {
    fn provider(&self) -> Provider {
        Provider::SqlServer
    }

    fn display_name(&self) -> &'static str {
        "SQL Server"
    }

    fn default_port(&self) -> Option<u16> {
        Some(1433)
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities {
            file_based: false,
            supports_transactions: true,
            max_parameters: Some(2100),
        }
    }

    #[tracing::instrument(skip(self, config), fields(source = %config.table_name))]
    async fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn Connection>> {
        tracing::debug!("connecting to SQL Server");
        let connection = MssqlConnection::from_provider_config(config)
            .await
            .map_err(|e| {
                tracing::error!(
                    source = %config.table_name,
                    error = %e,
                    "failed to connect to SQL Server"
                );
                BexError::from(e)
            })?;
        Ok(Arc::new(connection))
    }

    #[tracing::instrument(skip(self, config))]
    async fn test_connection(&self, config: &ProviderConfig) -> Result<()> {
        let conn = self.connect(config).await?;
        conn.query("SELECT 1", &[]).await?;
        Ok(())
    }
}

/// SQL Server connection using tiberius
pub struct MssqlConnection {
    client: Mutex<Client<Compat<TcpStream>>>,
    closed: AtomicBool,
    database: Option<String>,
}

impl MssqlConnection {
    /// Connect to a SQL Server instance.
    ///
    /// With no credentials, integrated authentication is used — which is
    /// only available on Windows; elsewhere the call returns an
    /// authentication error.
    #[tracing::instrument(skip(password))]
    pub async fn connect(
        host: &str,
        port: u16,
        database: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        trust_cert: bool,
    ) -> std::result::Result<Self, MssqlConnectionError> {
        tracing::debug!("connecting to SQL Server at {}:{}", host, port);

        let mut config = Config::new();
        config.host(host);
        config.port(port);

        if let Some(db) = database {
            config.database(db);
        }

        if trust_cert {
            config.trust_cert();
        }

        config.encryption(EncryptionLevel::Required);

        match (username, password) {
            (Some(user), Some(pass)) => {
                config.authentication(AuthMethod::sql_server(user, pass));
            }
            (Some(user), None) => {
                config.authentication(AuthMethod::sql_server(user, ""));
            }
            (None, _) => {
                #[cfg(windows)]
                {
                    config.authentication(AuthMethod::Integrated);
                }
                #[cfg(not(windows))]
                {
                    return Err(MssqlConnectionError::AuthenticationFailed(
                        "Integrated authentication is only supported on Windows".to_string(),
                    ));
                }
            }
        }

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| MssqlConnectionError::ConnectionFailed(e.to_string()))?;

        tcp.set_nodelay(true)?;
        let compat_stream = tcp.compat_write();

        let client = Client::connect(config, compat_stream)
            .await
            .map_err(|e| MssqlConnectionError::ConnectionFailed(e.to_string()))?;

        tracing::debug!("connected to SQL Server");

        Ok(Self {
            client: Mutex::new(client),
            closed: AtomicBool::new(false),
            database: database.map(String::from),
        })
    }

    /// Connect using a resolved provider configuration: the local default
    /// instance, trusted, with the database named after the data file.
    pub async fn from_provider_config(
        config: &ProviderConfig,
    ) -> std::result::Result<Self, MssqlConnectionError> {
        let database = std::path::Path::new(&config.data_path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());

        Self::connect("localhost", 1433, database.as_deref(), None, None, true).await
    }

    fn ensure_not_closed(&self) -> std::result::Result<(), BexError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BexError::Connection("Connection is closed".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Connection for MssqlConnection {
    fn driver_name(&self) -> &str {
        "mssql"
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult> {
        self.ensure_not_closed()?;
        let start = std::time::Instant::now();

        let mut client = self.client.lock().await;

        let result = if params.is_empty() {
            client.execute(sql, &[]).await
        } else {
            let tiberius_params = values_to_tiberius_params(params);
            let param_refs: Vec<&dyn tiberius::ToSql> = tiberius_params
                .iter()
                .map(|p| p as &dyn tiberius::ToSql)
                .collect();
            client.execute(sql, &param_refs[..]).await
        };

        match result {
            Ok(exec_result) => {
                let affected_rows = exec_result.rows_affected().iter().sum::<u64>();
                tracing::debug!(
                    affected_rows = affected_rows,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "execute completed"
                );
                Ok(StatementResult { affected_rows })
            }
            Err(e) => {
                tracing::error!(error = %e, "execute failed");
                Err(BexError::Query(e.to_string()))
            }
        }
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.ensure_not_closed()?;
        let start = std::time::Instant::now();

        let mut client = self.client.lock().await;

        let stream = if params.is_empty() {
            client.query(sql, &[]).await
        } else {
            let tiberius_params = values_to_tiberius_params(params);
            let param_refs: Vec<&dyn tiberius::ToSql> = tiberius_params
                .iter()
                .map(|p| p as &dyn tiberius::ToSql)
                .collect();
            client.query(sql, &param_refs[..]).await
        };

        match stream {
            Ok(query_stream) => {
                let tib_rows = query_stream
                    .into_first_result()
                    .await
                    .map_err(|e| BexError::Query(e.to_string()))?;

                let columns: Vec<ColumnMeta> = tib_rows
                    .first()
                    .map(|first_row| {
                        first_row
                            .columns()
                            .iter()
                            .enumerate()
                            .map(|(idx, col)| ColumnMeta {
                                name: col.name().to_string(),
                                data_type: format!("{:?}", col.column_type()),
                                nullable: true,
                                ordinal: idx,
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                let column_names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
                let mut rows: Vec<Row> = Vec::new();
                for tib_row in tib_rows {
                    let values = tiberius_row_to_values(tib_row);
                    rows.push(Row::new(column_names.clone(), values));
                }

                let execution_time_ms = start.elapsed().as_millis() as u64;
                tracing::debug!(
                    row_count = rows.len(),
                    duration_ms = execution_time_ms,
                    "query completed"
                );

                Ok(QueryResult {
                    id: Uuid::new_v4(),
                    columns,
                    rows,
                    affected_rows: 0,
                    execution_time_ms,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "query failed");
                Err(BexError::Query(e.to_string()))
            }
        }
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        tracing::debug!("SQL Server connection closed");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for MssqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MssqlConnection")
            .field("database", &self.database)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

/// Convert tiberius ColumnData to a BEX value
fn column_data_to_value(col_data: ColumnData<'static>) -> Value {
    match col_data {
        ColumnData::Bit(v) => v.map(Value::Bool).unwrap_or(Value::Null),
        ColumnData::U8(v) => v.map(|n| Value::Int64(n as i64)).unwrap_or(Value::Null),
        ColumnData::I16(v) => v.map(|n| Value::Int64(n as i64)).unwrap_or(Value::Null),
        ColumnData::I32(v) => v.map(|n| Value::Int64(n as i64)).unwrap_or(Value::Null),
        ColumnData::I64(v) => v.map(Value::Int64).unwrap_or(Value::Null),
        ColumnData::F32(v) => v.map(|n| Value::Float64(n as f64)).unwrap_or(Value::Null),
        ColumnData::F64(v) => v.map(Value::Float64).unwrap_or(Value::Null),
        ColumnData::String(v) => v
            .map(|s| Value::String(s.into_owned()))
            .unwrap_or(Value::Null),
        ColumnData::Guid(v) => v.map(Value::Uuid).unwrap_or(Value::Null),
        ColumnData::Binary(v) => v
            .map(|b| Value::Bytes(b.into_owned()))
            .unwrap_or(Value::Null),
        ColumnData::Numeric(v) => v
            .map(|n| Value::Decimal(n.to_string()))
            .unwrap_or(Value::Null),
        ColumnData::DateTime(v) => v
            .map(|dt| {
                Value::DateTime(chrono::NaiveDateTime::new(
                    chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default()
                        + chrono::Duration::days(dt.days() as i64),
                    chrono::NaiveTime::from_num_seconds_from_midnight_opt(
                        (dt.seconds_fragments() as f64 / 300.0) as u32,
                        0,
                    )
                    .unwrap_or_default(),
                ))
            })
            .unwrap_or(Value::Null),
        ColumnData::SmallDateTime(v) => v
            .map(|dt| {
                Value::DateTime(chrono::NaiveDateTime::new(
                    chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default()
                        + chrono::Duration::days(dt.days() as i64),
                    chrono::NaiveTime::from_num_seconds_from_midnight_opt(
                        (dt.seconds_fragments() as u32) * 60,
                        0,
                    )
                    .unwrap_or_default(),
                ))
            })
            .unwrap_or(Value::Null),
        ColumnData::DateTime2(v) => v
            .map(|dt| {
                let date = dt.date();
                let time = dt.time();
                Value::DateTime(chrono::NaiveDateTime::new(
                    chrono::NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
                        + chrono::Duration::days(date.days() as i64),
                    chrono::NaiveTime::from_num_seconds_from_midnight_opt(
                        (time.increments() / 10_000_000) as u32,
                        ((time.increments() % 10_000_000) * 100) as u32,
                    )
                    .unwrap_or_default(),
                ))
            })
            .unwrap_or(Value::Null),
        ColumnData::DateTimeOffset(v) => v
            .map(|dto| {
                let dt2 = dto.datetime2();
                let date = dt2.date();
                let time = dt2.time();
                Value::DateTime(chrono::NaiveDateTime::new(
                    chrono::NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
                        + chrono::Duration::days(date.days() as i64),
                    chrono::NaiveTime::from_num_seconds_from_midnight_opt(
                        (time.increments() / 10_000_000) as u32,
                        ((time.increments() % 10_000_000) * 100) as u32,
                    )
                    .unwrap_or_default(),
                ))
            })
            .unwrap_or(Value::Null),
        ColumnData::Date(v) => v
            .map(|d| {
                Value::Date(
                    chrono::NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
                        + chrono::Duration::days(d.days() as i64),
                )
            })
            .unwrap_or(Value::Null),
        ColumnData::Time(v) => v
            .map(|t| {
                let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(
                    (t.increments() / 10_000_000) as u32,
                    ((t.increments() % 10_000_000) * 100) as u32,
                )
                .unwrap_or_default();
                Value::String(time.to_string())
            })
            .unwrap_or(Value::Null),
        ColumnData::Xml(v) => v
            .map(|x| Value::String(x.into_owned().into_string()))
            .unwrap_or(Value::Null),
    }
}

/// Convert a tiberius row to values by consuming the row
fn tiberius_row_to_values(row: TiberiusRow) -> Vec<Value> {
    row.into_iter().map(column_data_to_value).collect()
}

/// Owned parameter container implementing tiberius's `ToSql`
#[derive(Debug)]
enum TiberiusParam {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
}

impl tiberius::ToSql for TiberiusParam {
    fn to_sql(&self) -> ColumnData<'_> {
        match self {
            TiberiusParam::Null => ColumnData::I32(None),
            TiberiusParam::Bool(v) => ColumnData::Bit(Some(*v)),
            TiberiusParam::I64(v) => ColumnData::I64(Some(*v)),
            TiberiusParam::F64(v) => ColumnData::F64(Some(*v)),
            TiberiusParam::String(v) => {
                ColumnData::String(Some(std::borrow::Cow::Borrowed(v.as_str())))
            }
            TiberiusParam::Bytes(v) => {
                ColumnData::Binary(Some(std::borrow::Cow::Borrowed(v.as_slice())))
            }
            TiberiusParam::Uuid(v) => ColumnData::Guid(Some(*v)),
        }
    }
}

fn values_to_tiberius_params(values: &[Value]) -> Vec<TiberiusParam> {
    values
        .iter()
        .map(|v| match v {
            Value::Null => TiberiusParam::Null,
            Value::Bool(b) => TiberiusParam::Bool(*b),
            Value::Int64(i) => TiberiusParam::I64(*i),
            Value::Float64(f) => TiberiusParam::F64(*f),
            Value::Decimal(d) => TiberiusParam::String(d.clone()),
            Value::String(s) => TiberiusParam::String(s.clone()),
            Value::Bytes(b) => TiberiusParam::Bytes(b.clone()),
            Value::Date(d) => TiberiusParam::String(d.to_string()),
            Value::DateTime(dt) => TiberiusParam::String(dt.to_string()),
            Value::Uuid(u) => TiberiusParam::Uuid(*u),
            Value::Json(j) => TiberiusParam::String(j.to_string()),
        })
        .collect()
}
