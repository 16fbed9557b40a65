//! BEX Drivers - Database driver implementations
//!
//! This crate provides concrete implementations of the driver traits
//! defined in `bex-core`, a registry of the built-in drivers, and the
//! connection factory that dispatches `(source, provider)` pairs to them.

pub mod access;
mod factory;
pub mod mssql;
mod registry;
pub mod sqlite;

pub use factory::ConnectionFactory;
pub use registry::DriverRegistry;

/// Re-export commonly used types from bex-core
pub use bex_core::{
    BexError, ColumnMeta, Connection, DatabaseDriver, DriverCapabilities, PathConfig, Provider,
    ProviderConfig, QueryResult, Result, Row, Source, StatementResult, Value,
};
