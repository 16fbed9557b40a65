//! BEX Query - SQL text layer
//!
//! Locates and loads externally stored `.sql` command files, synthesizes
//! clause fragments from column/value pairs, and materializes full-table
//! frames through the driver layer.

mod clause;
mod frame;
mod script;

pub use clause::{BoundClause, ClauseBuilder, ClauseError};
pub use frame::FrameGenerator;
pub use script::ScriptLocator;

/// Re-export commonly used types from bex-core
pub use bex_core::{
    BexError, CommandKind, ParamStyle, PathConfig, Provider, QueryResult, Result, Row, Source,
    Value,
};
