//! SQL command categories and placeholder styles

use serde::{Deserialize, Serialize};

/// Category of SQL operation. Doubles as the storage sub-folder key for
/// externally shipped `.sql` command files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    SelectAll,
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
}

impl CommandKind {
    /// Folder segment under a provider's script root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            CommandKind::SelectAll => "SELECTALL",
            CommandKind::Select => "SELECT",
            CommandKind::Insert => "INSERT",
            CommandKind::Update => "UPDATE",
            CommandKind::Delete => "DELETE",
            CommandKind::Create => "CREATE",
            CommandKind::Alter => "ALTER",
            CommandKind::Drop => "DROP",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Placeholder family for parameterized SQL. Covers the styles the two
/// client stacks accept: `?` for SQLite positional binding, `@name` for
/// SQL Server, with numeric and colon-named forms for callers that
/// rewrite text themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamStyle {
    /// `?`
    Qmark,
    /// `$1`, `$2`, ...
    Numeric,
    /// `:name`
    Named,
    /// `@name`
    At,
}

impl ParamStyle {
    /// Render the placeholder for a parameter. `index` is 1-based;
    /// `name` is the column identifier for the named styles.
    pub fn placeholder(&self, index: usize, name: &str) -> String {
        match self {
            ParamStyle::Qmark => "?".to_string(),
            ParamStyle::Numeric => format!("${}", index),
            ParamStyle::Named => format!(":{}", name),
            ParamStyle::At => format!("@{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_render_per_style() {
        assert_eq!(ParamStyle::Qmark.placeholder(1, "id"), "?");
        assert_eq!(ParamStyle::Numeric.placeholder(2, "id"), "$2");
        assert_eq!(ParamStyle::Named.placeholder(1, "id"), ":id");
        assert_eq!(ParamStyle::At.placeholder(1, "id"), "@id");
    }
}
