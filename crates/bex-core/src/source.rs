//! Logical dataset identities

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::BexError;

/// A budget-execution dataset. Each variant names one reference table
/// carried by every provider backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Appropriations,
    BudgetAuthority,
    BudgetFunctions,
    BudgetObjectClasses,
    BudgetOutlays,
    BudgetaryResourceExecution,
    FederalHolidays,
    FiscalYears,
    MainAccounts,
    Partitions,
    ProductCategories,
    Regulations,
    ResourceLines,
    TreasurySymbols,
}

impl Source {
    /// Every known dataset, in catalog order.
    pub const ALL: &'static [Source] = &[
        Source::Appropriations,
        Source::BudgetAuthority,
        Source::BudgetFunctions,
        Source::BudgetObjectClasses,
        Source::BudgetOutlays,
        Source::BudgetaryResourceExecution,
        Source::FederalHolidays,
        Source::FiscalYears,
        Source::MainAccounts,
        Source::Partitions,
        Source::ProductCategories,
        Source::Regulations,
        Source::ResourceLines,
        Source::TreasurySymbols,
    ];

    /// The table identity as it appears in every backend and in the
    /// `.sql` script file names.
    pub fn table_name(&self) -> &'static str {
        match self {
            Source::Appropriations => "Appropriations",
            Source::BudgetAuthority => "BudgetAuthority",
            Source::BudgetFunctions => "BudgetFunctions",
            Source::BudgetObjectClasses => "BudgetObjectClasses",
            Source::BudgetOutlays => "BudgetOutlays",
            Source::BudgetaryResourceExecution => "BudgetaryResourceExecution",
            Source::FederalHolidays => "FederalHolidays",
            Source::FiscalYears => "FiscalYears",
            Source::MainAccounts => "MainAccounts",
            Source::Partitions => "Partitions",
            Source::ProductCategories => "ProductCategories",
            Source::Regulations => "Regulations",
            Source::ResourceLines => "ResourceLines",
            Source::TreasurySymbols => "TreasurySymbols",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Source {
    type Err = BexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .iter()
            .copied()
            .find(|source| source.table_name() == s)
            .ok_or_else(|| BexError::Resolution(format!("Unknown dataset: {}", s)))
    }
}
