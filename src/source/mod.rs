//! Data source abstraction layer
//!
//! Each input kind (spreadsheet workbook, SQLite database) implements the
//! Source trait and hands back decoded rows for the core reader.

pub(crate) mod database;
pub(crate) mod loader;
pub(crate) mod spreadsheet;

use crate::core::{SourceData, TableStat};
use crate::error::AppError;

/// Capabilities that a data source may support
#[derive(Debug, Clone, Default)]
pub(crate) struct Capabilities {
    /// Day axis carries calendar dates instead of day numbers
    pub(crate) dated_days: bool,
    /// Reports per-table load outcomes
    pub(crate) table_stats: bool,
}

/// Everything a source produced in one load
#[derive(Debug)]
pub(crate) struct SourceLoad {
    pub(crate) data: SourceData,
    pub(crate) table_stats: Vec<TableStat>,
}

/// Data source trait - implemented by each input kind
pub(crate) trait Source: Send + Sync {
    /// Unique name for this source (used in CLI subcommands)
    fn name(&self) -> &'static str;

    /// Display name for output
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Capabilities of this source
    fn capabilities(&self) -> Capabilities;

    /// Read the whole input. Malformed input fails the load.
    fn load(&self) -> Result<SourceLoad, AppError>;
}

pub(crate) use database::DatabaseSource;
pub(crate) use loader::load_periods;
pub(crate) use spreadsheet::SpreadsheetSource;
