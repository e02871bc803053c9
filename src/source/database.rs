//! SQLite financial-year table source
//!
//! Each financial-year code maps to a table `<prefix><code>`. A table that
//! cannot be read is reported in the load stats and the rest still load.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;

use crate::core::{Cell, RecordTable, SourceData, TableOutcome, TableStat};
use crate::error::AppError;
use crate::source::{Capabilities, Source, SourceLoad};

/// SQLite data source
pub(crate) struct DatabaseSource {
    path: PathBuf,
    table_prefix: String,
    /// Validated financial-year codes, in load order
    financial_years: Vec<String>,
}

impl DatabaseSource {
    pub(crate) fn new(
        path: impl Into<PathBuf>,
        table_prefix: impl Into<String>,
        financial_years: Vec<String>,
    ) -> Self {
        Self {
            path: path.into(),
            table_prefix: table_prefix.into(),
            financial_years,
        }
    }

    fn table_names(&self) -> Vec<String> {
        self.financial_years
            .iter()
            .map(|code| format!("{}{}", self.table_prefix, code))
            .collect()
    }
}

impl Source for DatabaseSource {
    fn name(&self) -> &'static str {
        "db"
    }

    fn display_name(&self) -> &'static str {
        "Database"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            dated_days: true,
            table_stats: true,
        }
    }

    fn load(&self) -> Result<SourceLoad, AppError> {
        if !self.path.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", self.path.display()),
            )));
        }
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut tables = Vec::new();
        let mut table_stats = Vec::new();
        for name in self.table_names() {
            match read_table(&conn, &name) {
                Ok(table) => {
                    tracing::debug!(table = %name, rows = table.records.len(), "read table");
                    table_stats.push(TableStat {
                        table: name,
                        outcome: TableOutcome::Rows(table.records.len()),
                    });
                    tables.push(table);
                }
                Err(e) => {
                    tracing::warn!("Failed to read table {}: {}", name, e);
                    table_stats.push(TableStat {
                        table: name,
                        outcome: TableOutcome::Error(e.to_string()),
                    });
                }
            }
        }

        Ok(SourceLoad {
            data: SourceData::Tables(tables),
            table_stats,
        })
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn read_table(conn: &Connection, name: &str) -> rusqlite::Result<RecordTable> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_identifier(name)))?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let records = stmt
        .query_map([], |row| {
            (0..width)
                .map(|idx| row.get_ref(idx).map(value_to_cell))
                .collect::<rusqlite::Result<Vec<Cell>>>()
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(RecordTable {
        name: name.to_string(),
        columns,
        records,
    })
}

fn value_to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Cell::Empty,
        ValueRef::Integer(i) => Cell::Number(i as f64),
        ValueRef::Real(f) => Cell::Number(f),
        ValueRef::Text(bytes) => Cell::from(String::from_utf8_lossy(bytes).as_ref()),
    }
}
