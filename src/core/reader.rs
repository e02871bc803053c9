//! Tabular source reader
//!
//! Turns decoded spreadsheet sheets and database result sets into
//! [`PeriodBatch`]es. Structural defects skip the affected period only.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::consts::{DATE_FORMAT, DEFAULT_CUSTOMER_COLUMN, DEFAULT_PRODUCT_COLUMN};
use crate::core::inference::{CUSTOMER_COL, PRODUCT_COL, TotalColumnPolicy, infer_data_columns};
use crate::core::period::{label_period, month_label};
use crate::core::types::{Cell, PeriodBatch, RawSheet, RecordTable, RowFilter, SalesRow};
use crate::error::PeriodSkip;

static DATE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// How database tables are cut into periods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SplitMode {
    /// One period per calendar month of each table
    #[default]
    Month,
    /// One period per table
    Table,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordOptions {
    pub(crate) product_column: String,
    pub(crate) customer_column: String,
    /// Keep only date columns of this calendar month (1-12)
    pub(crate) month: Option<u32>,
    pub(crate) split: SplitMode,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            product_column: DEFAULT_PRODUCT_COLUMN.to_string(),
            customer_column: DEFAULT_CUSTOMER_COLUMN.to_string(),
            month: None,
            split: SplitMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ReadOptions {
    pub(crate) total_column: TotalColumnPolicy,
    pub(crate) records: Option<RecordOptions>,
    pub(crate) filter: RowFilter,
}

/// Materialized input of one invocation
#[derive(Debug, Clone)]
pub(crate) enum SourceData {
    Sheets(Vec<RawSheet>),
    Tables(Vec<RecordTable>),
}

#[derive(Debug, Default)]
pub(crate) struct ReadResult {
    pub(crate) batches: Vec<PeriodBatch>,
    /// Source unit name and why it was skipped
    pub(crate) skipped: Vec<(String, PeriodSkip)>,
}

pub(crate) fn read(data: &SourceData, opts: &ReadOptions) -> ReadResult {
    let mut result = ReadResult::default();
    match data {
        SourceData::Sheets(sheets) => {
            for sheet in sheets {
                match read_sheet(sheet, opts.total_column, &opts.filter) {
                    Ok(batch) => result.batches.push(batch),
                    Err(skip) => {
                        tracing::warn!("Sheet \"{}\" {}. Skipping.", sheet.name, skip);
                        result.skipped.push((sheet.name.clone(), skip));
                    }
                }
            }
        }
        SourceData::Tables(tables) => {
            let record_opts = opts.records.clone().unwrap_or_default();
            for table in tables {
                match read_table(table, &record_opts, &opts.filter) {
                    Ok(batches) => result.batches.extend(batches),
                    Err(skip) => {
                        tracing::warn!("Table \"{}\" {}. Skipping.", table.name, skip);
                        result.skipped.push((table.name.clone(), skip));
                    }
                }
            }
        }
    }
    result
}

pub(crate) fn read_sheet(
    sheet: &RawSheet,
    policy: TotalColumnPolicy,
    filter: &RowFilter,
) -> Result<PeriodBatch, PeriodSkip> {
    if sheet.rows.len() < 2 {
        return Err(PeriodSkip::TooFewRows {
            rows: sheet.rows.len(),
        });
    }

    let header = &sheet.rows[0];
    let data_rows = &sheet.rows[1..];
    let columns = infer_data_columns(header, data_rows, policy)?;

    let mut rows = Vec::new();
    let mut dropped_rows = 0;
    for raw in data_rows {
        // Too short to carry product, customer and a value
        if raw.len() < 3 {
            continue;
        }
        let daily_values: Vec<f64> = (columns.first..=columns.last)
            .map(|col| raw.get(col).map_or(0.0, Cell::to_number))
            .collect();
        let product = raw[PRODUCT_COL].to_text();
        let customer = raw[CUSTOMER_COL].to_text();
        match SalesRow::new(&product, &customer, daily_values) {
            Some(row) if filter.contains(&row) => rows.push(row),
            Some(_) => {}
            None => dropped_rows += 1,
        }
    }

    Ok(PeriodBatch {
        key: sheet.name.clone(),
        display_label: label_period(&sheet.name, &sheet.rows),
        day_labels: (1..=columns.width()).map(|d| d.to_string()).collect(),
        rows,
        dropped_rows,
    })
}

/// Column index and date of every `YYYY-MM-DD` column, oldest first
fn date_columns(columns: &[String], month: Option<u32>) -> Vec<(usize, NaiveDate)> {
    let mut dated: Vec<(usize, NaiveDate)> = columns
        .iter()
        .enumerate()
        .filter(|(_, name)| DATE_COLUMN.is_match(name))
        .filter_map(|(idx, name)| {
            NaiveDate::parse_from_str(name, DATE_FORMAT)
                .ok()
                .map(|date| (idx, date))
        })
        .filter(|(_, date)| month.is_none_or(|m| date.month() == m))
        .collect();
    dated.sort_by_key(|(_, date)| *date);
    dated
}

fn column_index(table: &RecordTable, name: &str) -> Result<usize, PeriodSkip> {
    table
        .columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| PeriodSkip::MissingColumn {
            column: name.to_string(),
        })
}

pub(crate) fn read_table(
    table: &RecordTable,
    opts: &RecordOptions,
    filter: &RowFilter,
) -> Result<Vec<PeriodBatch>, PeriodSkip> {
    if table.records.is_empty() {
        return Err(PeriodSkip::EmptyTable);
    }
    let product_idx = column_index(table, &opts.product_column)?;
    let customer_idx = column_index(table, &opts.customer_column)?;

    let dated = date_columns(&table.columns, opts.month);
    if dated.is_empty() {
        return Err(PeriodSkip::NoDateColumns);
    }

    // Group date columns into the requested period slices
    let mut slices: BTreeMap<(i32, u32), Vec<(usize, NaiveDate)>> = BTreeMap::new();
    for (idx, date) in dated {
        let slice_key = match opts.split {
            SplitMode::Month => (date.year(), date.month()),
            SplitMode::Table => (0, 0),
        };
        slices.entry(slice_key).or_default().push((idx, date));
    }

    let batches = slices
        .into_iter()
        .map(|((year, month), cols)| {
            let (key, display_label) = match opts.split {
                SplitMode::Month => (
                    format!("{}:{:04}-{:02}", table.name, year, month),
                    month_label(year, month),
                ),
                SplitMode::Table => (table.name.clone(), table.name.clone()),
            };

            let mut rows = Vec::new();
            let mut dropped_rows = 0;
            for record in &table.records {
                let text_at = |idx: usize| record.get(idx).map(Cell::to_text).unwrap_or_default();
                let daily_values = cols
                    .iter()
                    .map(|(idx, _)| record.get(*idx).map_or(0.0, Cell::to_number))
                    .collect();
                match SalesRow::new(&text_at(product_idx), &text_at(customer_idx), daily_values) {
                    Some(row) if filter.contains(&row) => rows.push(row),
                    Some(_) => {}
                    None => dropped_rows += 1,
                }
            }

            PeriodBatch {
                key,
                display_label,
                day_labels: cols
                    .iter()
                    .map(|(_, date)| date.format(DATE_FORMAT).to_string())
                    .collect(),
                rows,
                dropped_rows,
            }
        })
        .collect();

    Ok(batches)
}
