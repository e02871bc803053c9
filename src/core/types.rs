//! Core data types shared across both data sources
//!
//! Spreadsheet sheets and database tables are normalized into these shapes
//! before aggregation. Every value here is owned by a single invocation.

use serde::Serialize;
use std::collections::BTreeMap;

/// A decoded cell value, as handed over by a spreadsheet or database reader
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Lenient numeric coercion: anything that is not a finite number is 0
    pub(crate) fn to_number(&self) -> f64 {
        let value = match self {
            Cell::Empty => 0.0,
            Cell::Number(n) => *n,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            Cell::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        };
        if value.is_finite() { value } else { 0.0 }
    }

    pub(crate) fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// One normalized product/customer row of a period
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SalesRow {
    pub(crate) product: String,
    pub(crate) customer: String,
    /// One value per data column, in column order
    pub(crate) daily_values: Vec<f64>,
}

impl SalesRow {
    /// Returns `None` when product or customer is blank after trimming
    pub(crate) fn new(product: &str, customer: &str, daily_values: Vec<f64>) -> Option<Self> {
        let product = product.trim();
        let customer = customer.trim();
        if product.is_empty() || customer.is_empty() {
            return None;
        }
        Some(Self {
            product: product.to_string(),
            customer: customer.to_string(),
            daily_values,
        })
    }

    pub(crate) fn total(&self) -> f64 {
        self.daily_values.iter().sum()
    }
}

/// A spreadsheet sheet decoded into rows of cells; row 0 is the header
#[derive(Debug, Clone, Default)]
pub(crate) struct RawSheet {
    pub(crate) name: String,
    pub(crate) rows: Vec<Vec<Cell>>,
}

/// A database result set: named columns and one cell per column per record
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordTable {
    pub(crate) name: String,
    pub(crate) columns: Vec<String>,
    pub(crate) records: Vec<Vec<Cell>>,
}

/// Normalized rows of one period, ready for aggregation
#[derive(Debug, Clone, Default)]
pub(crate) struct PeriodBatch {
    pub(crate) key: String,
    pub(crate) display_label: String,
    /// Axis labels for `daily_values`: day numbers or ISO dates
    pub(crate) day_labels: Vec<String>,
    pub(crate) rows: Vec<SalesRow>,
    /// Rows dropped because product or customer was blank
    pub(crate) dropped_rows: usize,
}

/// Rollups for a single period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct AggregationResult {
    /// Indexed by day-of-period, day 1 first
    pub(crate) daily_totals: Vec<f64>,
    pub(crate) product_totals: BTreeMap<String, f64>,
    pub(crate) customer_totals: BTreeMap<String, f64>,
    /// Distinct products sold to each customer
    pub(crate) sku_count_by_customer: BTreeMap<String, usize>,
    /// Distinct customers buying each product, sorted by name
    pub(crate) customers_by_product: BTreeMap<String, Vec<String>>,
    pub(crate) total_sales: f64,
    pub(crate) row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Period {
    pub(crate) key: String,
    pub(crate) display_label: String,
    pub(crate) total_sales: f64,
}

/// A period together with its aggregation
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PeriodData {
    pub(crate) period: Period,
    pub(crate) day_labels: Vec<String>,
    pub(crate) result: AggregationResult,
}

/// A named value taken from a totals map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Ranked {
    pub(crate) name: String,
    pub(crate) value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct Summary {
    pub(crate) total_sales: f64,
    pub(crate) average_daily_sales: f64,
    pub(crate) top_customer: Option<Ranked>,
    pub(crate) top_product: Option<Ranked>,
    pub(crate) active_customers: usize,
    pub(crate) active_products: usize,
}

/// Row filter applied before aggregation
#[derive(Debug, Clone, Default)]
pub(crate) struct RowFilter {
    pub(crate) customer: Option<String>,
    pub(crate) product: Option<String>,
}

impl RowFilter {
    pub(crate) fn new(customer: Option<&str>, product: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            customer: clean(customer),
            product: clean(product),
        }
    }

    pub(crate) fn contains(&self, row: &SalesRow) -> bool {
        if let Some(c) = &self.customer
            && row.customer != *c
        {
            return false;
        }
        if let Some(p) = &self.product
            && row.product != *p
        {
            return false;
        }
        true
    }
}

/// Per-table outcome of a database load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TableOutcome {
    Rows(usize),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TableStat {
    pub(crate) table: String,
    pub(crate) outcome: TableOutcome,
}

/// Loading result with statistics
#[derive(Debug, Default)]
pub(crate) struct LoadResult {
    /// Periods in the requested order
    pub(crate) periods: Vec<PeriodData>,
    pub(crate) financial_year: Option<String>,
    pub(crate) skipped_periods: usize,
    pub(crate) dropped_rows: usize,
    pub(crate) valid_rows: usize,
    pub(crate) table_stats: Vec<TableStat>,
    /// Processing time in milliseconds
    pub(crate) elapsed_ms: f64,
}
