//! CLI subcommand definitions
//!
//! Defines the input kinds and the reports available for each.

use std::path::PathBuf;

use clap::Subcommand;

use super::args::Split;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Read a workbook (xlsx, xlsm, xlsb, xls, ods) or csv file, one period per sheet
    Sheet {
        /// Spreadsheet file
        file: PathBuf,
        #[command(subcommand)]
        report: Option<ReportCommand>,
    },
    /// Read financial-year tables from a SQLite database
    Db {
        /// SQLite database file
        file: PathBuf,

        /// Financial-year code such as 24 (repeatable, default: all configured years)
        #[arg(long = "fy", value_name = "CODE")]
        financial_years: Vec<String>,

        /// Only keep date columns of this month (01-12)
        #[arg(long, value_name = "MM")]
        month: Option<String>,

        /// How tables are cut into periods
        #[arg(long, value_enum)]
        split: Option<Split>,

        /// Table name prefix (default: MPL)
        #[arg(long, value_name = "PREFIX")]
        table_prefix: Option<String>,

        /// Product column name (default: "Item Name")
        #[arg(long, value_name = "COLUMN")]
        product_column: Option<String>,

        /// Customer column name (default: "Customer Code")
        #[arg(long, value_name = "COLUMN")]
        customer_column: Option<String>,

        #[command(subcommand)]
        report: Option<ReportCommand>,
    },
}

/// Report to render for the loaded periods
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ReportCommand {
    /// Headline figures of the selected period (default)
    #[default]
    Summary,
    /// Every period with its totals, in the chosen order
    Periods,
    /// Daily totals of the selected period
    Daily,
    /// Products with their share of the period total
    Products,
    /// Top customers with their distinct product counts
    Customers,
    /// Products bought by the most customers
    Skus,
    /// Total sales per period
    Trend,
}

impl Commands {
    pub(crate) fn report(&self) -> ReportCommand {
        match self {
            Commands::Sheet { report, .. } | Commands::Db { report, .. } => {
                report.unwrap_or_default()
            }
        }
    }
}
