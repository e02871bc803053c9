//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::Config;
use crate::core::{SortMode, SplitMode, TotalColumnPolicy};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PeriodOrder {
    /// April to March, periods without a month label dropped (default)
    #[default]
    FinancialYear,
    /// Input order, every period kept
    Original,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum TotalColumn {
    /// Drop the last column if its header says total, or the sheet has 4+ columns (default)
    #[default]
    Heuristic,
    /// Drop the last column only if its header says total
    Header,
    /// Keep every column
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Split {
    /// One period per calendar month (default)
    #[default]
    Month,
    /// One period per financial-year table
    Table,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<PeriodOrder> for SortMode {
    fn from(order: PeriodOrder) -> Self {
        match order {
            PeriodOrder::FinancialYear => SortMode::FinancialYear,
            PeriodOrder::Original => SortMode::Original,
        }
    }
}

impl From<TotalColumn> for TotalColumnPolicy {
    fn from(total: TotalColumn) -> Self {
        match total {
            TotalColumn::Heuristic => TotalColumnPolicy::Heuristic,
            TotalColumn::Header => TotalColumnPolicy::Header,
            TotalColumn::Never => TotalColumnPolicy::Never,
        }
    }
}

impl From<Split> for SplitMode {
    fn from(split: Split) -> Self {
        match split {
            Split::Month => SplitMode::Month,
            Split::Table => SplitMode::Table,
        }
    }
}

#[derive(Parser)]
#[command(name = "pipesales")]
#[command(about = "Sales rollups for steel-pipe spreadsheets and databases", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Period to report on, by key or label (default: first period)
    #[arg(short, long, global = true, value_name = "PERIOD")]
    pub(crate) period: Option<String>,

    /// Period ordering
    #[arg(short, long, global = true, value_enum)]
    pub(crate) order: Option<PeriodOrder>,

    /// Trailing total column handling for spreadsheets
    #[arg(long, global = true, value_enum)]
    pub(crate) total_column: Option<TotalColumn>,

    /// Number of entries in ranked reports
    #[arg(short = 'n', long, global = true, value_name = "N")]
    pub(crate) top: Option<usize>,

    /// Only include rows of this customer
    #[arg(long, global = true, value_name = "CODE")]
    pub(crate) customer: Option<String>,

    /// Only include rows of this product
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) product: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) csv: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (show processing details)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Compact output (shorter amounts)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.color == ColorMode::Auto
            && let Some(color) = config.color
        {
            self.color = color;
        }

        if self.order.is_none() {
            self.order = config.order;
        }
        if self.total_column.is_none() {
            self.total_column = config.total_column;
        }
        if self.top.is_none() {
            self.top = config.top;
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        if let Commands::Db {
            financial_years,
            split,
            table_prefix,
            product_column,
            customer_column,
            ..
        } = &mut self.command
        {
            if financial_years.is_empty()
                && let Some(years) = &config.financial_years
            {
                financial_years.clone_from(years);
            }
            if split.is_none() {
                *split = config.split;
            }
            if table_prefix.is_none() {
                table_prefix.clone_from(&config.table_prefix);
            }
            if product_column.is_none() {
                product_column.clone_from(&config.product_column);
            }
            if customer_column.is_none() {
                customer_column.clone_from(&config.customer_column);
            }
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        self.color_for(std::io::stdout().is_terminal())
    }

    /// Color decision for log lines on stderr
    pub(crate) fn use_log_color(&self) -> bool {
        self.color_for(std::io::stderr().is_terminal())
    }

    fn color_for(&self, is_terminal: bool) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal,
        }
    }

    pub(crate) fn sort_mode(&self) -> SortMode {
        self.order.unwrap_or_default().into()
    }

    pub(crate) fn total_column_policy(&self) -> TotalColumnPolicy {
        self.total_column.unwrap_or_default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportCommand;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pipesales").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sheet_with_report_and_global_flags() {
        let cli = parse(&["sheet", "sales.xlsx", "--json", "--order", "original", "daily"]);
        assert!(cli.json);
        assert_eq!(cli.order, Some(PeriodOrder::Original));
        match cli.command {
            Commands::Sheet { file, report } => {
                assert_eq!(file.to_str(), Some("sales.xlsx"));
                assert_eq!(report, Some(ReportCommand::Daily));
            }
            Commands::Db { .. } => panic!("expected sheet"),
        }
    }

    #[test]
    fn db_collects_repeated_financial_years() {
        let cli = parse(&["db", "sales.db", "--fy", "23", "--fy", "24", "--split", "table"]);
        match cli.command {
            Commands::Db {
                financial_years,
                split,
                report,
                ..
            } => {
                assert_eq!(financial_years, vec!["23", "24"]);
                assert_eq!(split, Some(Split::Table));
                assert_eq!(report, None);
            }
            Commands::Sheet { .. } => panic!("expected db"),
        }
    }

    #[test]
    fn json_and_csv_conflict() {
        let result = Cli::try_parse_from(["pipesales", "sheet", "a.csv", "--json", "--csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_fills_only_unset_values() {
        let config: Config = toml::from_str(
            r#"
            order = "original"
            total_column = "never"
            top = 3
            compact = true
            financial_years = ["21", "22"]
            table_prefix = "SALES"
            split = "table"
            "#,
        )
        .unwrap();

        let cli = parse(&["--order", "financial-year", "db", "x.db"]).with_config(&config);
        assert_eq!(cli.order, Some(PeriodOrder::FinancialYear));
        assert_eq!(cli.total_column, Some(TotalColumn::Never));
        assert_eq!(cli.top, Some(3));
        assert!(cli.compact);
        match cli.command {
            Commands::Db {
                financial_years,
                table_prefix,
                split,
                ..
            } => {
                assert_eq!(financial_years, vec!["21", "22"]);
                assert_eq!(table_prefix.as_deref(), Some("SALES"));
                assert_eq!(split, Some(Split::Table));
            }
            Commands::Sheet { .. } => panic!("expected db"),
        }
    }

    #[test]
    fn explicit_financial_years_beat_config() {
        let config: Config = toml::from_str(r#"financial_years = ["21"]"#).unwrap();
        let cli = parse(&["db", "x.db", "--fy", "25"]).with_config(&config);
        let Commands::Db { financial_years, .. } = cli.command else {
            panic!("expected db");
        };
        assert_eq!(financial_years, vec!["25"]);
    }

    #[test]
    fn no_color_overrides_always() {
        let cli = parse(&["--color", "always", "--no-color", "sheet", "a.csv"]);
        assert!(!cli.use_color());
        assert!(!cli.use_log_color());
    }

    #[test]
    fn auto_color_follows_terminal() {
        let cli = parse(&["sheet", "a.csv"]);
        assert!(cli.color_for(true));
        assert!(!cli.color_for(false));

        let cli = parse(&["--color", "never", "sheet", "a.csv"]);
        assert!(!cli.color_for(true));
        assert!(!cli.use_log_color());

        let cli = parse(&["--color", "always", "sheet", "a.csv"]);
        assert!(cli.color_for(false));
    }
}
