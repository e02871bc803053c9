use crate::cli::{Cli, Commands};
use crate::consts::{
    DEFAULT_CUSTOMER_COLUMN, DEFAULT_FINANCIAL_YEARS, DEFAULT_PRODUCT_COLUMN, DEFAULT_TABLE_PREFIX,
};
use crate::core::{PeriodData, ReadOptions, RecordOptions, RowFilter};
use crate::error::AppError;
use crate::output::{
    NumberFormat, ReportView, TableOptions, output_report_csv, output_report_json,
    print_report_table,
};
use crate::source::{DatabaseSource, Source, SpreadsheetSource, load_periods};
use crate::utils::{parse_financial_years, parse_month_code};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) number_format: NumberFormat,
}

/// Build the source and reader options for the invoked command
fn prepare(cli: &Cli) -> Result<(Box<dyn Source>, ReadOptions), AppError> {
    let filter = RowFilter::new(cli.customer.as_deref(), cli.product.as_deref());
    let total_column = cli.total_column_policy();

    match &cli.command {
        Commands::Sheet { file, .. } => {
            let source: Box<dyn Source> = Box::new(SpreadsheetSource::new(file));
            Ok((
                source,
                ReadOptions {
                    total_column,
                    records: None,
                    filter,
                },
            ))
        }
        Commands::Db {
            file,
            financial_years,
            month,
            split,
            table_prefix,
            product_column,
            customer_column,
            ..
        } => {
            let codes = if financial_years.is_empty() {
                DEFAULT_FINANCIAL_YEARS
                    .iter()
                    .map(|c| (*c).to_string())
                    .collect()
            } else {
                financial_years.clone()
            };
            let codes = parse_financial_years(&codes)?;
            let month = month.as_deref().map(parse_month_code).transpose()?;

            let source: Box<dyn Source> = Box::new(DatabaseSource::new(
                file,
                table_prefix.as_deref().unwrap_or(DEFAULT_TABLE_PREFIX),
                codes,
            ));
            let records = RecordOptions {
                product_column: product_column
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PRODUCT_COLUMN.to_string()),
                customer_column: customer_column
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CUSTOMER_COLUMN.to_string()),
                month,
                split: split.unwrap_or_default().into(),
            };
            Ok((
                source,
                ReadOptions {
                    total_column,
                    records: Some(records),
                    filter,
                },
            ))
        }
    }
}

/// Find a period by exact key, then by case-insensitive label.
/// Without a query the first period in the chosen order is used.
pub(crate) fn select_period<'a>(
    periods: &'a [PeriodData],
    query: Option<&str>,
) -> Result<&'a PeriodData, AppError> {
    let not_found = |input: &str| AppError::PeriodNotFound {
        input: input.to_string(),
        available: periods
            .iter()
            .map(|p| p.period.display_label.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    };

    let Some(query) = query.map(str::trim) else {
        return periods.first().ok_or_else(|| not_found(""));
    };

    periods
        .iter()
        .find(|p| p.period.key == query)
        .or_else(|| {
            periods
                .iter()
                .find(|p| p.period.display_label.eq_ignore_ascii_case(query))
        })
        .ok_or_else(|| not_found(query))
}

fn run_report(
    source: &dyn Source,
    options: &ReadOptions,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let cli = ctx.cli;
    let load = load_periods(source, options, cli.sort_mode())?;
    let selected = select_period(&load.periods, cli.period.as_deref())?;
    tracing::debug!(period = %selected.period.key, "selected period");

    let report = cli.command.report();
    let view = ReportView {
        load: &load,
        selected,
        source_label: source.display_name(),
        top: cli.top,
    };

    if cli.json {
        println!("{}", output_report_json(report, &view));
    } else if cli.csv {
        print!("{}", output_report_csv(report, &view)?);
    } else {
        let caps = source.capabilities();
        print_report_table(
            report,
            &view,
            TableOptions {
                use_color: cli.use_color(),
                compact: cli.compact,
                number_format: ctx.number_format,
                dated_days: caps.dated_days,
                table_stats: caps.table_stats,
            },
        );
    }
    Ok(())
}

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let ctx = CommandContext { cli, number_format };

    let (source, options) = prepare(cli)?;
    tracing::debug!(source = source.name(), "prepared source");
    run_report(source.as_ref(), &options, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Period;
    use clap::Parser;

    fn periods(entries: &[(&str, &str)]) -> Vec<PeriodData> {
        entries
            .iter()
            .map(|(key, label)| PeriodData {
                period: Period {
                    key: (*key).to_string(),
                    display_label: (*label).to_string(),
                    total_sales: 0.0,
                },
                day_labels: Vec::new(),
                result: Default::default(),
            })
            .collect()
    }

    #[test]
    fn select_defaults_to_first_period() {
        let p = periods(&[("Apr", "April 2024"), ("May", "May 2024")]);
        assert_eq!(select_period(&p, None).unwrap().period.key, "Apr");
    }

    #[test]
    fn select_by_key_or_label() {
        let p = periods(&[("Apr", "April 2024"), ("MPL24:2024-05", "May 2024")]);
        assert_eq!(select_period(&p, Some("MPL24:2024-05")).unwrap().period.key, "MPL24:2024-05");
        assert_eq!(select_period(&p, Some("april 2024")).unwrap().period.key, "Apr");
        assert_eq!(select_period(&p, Some(" May 2024 ")).unwrap().period.key, "MPL24:2024-05");
    }

    #[test]
    fn unknown_period_lists_available_labels() {
        let p = periods(&[("Apr", "April 2024"), ("May", "May 2024")]);
        let err = select_period(&p, Some("June 2024")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Period \"June 2024\" not found (available: April 2024, May 2024)"
        );
    }

    #[test]
    fn db_defaults_fill_read_options() {
        let cli = Cli::try_parse_from(["pipesales", "db", "sales.db", "--month", "4"]).unwrap();
        let (source, options) = prepare(&cli).unwrap();
        assert_eq!(source.name(), "db");
        let records = options.records.unwrap();
        assert_eq!(records.product_column, "Item Name");
        assert_eq!(records.customer_column, "Customer Code");
        assert_eq!(records.month, Some(4));
    }

    #[test]
    fn db_rejects_bad_codes_before_loading() {
        let cli = Cli::try_parse_from(["pipesales", "db", "sales.db", "--fy", "24x"]).unwrap();
        assert!(matches!(prepare(&cli), Err(AppError::InvalidFinancialYear { .. })));

        let cli = Cli::try_parse_from(["pipesales", "db", "sales.db", "--month", "13"]).unwrap();
        assert!(matches!(prepare(&cli), Err(AppError::InvalidMonth { .. })));
    }

    #[test]
    fn sheet_has_no_record_options() {
        let cli = Cli::try_parse_from(["pipesales", "--customer", "C1", "sheet", "a.csv"]).unwrap();
        let (source, options) = prepare(&cli).unwrap();
        assert_eq!(source.name(), "sheet");
        assert!(options.records.is_none());
        assert_eq!(options.filter.customer.as_deref(), Some("C1"));
    }
}
