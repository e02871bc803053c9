use comfy_table::{Cell, Color, Table};

use crate::cli::ReportCommand;
use crate::consts::NOT_AVAILABLE;
use crate::core::{LoadResult, Ranked, TableOutcome, summarize, trend};
use crate::output::ReportView;
use crate::output::format::{
    NumberFormat, create_styled_table, format_amount, format_compact, format_number,
    format_percent, header_cell, right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
    /// Day axis holds ISO dates rather than day numbers
    pub(crate) dated_days: bool,
    /// Show per-table load outcomes
    pub(crate) table_stats: bool,
}

impl TableOptions {
    fn amount(&self, value: f64) -> String {
        if self.compact {
            format_compact(value, self.number_format)
        } else {
            format_amount(value, self.number_format)
        }
    }

    fn count(&self, n: usize) -> String {
        format_number(i64::try_from(n).unwrap_or(i64::MAX), self.number_format)
    }

    fn accent(&self) -> Option<Color> {
        self.use_color.then_some(Color::Cyan)
    }

    fn money(&self) -> Option<Color> {
        self.use_color.then_some(Color::Green)
    }
}

fn table_with_header(headers: &[&str], opts: &TableOptions) -> Table {
    let mut table = create_styled_table();
    table.set_header(
        headers
            .iter()
            .map(|h| header_cell(h, opts.use_color))
            .collect::<Vec<_>>(),
    );
    table
}

fn ranked_text(entry: Option<&Ranked>, opts: &TableOptions) -> String {
    match entry {
        Some(r) => format!("{} ({})", r.name, opts.amount(r.value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Print the load line with timing
fn print_load_line(load: &LoadResult, opts: &TableOptions) {
    let mut stats_text = format!(
        "{} rows in {} periods",
        opts.count(load.valid_rows),
        opts.count(load.periods.len())
    );
    if load.dropped_rows > 0 || load.skipped_periods > 0 {
        stats_text.push_str(&format!(
            " ({} rows without product or customer, {} periods skipped)",
            opts.count(load.dropped_rows),
            opts.count(load.skipped_periods)
        ));
    }

    if opts.use_color {
        println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, load.elapsed_ms);
    } else {
        println!("\n  {} | {:.0}ms\n", stats_text, load.elapsed_ms);
    }
}

fn print_table_stats(load: &LoadResult, opts: &TableOptions) {
    if !opts.table_stats || load.table_stats.is_empty() {
        return;
    }
    let mut table = table_with_header(&["Table", "Rows", "Status"], opts);
    let red = opts.use_color.then_some(Color::Red);
    for stat in &load.table_stats {
        match &stat.outcome {
            TableOutcome::Rows(rows) => table.add_row(vec![
                Cell::new(&stat.table),
                right_cell(&opts.count(*rows), None, false),
                Cell::new("ok"),
            ]),
            TableOutcome::Error(e) => table.add_row(vec![
                Cell::new(&stat.table),
                right_cell("-", None, false),
                styled_cell(e, red, false),
            ]),
        };
    }
    println!("{table}");
}

fn period_title(view: &ReportView<'_>, what: &str) -> String {
    match &view.load.financial_year {
        Some(fy) => format!("{} {} - {}", view.selected.period.display_label, what, fy),
        None => format!("{} {}", view.selected.period.display_label, what),
    }
}

fn print_summary(view: &ReportView<'_>, opts: &TableOptions) {
    let s = summarize(&view.selected.result);
    let mut table = table_with_header(&["Metric", "Value"], opts);
    table.add_row(vec![
        Cell::new("Total sales"),
        right_cell(&opts.amount(s.total_sales), opts.money(), true),
    ]);
    table.add_row(vec![
        Cell::new("Average daily sales"),
        right_cell(&opts.amount(s.average_daily_sales), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Top customer"),
        right_cell(&ranked_text(s.top_customer.as_ref(), opts), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Top product"),
        right_cell(&ranked_text(s.top_product.as_ref(), opts), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Active customers"),
        right_cell(&opts.count(s.active_customers), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Active products"),
        right_cell(&opts.count(s.active_products), None, false),
    ]);

    println!("\n  {} ({})\n", period_title(view, "Sales Summary"), view.source_label);
    println!("{table}");
    print_table_stats(view.load, opts);
}

fn print_periods(view: &ReportView<'_>, opts: &TableOptions) {
    let mut table = table_with_header(
        &["Period", "Total", "Avg/Day", "Customers", "Products", "Top Customer"],
        opts,
    );
    let mut total = 0.0;
    for p in &view.load.periods {
        let s = summarize(&p.result);
        total += s.total_sales;
        let selected = p.period.key == view.selected.period.key;
        table.add_row(vec![
            styled_cell(&p.period.display_label, None, selected),
            right_cell(&opts.amount(s.total_sales), opts.money(), false),
            right_cell(&opts.amount(s.average_daily_sales), None, false),
            right_cell(&opts.count(s.active_customers), None, false),
            right_cell(&opts.count(s.active_products), None, false),
            Cell::new(s.top_customer.map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.name)),
        ]);
    }
    table.add_row(vec![
        styled_cell("TOTAL", opts.accent(), true),
        right_cell(&opts.amount(total), opts.money(), true),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);

    let title = match &view.load.financial_year {
        Some(fy) => format!("Periods - {fy}"),
        None => "Periods".to_string(),
    };
    println!("\n  {title}\n");
    println!("{table}");
    print_table_stats(view.load, opts);
}

fn print_daily(view: &ReportView<'_>, opts: &TableOptions) {
    let label = if opts.dated_days { "Date" } else { "Day" };
    let mut table = table_with_header(&[label, "Sales"], opts);
    let mut total = 0.0;
    for (day, value) in view.daily_series() {
        total += value;
        table.add_row(vec![Cell::new(day), right_cell(&opts.amount(value), None, false)]);
    }
    table.add_row(vec![
        styled_cell("TOTAL", opts.accent(), true),
        right_cell(&opts.amount(total), opts.money(), true),
    ]);

    println!("\n  {}\n", period_title(view, "Daily Sales"));
    println!("{table}");
}

fn print_products(view: &ReportView<'_>, opts: &TableOptions) {
    let mut table = table_with_header(&["Product", "Sales", "Share"], opts);
    for p in view.products() {
        table.add_row(vec![
            Cell::new(&p.product),
            right_cell(&opts.amount(p.sales), None, false),
            right_cell(&format_percent(p.percent, opts.number_format), None, false),
        ]);
    }

    println!("\n  {}\n", period_title(view, "Product Contribution"));
    println!("{table}");
}

fn print_customers(view: &ReportView<'_>, opts: &TableOptions) {
    let customers = view.customers();
    let mut table = table_with_header(&["#", "Customer", "Sales", "SKUs"], opts);
    for (i, c) in customers.iter().enumerate() {
        table.add_row(vec![
            right_cell(&(i + 1).to_string(), None, false),
            Cell::new(&c.customer),
            right_cell(&opts.amount(c.sales), None, false),
            right_cell(&opts.count(c.sku_count), None, false),
        ]);
    }

    println!(
        "\n  {}\n",
        period_title(view, &format!("Top {} Customers", customers.len()))
    );
    println!("{table}");
}

fn print_skus(view: &ReportView<'_>, opts: &TableOptions) {
    let skus = view.skus();
    let mut table = table_with_header(&["Product", "Customers", "Sales", "Bought By"], opts);
    for s in &skus {
        table.add_row(vec![
            Cell::new(&s.product),
            right_cell(&opts.count(s.customer_count), opts.accent(), false),
            right_cell(&opts.amount(s.sales), None, false),
            Cell::new(s.customers.join(", ")),
        ]);
    }

    println!("\n  {}\n", period_title(view, &format!("Top {} SKUs", skus.len())));
    println!("{table}");
}

fn print_trend(view: &ReportView<'_>, opts: &TableOptions) {
    let points = trend(&view.load.periods);
    let max = points
        .iter()
        .map(|p| p.total_sales)
        .fold(0.0_f64, f64::max);
    let mut table = table_with_header(&["Period", "Sales", ""], opts);
    for p in &points {
        // 30-char bar scaled to the best period
        let width = if max > 0.0 {
            ((p.total_sales.max(0.0) / max) * 30.0).round() as usize
        } else {
            0
        };
        table.add_row(vec![
            Cell::new(&p.label),
            right_cell(&opts.amount(p.total_sales), None, false),
            styled_cell(&"█".repeat(width), opts.accent(), false),
        ]);
    }

    let title = match &view.load.financial_year {
        Some(fy) => format!("Sales Trend - {fy}"),
        None => "Sales Trend".to_string(),
    };
    println!("\n  {title}\n");
    println!("{table}");
}

pub(crate) fn print_report_table(report: ReportCommand, view: &ReportView<'_>, opts: TableOptions) {
    match report {
        ReportCommand::Summary => print_summary(view, &opts),
        ReportCommand::Periods => print_periods(view, &opts),
        ReportCommand::Daily => print_daily(view, &opts),
        ReportCommand::Products => print_products(view, &opts),
        ReportCommand::Customers => print_customers(view, &opts),
        ReportCommand::Skus => print_skus(view, &opts),
        ReportCommand::Trend => print_trend(view, &opts),
    }
    print_load_line(view.load, &opts);
}
