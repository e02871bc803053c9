use serde_json::{Value, json};

use crate::cli::ReportCommand;
use crate::core::{LoadResult, PeriodData, summarize, trend};
use crate::output::ReportView;

fn period_json(data: &PeriodData) -> Value {
    json!({
        "key": data.period.key,
        "label": data.period.display_label,
        "total_sales": data.period.total_sales,
    })
}

fn load_json(load: &LoadResult) -> Value {
    json!({
        "periods": load.periods.len(),
        "valid_rows": load.valid_rows,
        "dropped_rows": load.dropped_rows,
        "skipped_periods": load.skipped_periods,
        "tables": load.table_stats,
        "elapsed_ms": load.elapsed_ms,
    })
}

fn periods_json(load: &LoadResult) -> Vec<Value> {
    load.periods
        .iter()
        .map(|p| {
            let summary = summarize(&p.result);
            json!({
                "key": p.period.key,
                "label": p.period.display_label,
                "total_sales": summary.total_sales,
                "average_daily_sales": summary.average_daily_sales,
                "active_customers": summary.active_customers,
                "active_products": summary.active_products,
                "top_customer": summary.top_customer,
                "top_product": summary.top_product,
            })
        })
        .collect()
}

pub(crate) fn output_report_json(report: ReportCommand, view: &ReportView<'_>) -> String {
    let selected = view.selected;
    let output = match report {
        ReportCommand::Summary => json!({
            "source": view.source_label,
            "financial_year": view.load.financial_year,
            "period": period_json(selected),
            "summary": summarize(&selected.result),
            "load": load_json(view.load),
        }),
        ReportCommand::Periods => json!({
            "financial_year": view.load.financial_year,
            "periods": periods_json(view.load),
        }),
        ReportCommand::Daily => json!({
            "period": period_json(selected),
            "days": view
                .daily_series()
                .into_iter()
                .map(|(day, total)| json!({ "day": day, "total_sales": total }))
                .collect::<Vec<_>>(),
        }),
        ReportCommand::Products => json!({
            "period": period_json(selected),
            "products": view.products(),
        }),
        ReportCommand::Customers => json!({
            "period": period_json(selected),
            "customers": view.customers(),
        }),
        ReportCommand::Skus => json!({
            "period": period_json(selected),
            "skus": view.skus(),
        }),
        ReportCommand::Trend => json!({
            "financial_year": view.load.financial_year,
            "trend": trend(&view.load.periods),
        }),
    };

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}
