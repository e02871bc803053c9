use crate::cli::ReportCommand;
use crate::core::{Ranked, summarize, trend};
use crate::error::AppError;
use crate::output::ReportView;

fn ranked_name(entry: Option<&Ranked>) -> (String, String) {
    entry.map_or((String::new(), String::new()), |r| {
        (r.name.clone(), r.value.to_string())
    })
}

pub(crate) fn output_report_csv(
    report: ReportCommand,
    view: &ReportView<'_>,
) -> Result<String, AppError> {
    let selected = view.selected;
    let mut writer = csv::Writer::from_writer(Vec::new());

    match report {
        ReportCommand::Summary => {
            let s = summarize(&selected.result);
            let (top_customer, top_customer_sales) = ranked_name(s.top_customer.as_ref());
            let (top_product, top_product_sales) = ranked_name(s.top_product.as_ref());
            writer.write_record([
                "key",
                "label",
                "total_sales",
                "average_daily_sales",
                "top_customer",
                "top_customer_sales",
                "top_product",
                "top_product_sales",
                "active_customers",
                "active_products",
            ])?;
            writer.write_record([
                selected.period.key.clone(),
                selected.period.display_label.clone(),
                s.total_sales.to_string(),
                s.average_daily_sales.to_string(),
                top_customer,
                top_customer_sales,
                top_product,
                top_product_sales,
                s.active_customers.to_string(),
                s.active_products.to_string(),
            ])?;
        }
        ReportCommand::Periods => {
            writer.write_record([
                "key",
                "label",
                "total_sales",
                "average_daily_sales",
                "active_customers",
                "active_products",
            ])?;
            for p in &view.load.periods {
                let s = summarize(&p.result);
                writer.write_record([
                    p.period.key.clone(),
                    p.period.display_label.clone(),
                    s.total_sales.to_string(),
                    s.average_daily_sales.to_string(),
                    s.active_customers.to_string(),
                    s.active_products.to_string(),
                ])?;
            }
        }
        ReportCommand::Daily => {
            writer.write_record(["day", "total_sales"])?;
            for (day, total) in view.daily_series() {
                writer.write_record([day.to_string(), total.to_string()])?;
            }
        }
        ReportCommand::Products => {
            writer.write_record(["product", "sales", "percent"])?;
            for p in view.products() {
                writer.write_record([p.product, p.sales.to_string(), p.percent.to_string()])?;
            }
        }
        ReportCommand::Customers => {
            writer.write_record(["customer", "sales", "sku_count"])?;
            for c in view.customers() {
                writer.write_record([c.customer, c.sales.to_string(), c.sku_count.to_string()])?;
            }
        }
        ReportCommand::Skus => {
            writer.write_record(["product", "customer_count", "sales", "customers"])?;
            for s in view.skus() {
                writer.write_record([
                    s.product,
                    s.customer_count.to_string(),
                    s.sales.to_string(),
                    s.customers.join("; "),
                ])?;
            }
        }
        ReportCommand::Trend => {
            writer.write_record(["key", "label", "total_sales"])?;
            for point in trend(&view.load.periods) {
                writer.write_record([point.key, point.label, point.total_sales.to_string()])?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
