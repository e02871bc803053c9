//! Folds normalized sales rows into per-period rollups

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::types::{AggregationResult, SalesRow};

/// Running totals for one period
#[derive(Debug, Default)]
struct PeriodAccumulator {
    daily_totals: Vec<f64>,
    product_totals: HashMap<String, f64>,
    customer_totals: HashMap<String, f64>,
    products_by_customer: HashMap<String, HashSet<String>>,
    customers_by_product: HashMap<String, HashSet<String>>,
    row_count: usize,
}

impl PeriodAccumulator {
    fn add_row(&mut self, row: &SalesRow) {
        let row_total = row.total();

        *self
            .product_totals
            .entry(row.product.clone())
            .or_default() += row_total;
        *self
            .customer_totals
            .entry(row.customer.clone())
            .or_default() += row_total;

        if self.daily_totals.len() < row.daily_values.len() {
            self.daily_totals.resize(row.daily_values.len(), 0.0);
        }
        for (day, value) in row.daily_values.iter().enumerate() {
            self.daily_totals[day] += value;
        }

        // Zero rows still count towards distinct product/customer pairs
        self.products_by_customer
            .entry(row.customer.clone())
            .or_default()
            .insert(row.product.clone());
        self.customers_by_product
            .entry(row.product.clone())
            .or_default()
            .insert(row.customer.clone());

        self.row_count += 1;
    }

    fn into_result(self) -> AggregationResult {
        let total_sales = if self.daily_totals.is_empty() {
            self.product_totals.values().sum()
        } else {
            self.daily_totals.iter().sum()
        };

        let sku_count_by_customer = self
            .products_by_customer
            .into_iter()
            .map(|(customer, products)| (customer, products.len()))
            .collect();

        let customers_by_product = self
            .customers_by_product
            .into_iter()
            .map(|(product, customers)| {
                let mut customers: Vec<String> = customers.into_iter().collect();
                customers.sort();
                (product, customers)
            })
            .collect();

        AggregationResult {
            daily_totals: self.daily_totals,
            product_totals: self.product_totals.into_iter().collect::<BTreeMap<_, _>>(),
            customer_totals: self.customer_totals.into_iter().collect::<BTreeMap<_, _>>(),
            sku_count_by_customer,
            customers_by_product,
            total_sales,
            row_count: self.row_count,
        }
    }
}

/// Aggregate one period's rows. Pure: the same rows always give the same result.
pub(crate) fn aggregate(period_key: &str, rows: &[SalesRow]) -> AggregationResult {
    let mut acc = PeriodAccumulator::default();
    for row in rows {
        acc.add_row(row);
    }
    let result = acc.into_result();

    tracing::debug!(
        period = period_key,
        rows = result.row_count,
        products = result.product_totals.len(),
        customers = result.customer_totals.len(),
        total = result.total_sales,
        "aggregated period"
    );

    result
}
