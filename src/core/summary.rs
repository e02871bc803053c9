//! Summaries and rankings derived from an aggregation
//!
//! Rankings order by value descending; equal values fall back to the
//! lexicographically smaller name, so the top entry is deterministic.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::{AggregationResult, PeriodData, Ranked, Summary};

/// Entries of a totals map sorted by value desc, then name asc
pub(crate) fn rank_desc(map: &BTreeMap<String, f64>) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = map
        .iter()
        .map(|(name, value)| Ranked {
            name: name.clone(),
            value: *value,
        })
        .collect();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    ranked
}

fn top_entry(map: &BTreeMap<String, f64>) -> Option<Ranked> {
    rank_desc(map).into_iter().next()
}

pub(crate) fn summarize(result: &AggregationResult) -> Summary {
    let total_sales = if result.daily_totals.is_empty() {
        result.product_totals.values().sum()
    } else {
        result.daily_totals.iter().sum()
    };

    // Zero-total periods report 0 rather than 0/N
    let days = result.daily_totals.len();
    let average_daily_sales = if days > 0 && total_sales > 0.0 {
        total_sales / days as f64
    } else {
        0.0
    };

    Summary {
        total_sales,
        average_daily_sales,
        top_customer: top_entry(&result.customer_totals),
        top_product: top_entry(&result.product_totals),
        active_customers: result.customer_totals.len(),
        active_products: result.product_totals.len(),
    }
}

/// A customer with its sales and number of distinct products bought
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CustomerRank {
    pub(crate) customer: String,
    pub(crate) sales: f64,
    pub(crate) sku_count: usize,
}

pub(crate) fn top_customers(result: &AggregationResult, n: usize) -> Vec<CustomerRank> {
    rank_desc(&result.customer_totals)
        .into_iter()
        .take(n)
        .map(|r| CustomerRank {
            sku_count: result
                .sku_count_by_customer
                .get(&r.name)
                .copied()
                .unwrap_or(0),
            customer: r.name,
            sales: r.value,
        })
        .collect()
}

/// A product's contribution to the period total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ProductShare {
    pub(crate) product: String,
    pub(crate) sales: f64,
    pub(crate) percent: f64,
}

pub(crate) fn product_shares(result: &AggregationResult) -> Vec<ProductShare> {
    let total: f64 = result.product_totals.values().sum();
    rank_desc(&result.product_totals)
        .into_iter()
        .map(|r| ProductShare {
            percent: if total > 0.0 {
                r.value * 100.0 / total
            } else {
                0.0
            },
            product: r.name,
            sales: r.value,
        })
        .collect()
}

/// A product ranked by how many distinct customers bought it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SkuReach {
    pub(crate) product: String,
    pub(crate) customer_count: usize,
    pub(crate) sales: f64,
    pub(crate) customers: Vec<String>,
}

pub(crate) fn top_skus_by_reach(result: &AggregationResult, n: usize) -> Vec<SkuReach> {
    let mut skus: Vec<SkuReach> = result
        .customers_by_product
        .iter()
        .map(|(product, customers)| SkuReach {
            product: product.clone(),
            customer_count: customers.len(),
            sales: result.product_totals.get(product).copied().unwrap_or(0.0),
            customers: customers.clone(),
        })
        .collect();
    skus.sort_by(|a, b| {
        b.customer_count
            .cmp(&a.customer_count)
            .then_with(|| b.sales.total_cmp(&a.sales))
            .then_with(|| a.product.cmp(&b.product))
    });
    skus.truncate(n);
    skus
}

/// One point of the cross-period sales trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TrendPoint {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) total_sales: f64,
}

/// Period totals in the order the periods were given
pub(crate) fn trend(periods: &[PeriodData]) -> Vec<TrendPoint> {
    periods
        .iter()
        .map(|p| TrendPoint {
            key: p.period.key.clone(),
            label: p.period.display_label.clone(),
            total_sales: p.period.total_sales,
        })
        .collect()
}
