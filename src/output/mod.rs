mod csv;
mod format;
mod json;
mod table;

pub(crate) use csv::output_report_csv;
pub(crate) use format::NumberFormat;
pub(crate) use json::output_report_json;
pub(crate) use table::{TableOptions, print_report_table};

use crate::consts::{DEFAULT_TOP_CUSTOMERS, DEFAULT_TOP_SKUS};
use crate::core::{
    CustomerRank, LoadResult, PeriodData, ProductShare, SkuReach, product_shares, top_customers,
    top_skus_by_reach,
};

/// What every renderer needs: the whole load plus the period in focus
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportView<'a> {
    pub(crate) load: &'a LoadResult,
    pub(crate) selected: &'a PeriodData,
    pub(crate) source_label: &'static str,
    /// Overrides the per-report default list length
    pub(crate) top: Option<usize>,
}

impl ReportView<'_> {
    /// `(day label, total)` pairs; days without rows read 0
    pub(crate) fn daily_series(&self) -> Vec<(&str, f64)> {
        let totals = &self.selected.result.daily_totals;
        self.selected
            .day_labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), totals.get(i).copied().unwrap_or(0.0)))
            .collect()
    }

    pub(crate) fn products(&self) -> Vec<ProductShare> {
        let mut shares = product_shares(&self.selected.result);
        if let Some(n) = self.top {
            shares.truncate(n);
        }
        shares
    }

    pub(crate) fn customers(&self) -> Vec<CustomerRank> {
        top_customers(
            &self.selected.result,
            self.top.unwrap_or(DEFAULT_TOP_CUSTOMERS),
        )
    }

    pub(crate) fn skus(&self) -> Vec<SkuReach> {
        top_skus_by_reach(&self.selected.result, self.top.unwrap_or(DEFAULT_TOP_SKUS))
    }
}
