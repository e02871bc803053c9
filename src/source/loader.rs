//! Unified data loader for all sources

use rayon::prelude::*;
use std::time::Instant;

use crate::core::{
    LoadResult, Period, PeriodData, ReadOptions, SortMode, aggregate, read, sort_periods,
};
use crate::error::AppError;
use crate::source::{Source, SourceLoad};

/// Load periods from a source
struct DataLoader<'a> {
    source: &'a dyn Source,
    options: &'a ReadOptions,
    order: SortMode,
}

impl<'a> DataLoader<'a> {
    fn new(source: &'a dyn Source, options: &'a ReadOptions, order: SortMode) -> Self {
        Self {
            source,
            options,
            order,
        }
    }

    /// Pipeline: decode → read → aggregate (parallel) → order
    fn load(&self) -> Result<LoadResult, AppError> {
        let load_start = Instant::now();

        let SourceLoad { data, table_stats } = self.source.load()?;
        tracing::info!(
            "Read {} input ({:.2}ms)",
            self.source.display_name(),
            load_start.elapsed().as_secs_f64() * 1000.0
        );

        let read_result = read(&data, self.options);
        let skipped_periods = read_result.skipped.len();
        if read_result.batches.is_empty() {
            return Err(AppError::NoValidData);
        }

        let dropped_rows = read_result.batches.iter().map(|b| b.dropped_rows).sum();
        let valid_rows = read_result.batches.iter().map(|b| b.rows.len()).sum();

        let aggregate_start = Instant::now();
        let period_count = read_result.batches.len();
        let periods: Vec<PeriodData> = read_result
            .batches
            .into_par_iter()
            .map(|batch| {
                let result = aggregate(&batch.key, &batch.rows);
                PeriodData {
                    period: Period {
                        key: batch.key,
                        display_label: batch.display_label,
                        total_sales: result.total_sales,
                    },
                    day_labels: batch.day_labels,
                    result,
                }
            })
            .collect();
        tracing::info!(
            "Aggregated {} periods, {} rows ({:.2}ms)",
            period_count,
            valid_rows,
            aggregate_start.elapsed().as_secs_f64() * 1000.0
        );
        tracing::debug!(skipped_periods, dropped_rows, "read summary");

        let ordered = sort_periods(periods, self.order);
        if ordered.items.is_empty() {
            return Err(AppError::NoDatedPeriods);
        }
        if ordered.items.len() < period_count {
            tracing::info!(
                "Dropped {} period(s) without a month label",
                period_count - ordered.items.len()
            );
        }

        Ok(LoadResult {
            periods: ordered.items,
            financial_year: ordered.financial_year,
            skipped_periods,
            dropped_rows,
            valid_rows,
            table_stats,
            elapsed_ms: load_start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// Load, aggregate and order every period of a source
pub(crate) fn load_periods(
    source: &dyn Source,
    options: &ReadOptions,
    order: SortMode,
) -> Result<LoadResult, AppError> {
    DataLoader::new(source, options, order).load()
}
