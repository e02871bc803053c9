//! Core module - sales types, readers and aggregation shared by both sources

mod aggregator;
mod inference;
mod period;
mod reader;
mod summary;
mod types;

pub(crate) use aggregator::aggregate;
pub(crate) use inference::TotalColumnPolicy;
pub(crate) use period::{SortMode, sort_periods};
pub(crate) use reader::{ReadOptions, RecordOptions, SourceData, SplitMode, read};
pub(crate) use summary::{
    CustomerRank, ProductShare, SkuReach, product_shares, summarize, top_customers,
    top_skus_by_reach, trend,
};
pub(crate) use types::{
    Cell, LoadResult, Period, PeriodData, Ranked, RawSheet, RecordTable, RowFilter,
    TableOutcome, TableStat,
};

#[cfg(test)]
pub(crate) use types::SalesRow;
