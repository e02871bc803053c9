//! Column inference for spreadsheet sheets
//!
//! Column 0 holds the product, column 1 the customer. Everything from
//! column 2 up to `last` holds daily figures; a trailing total column is
//! excluded according to the [`TotalColumnPolicy`].

use crate::consts::{TOTAL_HEADER_ALIASES, WIDTH_SAMPLE_ROWS};
use crate::core::types::Cell;
use crate::error::PeriodSkip;

pub(crate) const PRODUCT_COL: usize = 0;
pub(crate) const CUSTOMER_COL: usize = 1;
pub(crate) const FIRST_DATA_COL: usize = 2;

/// How to treat the last physical column of a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum TotalColumnPolicy {
    /// Exclude it when the header says "total", or whenever there are 4+ columns
    #[default]
    Heuristic,
    /// Exclude it only when the header says "total"
    Header,
    /// Always keep it as data
    Never,
}

/// Inclusive range of data columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DataColumns {
    pub(crate) first: usize,
    pub(crate) last: usize,
}

impl DataColumns {
    pub(crate) fn width(&self) -> usize {
        self.last - self.first + 1
    }
}

fn is_total_header(cell: Option<&Cell>) -> bool {
    let Some(cell) = cell else {
        return false;
    };
    let text = cell.to_text().trim().to_lowercase();
    TOTAL_HEADER_ALIASES.contains(&text.as_str())
}

/// Sheet width: header length, or the widest of the first sampled data rows
/// when the header has fewer than 3 cells
fn sheet_width(header: &[Cell], data_rows: &[Vec<Cell>]) -> usize {
    if header.len() >= 3 {
        return header.len();
    }
    data_rows
        .iter()
        .take(WIDTH_SAMPLE_ROWS)
        .map(Vec::len)
        .max()
        .unwrap_or(0)
}

pub(crate) fn infer_data_columns(
    header: &[Cell],
    data_rows: &[Vec<Cell>],
    policy: TotalColumnPolicy,
) -> Result<DataColumns, PeriodSkip> {
    let max_cols = sheet_width(header, data_rows);
    let last_physical = max_cols as isize - 1;

    let explicit_total =
        last_physical >= 0 && is_total_header(header.get(last_physical as usize));
    let exclude_last = match policy {
        TotalColumnPolicy::Heuristic => explicit_total || max_cols >= 4,
        TotalColumnPolicy::Header => explicit_total,
        TotalColumnPolicy::Never => false,
    };

    // Never exclude the only remaining data column
    let last_data_col = if exclude_last && last_physical > FIRST_DATA_COL as isize {
        last_physical - 1
    } else {
        last_physical
    };

    if last_data_col < FIRST_DATA_COL as isize {
        return Err(PeriodSkip::InsufficientColumns {
            max_cols,
            last_data_col,
        });
    }

    tracing::debug!(
        max_cols,
        explicit_total,
        exclude_last,
        last_data_col,
        "inferred data columns"
    );

    Ok(DataColumns {
        first: FIRST_DATA_COL,
        last: last_data_col as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|s| Cell::from(*s)).collect()
    }

    fn blank_rows(widths: &[usize]) -> Vec<Vec<Cell>> {
        widths.iter().map(|w| vec![Cell::Empty; *w]).collect()
    }

    #[test]
    fn explicit_total_header_is_excluded() {
        let h = header(&["Item", "Customer", "D1", "D2", "D3", "Total"]);
        let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Heuristic).unwrap();
        assert_eq!(cols, DataColumns { first: 2, last: 4 });
        assert_eq!(cols.width(), 3);
    }

    #[test]
    fn total_header_matching_is_trimmed_and_case_insensitive() {
        for last in [" TOTAL ", "Sum", "Grand Total"] {
            let h = header(&["Item", "Customer", "D1", "D2", last]);
            let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Header).unwrap();
            assert_eq!(cols.last, 3, "header {last:?}");
        }
    }

    #[test]
    fn heuristic_excludes_last_column_of_wide_sheet() {
        let h = header(&["Item", "Customer", "D1", "D2", "D3", "D4"]);
        let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Heuristic).unwrap();
        assert_eq!(cols, DataColumns { first: 2, last: 4 });
    }

    #[test]
    fn heuristic_on_four_columns_leaves_one_data_column() {
        let h = header(&["Item", "Customer", "D1", "D2"]);
        let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Heuristic).unwrap();
        assert_eq!(cols, DataColumns { first: 2, last: 2 });
    }

    #[test]
    fn header_policy_keeps_unlabelled_last_column() {
        let h = header(&["Item", "Customer", "D1", "D2", "D3", "D4"]);
        let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Header).unwrap();
        assert_eq!(cols.last, 5);
    }

    #[test]
    fn never_policy_keeps_explicit_total() {
        let h = header(&["Item", "Customer", "D1", "Total"]);
        let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Never).unwrap();
        assert_eq!(cols.last, 3);
    }

    #[test]
    fn three_columns_keep_total_as_only_data_column() {
        let h = header(&["Item", "Customer", "Total"]);
        let cols = infer_data_columns(&h, &[], TotalColumnPolicy::Heuristic).unwrap();
        assert_eq!(cols, DataColumns { first: 2, last: 2 });
    }

    #[test]
    fn short_header_uses_widest_sampled_row() {
        let h = header(&["Item"]);
        let rows = blank_rows(&[3, 5, 4]);
        let cols = infer_data_columns(&h, &rows, TotalColumnPolicy::Heuristic).unwrap();
        // 5 columns, heuristic drops the last
        assert_eq!(cols, DataColumns { first: 2, last: 3 });
    }

    #[test]
    fn width_sampling_stops_after_ten_rows() {
        let h = header(&["Item", "Customer"]);
        let mut widths = vec![3; 10];
        widths.push(8);
        let rows = blank_rows(&widths);
        let cols = infer_data_columns(&h, &rows, TotalColumnPolicy::Heuristic).unwrap();
        assert_eq!(cols, DataColumns { first: 2, last: 2 });
    }

    #[test]
    fn too_narrow_sheet_is_skipped() {
        let h = header(&["Item", "Customer"]);
        let rows = blank_rows(&[2, 2]);
        let err = infer_data_columns(&h, &rows, TotalColumnPolicy::Heuristic).unwrap_err();
        assert_eq!(
            err,
            PeriodSkip::InsufficientColumns {
                max_cols: 2,
                last_data_col: 1
            }
        );
    }

    #[test]
    fn empty_sheet_is_skipped() {
        let err = infer_data_columns(&[], &[], TotalColumnPolicy::Heuristic).unwrap_err();
        assert_eq!(
            err,
            PeriodSkip::InsufficientColumns {
                max_cols: 0,
                last_data_col: -1
            }
        );
    }
}
