//! Period labelling and financial-year ordering
//!
//! A financial year runs April to March and is named after the calendar
//! year it starts in.

use chrono::Month;
use regex::Regex;
use std::sync::LazyLock;

use crate::core::types::{Cell, Period, PeriodData};

/// "01-APR-22" style period stamp found below a sheet header
static PERIOD_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})-([A-Z]{3})-(\d{2})").expect("valid regex"));

/// "<Month> <YYYY>" display label
static MONTH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{4})\b",
    )
    .expect("valid regex")
});

/// Human-readable label for a sheet: "April 2022" when the cell below the
/// header's first column carries a `DD-MMM-YY` stamp, otherwise the key
pub(crate) fn label_period(key: &str, rows: &[Vec<Cell>]) -> String {
    let stamp = rows
        .get(1)
        .and_then(|row| row.first())
        .map(|cell| cell.to_text().trim().to_string())
        .unwrap_or_default();

    let Some(caps) = PERIOD_STAMP.captures(&stamp) else {
        return key.to_string();
    };
    let abbrev = &caps[2];
    let month_name = abbrev
        .parse::<Month>()
        .map(|m| m.name().to_string())
        .unwrap_or_else(|_| abbrev.to_string());
    format!("{} 20{}", month_name, &caps[3])
}

/// "<FullMonth> <YYYY>" for a calendar month
pub(crate) fn month_label(year: i32, month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown");
    format!("{name} {year}")
}

/// A calendar month parsed from a display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthYear {
    pub(crate) year: i32,
    /// 1 = January
    pub(crate) month: u32,
}

impl MonthYear {
    pub(crate) fn parse_label(label: &str) -> Option<Self> {
        let caps = MONTH_LABEL.captures(label)?;
        let month = caps[1].parse::<Month>().ok()?.number_from_month();
        let year = caps[2].parse::<i32>().ok()?;
        Some(Self { year, month })
    }

    pub(crate) fn financial_year(self) -> i32 {
        if self.month >= 4 {
            self.year
        } else {
            self.year - 1
        }
    }

    /// April = 1 … March = 12
    pub(crate) fn month_rank(self) -> u32 {
        if self.month >= 4 {
            self.month - 3
        } else {
            self.month + 9
        }
    }

    fn sort_key(self) -> (i32, u32) {
        (self.financial_year(), self.month_rank())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SortMode {
    /// April→March within each financial year; unlabelled periods dropped
    #[default]
    FinancialYear,
    /// Input order, nothing dropped
    Original,
}

/// Anything carrying a period display label
pub(crate) trait Labeled {
    fn display_label(&self) -> &str;
}

impl Labeled for Period {
    fn display_label(&self) -> &str {
        &self.display_label
    }
}

impl Labeled for PeriodData {
    fn display_label(&self) -> &str {
        &self.period.display_label
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Ordered<T> {
    pub(crate) items: Vec<T>,
    /// Detected span such as "FY 2023-2025"
    pub(crate) financial_year: Option<String>,
}

fn financial_year_label(first: MonthYear, last: MonthYear, allow_partial: bool) -> Option<String> {
    if first.month == 4 && last.month == 3 {
        return Some(format!("FY {}-{}", first.year, last.year + 1));
    }
    // Partial spans that start before April and end after it
    if allow_partial && first.month < 4 && last.month >= 4 {
        return Some(format!("FY {}-{}", first.year, last.year));
    }
    None
}

pub(crate) fn sort_periods<T: Labeled>(periods: Vec<T>, mode: SortMode) -> Ordered<T> {
    match mode {
        SortMode::Original => {
            let first = periods
                .first()
                .and_then(|p| MonthYear::parse_label(p.display_label()));
            let last = periods
                .last()
                .and_then(|p| MonthYear::parse_label(p.display_label()));
            let financial_year = match (first, last) {
                (Some(f), Some(l)) => financial_year_label(f, l, false),
                _ => None,
            };
            Ordered {
                items: periods,
                financial_year,
            }
        }
        SortMode::FinancialYear => {
            let mut dated: Vec<(MonthYear, T)> = periods
                .into_iter()
                .filter_map(|p| MonthYear::parse_label(p.display_label()).map(|m| (m, p)))
                .collect();
            dated.sort_by_key(|(m, _)| m.sort_key());

            let financial_year = match (dated.first(), dated.last()) {
                (Some((f, _)), Some((l, _))) => financial_year_label(*f, *l, true),
                _ => None,
            };
            Ordered {
                items: dated.into_iter().map(|(_, p)| p).collect(),
                financial_year,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_stamp(stamp: &str) -> Vec<Vec<Cell>> {
        vec![
            vec![Cell::from("Item"), Cell::from("Customer"), Cell::from("1")],
            vec![Cell::from(stamp), Cell::Empty, Cell::Empty],
        ]
    }

    fn period(label: &str) -> Period {
        Period {
            key: label.to_string(),
            display_label: label.to_string(),
            total_sales: 0.0,
        }
    }

    fn labels<T: Labeled>(items: &[T]) -> Vec<&str> {
        items.iter().map(Labeled::display_label).collect()
    }

    // --- label_period ---

    #[test]
    fn label_from_period_stamp() {
        let rows = sheet_with_stamp("01-APR-22");
        assert_eq!(label_period("Sheet1", &rows), "April 2022");
    }

    #[test]
    fn label_stamp_may_be_embedded_in_text() {
        let rows = sheet_with_stamp("Period: 01-NOV-23 to 30-NOV-23");
        assert_eq!(label_period("Sheet1", &rows), "November 2023");
    }

    #[test]
    fn label_unknown_abbreviation_is_kept_verbatim() {
        let rows = sheet_with_stamp("01-XYZ-22");
        assert_eq!(label_period("Sheet1", &rows), "XYZ 2022");
    }

    #[test]
    fn label_falls_back_to_key() {
        assert_eq!(label_period("Sheet1", &sheet_with_stamp("PipeX")), "Sheet1");
        assert_eq!(label_period("Sheet1", &sheet_with_stamp("01-apr-22")), "Sheet1");
        assert_eq!(label_period("Only header", &[vec![Cell::from("Item")]]), "Only header");
        assert_eq!(label_period("Empty", &[]), "Empty");
    }

    #[test]
    fn month_label_names_month() {
        assert_eq!(month_label(2024, 4), "April 2024");
        assert_eq!(month_label(2025, 12), "December 2025");
    }

    // --- MonthYear ---

    #[test]
    fn parse_label_is_case_insensitive() {
        assert_eq!(
            MonthYear::parse_label("april 2024"),
            Some(MonthYear { year: 2024, month: 4 })
        );
        assert_eq!(
            MonthYear::parse_label("Sales MARCH 2025"),
            Some(MonthYear { year: 2025, month: 3 })
        );
    }

    #[test]
    fn parse_label_rejects_abbreviations_and_keys() {
        assert_eq!(MonthYear::parse_label("Apr 2024"), None);
        assert_eq!(MonthYear::parse_label("Sheet1"), None);
        assert_eq!(MonthYear::parse_label("MPL24"), None);
    }

    #[test]
    fn financial_year_and_rank() {
        let april = MonthYear { year: 2023, month: 4 };
        let march = MonthYear { year: 2024, month: 3 };
        assert_eq!(april.financial_year(), 2023);
        assert_eq!(march.financial_year(), 2023);
        assert_eq!(april.month_rank(), 1);
        assert_eq!(march.month_rank(), 12);
        assert_eq!(MonthYear { year: 2023, month: 12 }.month_rank(), 9);
    }

    // --- sort_periods ---

    const FY_2023: [&str; 12] = [
        "April 2023",
        "May 2023",
        "June 2023",
        "July 2023",
        "August 2023",
        "September 2023",
        "October 2023",
        "November 2023",
        "December 2023",
        "January 2024",
        "February 2024",
        "March 2024",
    ];

    #[test]
    fn financial_year_sort_orders_april_to_march() {
        let shuffled = [7, 11, 0, 3, 9, 1, 10, 5, 2, 8, 4, 6];
        let input: Vec<Period> = shuffled.iter().map(|&i| period(FY_2023[i])).collect();
        let ordered = sort_periods(input, SortMode::FinancialYear);
        assert_eq!(labels(&ordered.items), FY_2023.to_vec());
        assert_eq!(ordered.financial_year.as_deref(), Some("FY 2023-2025"));
    }

    #[test]
    fn financial_year_sort_drops_unlabelled_periods() {
        let input = vec![period("Sheet1"), period("May 2024"), period("April 2024")];
        let ordered = sort_periods(input, SortMode::FinancialYear);
        assert_eq!(labels(&ordered.items), vec!["April 2024", "May 2024"]);
        assert_eq!(ordered.financial_year, None);
    }

    #[test]
    fn financial_year_sort_spans_years() {
        let input = vec![
            period("April 2024"),
            period("March 2024"),
            period("April 2023"),
        ];
        let ordered = sort_periods(input, SortMode::FinancialYear);
        assert_eq!(
            labels(&ordered.items),
            vec!["April 2023", "March 2024", "April 2024"]
        );
    }

    #[test]
    fn financial_year_partial_span_label() {
        let input = vec![period("April 2024"), period("February 2024")];
        let ordered = sort_periods(input, SortMode::FinancialYear);
        assert_eq!(labels(&ordered.items), vec!["February 2024", "April 2024"]);
        assert_eq!(ordered.financial_year.as_deref(), Some("FY 2024-2024"));
    }

    #[test]
    fn financial_year_sort_with_no_dated_periods_is_empty() {
        let input = vec![period("Sheet1"), period("Sheet2")];
        let ordered = sort_periods(input, SortMode::FinancialYear);
        assert!(ordered.items.is_empty());
        assert_eq!(ordered.financial_year, None);
    }

    #[test]
    fn original_order_is_preserved() {
        let input = vec![period("May 2024"), period("Sheet9"), period("April 2024")];
        let ordered = sort_periods(input, SortMode::Original);
        assert_eq!(labels(&ordered.items), vec!["May 2024", "Sheet9", "April 2024"]);
        assert_eq!(ordered.financial_year, None);
    }

    #[test]
    fn original_order_detects_full_year_only() {
        let full = vec![period("April 2023"), period("Sheet2"), period("March 2024")];
        let ordered = sort_periods(full, SortMode::Original);
        assert_eq!(ordered.financial_year.as_deref(), Some("FY 2023-2025"));

        let partial = vec![period("February 2024"), period("April 2024")];
        let ordered = sort_periods(partial, SortMode::Original);
        assert_eq!(ordered.financial_year, None);
    }

    #[test]
    fn sort_is_stable_for_duplicate_months() {
        let mut a = period("April 2024");
        a.key = "a".to_string();
        let mut b = period("April 2024");
        b.key = "b".to_string();
        let ordered = sort_periods(vec![a, b], SortMode::FinancialYear);
        let keys: Vec<_> = ordered.items.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
