use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Unsupported file type \"{extension}\" (expected xlsx, xlsm, xlsb, xls, ods or csv)")]
    UnsupportedFormat { extension: String },

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("No valid data found")]
    NoValidData,

    #[error("No periods carry a \"<Month> <YYYY>\" label; use --order original to keep them")]
    NoDatedPeriods,

    #[error("Period \"{input}\" not found (available: {available})")]
    PeriodNotFound { input: String, available: String },

    #[error("Invalid financial year code \"{input}\" (expected digits such as 24)")]
    InvalidFinancialYear { input: String },

    #[error("Invalid month \"{input}\" (expected 01-12)")]
    InvalidMonth { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },
}

/// Structural defect that removes one period from a load without failing it
#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum PeriodSkip {
    #[error("has {rows} row(s); a header and at least one data row are required")]
    TooFewRows { rows: usize },

    #[error(
        "has no data columns after total-column exclusion ({max_cols} column(s) detected, last data column index {last_data_col})"
    )]
    InsufficientColumns { max_cols: usize, last_data_col: isize },

    #[error("has no records")]
    EmptyTable,

    #[error("is missing the \"{column}\" column")]
    MissingColumn { column: String },

    #[error("has no YYYY-MM-DD columns in range")]
    NoDateColumns,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_unsupported_format() {
        let e = AppError::UnsupportedFormat {
            extension: "pdf".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Unsupported file type "pdf" (expected xlsx, xlsm, xlsb, xls, ods or csv)"#
        );
    }

    #[test]
    fn app_error_display_no_valid_data() {
        assert_eq!(AppError::NoValidData.to_string(), "No valid data found");
    }

    #[test]
    fn app_error_display_period_not_found() {
        let e = AppError::PeriodNotFound {
            input: "May 2030".to_string(),
            available: "April 2024, May 2024".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Period "May 2030" not found (available: April 2024, May 2024)"#
        );
    }

    #[test]
    fn app_error_display_month() {
        let e = AppError::InvalidMonth {
            input: "13".to_string(),
        };
        assert_eq!(e.to_string(), r#"Invalid month "13" (expected 01-12)"#);
    }

    #[test]
    fn app_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xlsx");
        let app: AppError = io.into();
        assert_eq!(app.to_string(), "missing.xlsx");
    }

    #[test]
    fn period_skip_display() {
        assert_eq!(
            PeriodSkip::TooFewRows { rows: 1 }.to_string(),
            "has 1 row(s); a header and at least one data row are required"
        );
        assert_eq!(
            PeriodSkip::MissingColumn {
                column: "Item Name".to_string()
            }
            .to_string(),
            r#"is missing the "Item Name" column"#
        );
    }
}
