/// ISO date format used by database day columns: "2024-04-01"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Header texts (trimmed, lowercased) that mark a trailing total column
pub(crate) const TOTAL_HEADER_ALIASES: [&str; 3] = ["total", "sum", "grand total"];

/// Data rows scanned when the header is too short to size the sheet
pub(crate) const WIDTH_SAMPLE_ROWS: usize = 10;

pub(crate) const DEFAULT_PRODUCT_COLUMN: &str = "Item Name";
pub(crate) const DEFAULT_CUSTOMER_COLUMN: &str = "Customer Code";
pub(crate) const DEFAULT_TABLE_PREFIX: &str = "MPL";
pub(crate) const DEFAULT_FINANCIAL_YEARS: [&str; 4] = ["22", "23", "24", "25"];

pub(crate) const DEFAULT_TOP_CUSTOMERS: usize = 15;
pub(crate) const DEFAULT_TOP_SKUS: usize = 5;

/// Placeholder shown when a ranking has no entries
pub(crate) const NOT_AVAILABLE: &str = "N/A";
