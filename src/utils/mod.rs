pub(crate) mod date;
pub(crate) mod logging;

pub(crate) use date::{parse_financial_years, parse_month_code};
pub(crate) use logging::init_logging;
