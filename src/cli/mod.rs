pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, ColorMode, PeriodOrder, Split, TotalColumn};
pub(crate) use commands::{Commands, ReportCommand};
