//! Spreadsheet workbook source
//!
//! Every sheet of an xlsx/xlsm/xlsb/xls/ods workbook is one period. A csv
//! file is treated as a single-sheet workbook named after the file.

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Days, NaiveDate};
use std::path::{Path, PathBuf};

use crate::core::{Cell, RawSheet, SourceData};
use crate::error::AppError;
use crate::source::{Capabilities, Source, SourceLoad};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Spreadsheet data source
pub(crate) struct SpreadsheetSource {
    path: PathBuf,
}

impl SpreadsheetSource {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for SpreadsheetSource {
    fn name(&self) -> &'static str {
        "sheet"
    }

    fn display_name(&self) -> &'static str {
        "Spreadsheet"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            dated_days: false,
            table_stats: false,
        }
    }

    fn load(&self) -> Result<SourceLoad, AppError> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let sheets = if extension == "csv" {
            vec![read_csv(&self.path)?]
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            read_workbook(&self.path)?
        } else {
            return Err(AppError::UnsupportedFormat { extension });
        };

        tracing::debug!(
            path = %self.path.display(),
            sheets = sheets.len(),
            "decoded spreadsheet"
        );

        Ok(SourceLoad {
            data: SourceData::Sheets(sheets),
            table_stats: Vec::new(),
        })
    }
}

fn read_workbook(path: &Path) -> Result<Vec<RawSheet>, AppError> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        // Ranges start at the first used cell; keep column positions absolute
        let col_offset = range.start().map_or(0, |(_, col)| col as usize);
        let rows = range
            .rows()
            .map(|row| {
                let mut cells = vec![Cell::Empty; col_offset];
                cells.extend(row.iter().map(data_to_cell));
                cells
            })
            .collect();
        sheets.push(RawSheet { name, rows });
    }
    Ok(sheets)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            serial_date_stamp(serial).map_or(Cell::Number(serial), Cell::Text)
        }
    }
}

/// Excel serial day number as an upper-case `DD-MMM-YY` stamp
fn serial_date_stamp(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_days(Days::new(serial.floor() as u64))?;
    Some(date.format("%d-%b-%y").to_string().to_uppercase())
}

fn read_csv(path: &Path) -> Result<RawSheet, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    // Non UTF-8 bytes (Latin-1 exports) become U+FFFD
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| Cell::from(String::from_utf8_lossy(field).as_ref()))
                .collect(),
        );
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    Ok(RawSheet { name, rows })
}
