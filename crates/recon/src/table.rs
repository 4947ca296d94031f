//! Rectangular table model shared by the engine and the file shells.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::ReconError;

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl Cell {
    /// Infer a typed cell from a raw delimited-text field.
    ///
    /// Empty → `Empty`, parseable as `f64` → `Number`, otherwise `Text`.
    pub fn infer(field: &str) -> Self {
        if field.is_empty() {
            return Cell::Empty;
        }
        match field.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(field.to_string()),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Date(_) => false,
        }
    }

    /// Text form used for keys and display.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Date(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    dt.date().format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }

    /// Interpret the cell as a calendar date, if possible.
    ///
    /// Numbers are spreadsheet serial dates (1900 system).
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Empty => None,
            Cell::Date(dt) => Some(dt.date()),
            Cell::Number(n) => serial_to_date(*n),
            Cell::Text(s) => parse_date_text(s),
        }
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Excel 1900-system serial (days + day fraction) to a timestamp.
///
/// Serials below 60 precede the phantom 1900-02-29. Sub-day serials (pure
/// times of day) and values past 9999-12-31 yield `None`.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 || serial >= 2_958_466.0 {
        return None;
    }
    let days = serial.floor() as i64;
    let days = if days < 60 { days + 1 } else { days };
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    serial_to_datetime(serial).map(|dt| dt.date())
}

/// A header row plus data rows. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with `Empty` or dropping overflow to keep the table rectangular.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Resolve a required column, failing with `MissingColumn` for `table_label`.
    pub fn require_column(&self, table_label: &str, name: &str) -> Result<usize, ReconError> {
        self.column_index(name).ok_or_else(|| ReconError::MissingColumn {
            table: table_label.to_string(),
            column: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse delimited text. First record is the header row.
    pub fn from_delimited(content: &str, delimiter: u8) -> Result<Self, ReconError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(r) => r
                .map_err(|e| ReconError::TableParse(e.to_string()))?
                .iter()
                .map(str::to_string)
                .collect(),
            None => return Ok(Table::default()),
        };

        let mut table = Table::new(headers);
        for record in records {
            let record = record.map_err(|e| ReconError::TableParse(e.to_string()))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            table.push_row(record.iter().map(Cell::infer).collect());
        }
        Ok(table)
    }

    pub fn from_csv_str(content: &str) -> Result<Self, ReconError> {
        Self::from_delimited(content, b',')
    }
}
