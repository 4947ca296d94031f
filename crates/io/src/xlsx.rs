// Excel file import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: the first row of the used range is the header row; cells map onto
//         the engine's Cell model. Formulas contribute their cached values.
// Export: one worksheet, bold header row, values only.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::NaiveTime;
use rollcall_recon::table::serial_to_datetime;
use rollcall_recon::{Cell, Table};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

/// Maximum data rows read from one sheet
const MAX_ROWS: usize = 1_048_576;

/// Maximum columns read from one sheet
const MAX_COLS: usize = 16_384;

/// Import one sheet of an Excel/ODS file. `sheet` defaults to the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Table, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                format!(
                    "{}: no sheet named '{}' (available: {})",
                    path.display(),
                    name,
                    sheet_names.join(", ")
                )
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| format!("{}: file contains no sheets", path.display()))?,
    };

    if sheet.is_none() && sheet_names.len() > 1 {
        log::warn!(
            "{}: {} sheets found, reading '{}'",
            path.display(),
            sheet_names.len(),
            sheet_name
        );
    }

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .take(MAX_COLS)
            .map(|c| data_to_cell(c).as_text())
            .collect(),
        None => return Ok(Table::default()),
    };

    let mut table = Table::new(headers);
    for (row_idx, row) in rows.enumerate() {
        if row_idx >= MAX_ROWS {
            log::warn!(
                "sheet '{}' truncated at {} data rows",
                sheet_name,
                MAX_ROWS
            );
            break;
        }
        let cells: Vec<Cell> = row.iter().take(MAX_COLS).map(data_to_cell).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    log::debug!(
        "{}: read {} row(s) x {} column(s) from '{}'",
        path.display(),
        table.len(),
        table.headers.len(),
        sheet_name
    );
    Ok(table)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(_) => Cell::Empty,
        Data::DateTime(dt) => datetime_cell(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Date-formatted serial to a cell.
///
/// Whole dates become `Date`. A time of day (serial below 1) becomes its
/// `HH:MM:SS` text, so a duration typed as a clock value reads as text
/// rather than as a fraction of a day.
fn datetime_cell(serial: f64) -> Cell {
    if let Some(value) = serial_to_datetime(serial) {
        return Cell::Date(value);
    }
    if serial.is_finite() && (0.0..1.0).contains(&serial) {
        let seconds = (serial * 86_400.0).round() as u32;
        if let Some(time) = NaiveTime::from_num_seconds_from_midnight_opt(seconds % 86_400, 0) {
            return Cell::Text(time.format("%H:%M:%S").to_string());
        }
    }
    Cell::Number(serial)
}

/// Export a table as a single-sheet .xlsx file.
pub fn export(table: &Table, path: &Path, sheet_name: &str) -> Result<(), String> {
    let mut xlsx_workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = xlsx_workbook
        .add_worksheet()
        .set_name(sheet_name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", sheet_name, e))?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| format!("Failed to write header '{}': {}", header, e))?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row32 = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col16 = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Number(n) => {
                    worksheet
                        .write_number(row32, col16, *n)
                        .map_err(|e| format!("Failed to write cell: {}", e))?;
                }
                other => {
                    worksheet
                        .write_string(row32, col16, other.as_text())
                        .map_err(|e| format!("Failed to write cell: {}", e))?;
                }
            }
        }
    }

    worksheet.autofit();

    xlsx_workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(())
}
