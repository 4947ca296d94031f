// File I/O operations: decode input tables, encode the result table.

pub mod csv;
pub mod xlsx;

use std::path::Path;

use rollcall_recon::Table;

/// Input/output file kinds recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Tsv,
    Spreadsheet,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(FileKind::Csv),
            "tsv" | "tab" => Ok(FileKind::Tsv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(FileKind::Spreadsheet),
            "" => Err(format!("{}: file has no extension", path.display())),
            other => Err(format!("{}: unsupported file type '.{other}'", path.display())),
        }
    }
}

/// Read a table from a CSV/TSV or spreadsheet file.
///
/// `sheet` selects a worksheet by name; spreadsheets default to the first one.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table, String> {
    match FileKind::from_path(path)? {
        FileKind::Csv => crate::csv::import(path),
        FileKind::Tsv => crate::csv::import_tsv(path),
        FileKind::Spreadsheet => xlsx::import(path, sheet),
    }
}

/// Write a table. `.xlsx` gets a single worksheet named `sheet_name`.
pub fn write_table(table: &Table, path: &Path, sheet_name: &str) -> Result<(), String> {
    match FileKind::from_path(path)? {
        FileKind::Csv => crate::csv::export(table, path),
        FileKind::Tsv => crate::csv::export_tsv(table, path),
        FileKind::Spreadsheet => {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
            if !ext.eq_ignore_ascii_case("xlsx") {
                return Err(format!(
                    "{}: only .xlsx is supported for spreadsheet output",
                    path.display()
                ));
            }
            xlsx::export(table, path, sheet_name)
        }
    }
}
