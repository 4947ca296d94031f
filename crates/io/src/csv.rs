// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use rollcall_recon::Table;

pub fn import(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
}

/// Delimiters tried when sniffing, in preference order on a tie.
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of leading records inspected by `sniff_delimiter`.
const SNIFF_RECORDS: usize = 10;

/// Pick the delimiter that splits the header into the most columns while
/// keeping the following records the same width. Falls back to comma.
fn sniff_delimiter(content: &str) -> u8 {
    DELIMITER_CANDIDATES
        .iter()
        .copied()
        .filter_map(|delim| {
            let widths = record_widths(content, delim);
            let header_width = *widths.first()?;
            if header_width < 2 {
                return None;
            }
            let agreeing = widths.iter().filter(|&&w| w == header_width).count();
            Some((delim, agreeing * header_width))
        })
        .fold(None, |best: Option<(u8, usize)>, current| match best {
            Some((_, score)) if current.1 <= score => best,
            _ => Some(current),
        })
        .map_or(b',', |(delim, _)| delim)
}

/// Field counts of the first records when split on `delim`. Quoted fields
/// may span lines.
fn record_widths(content: &str, delim: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
        .records()
        .take(SNIFF_RECORDS)
        .map_while(Result::ok)
        .map(|record| record.len())
        .collect()
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Excel-exported CSVs are commonly Windows-1252
            log::debug!("{}: not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Table, String> {
    Table::from_delimited(content, delimiter).map_err(|e| e.to_string())
}

pub fn export(table: &Table, path: &Path) -> Result<(), String> {
    export_with_delimiter(table, path, b',')
}

pub fn export_tsv(table: &Table, path: &Path) -> Result<(), String> {
    export_with_delimiter(table, path, b'\t')
}

fn export_with_delimiter(table: &Table, path: &Path, delimiter: u8) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    writer.write_record(&table.headers).map_err(|e| e.to_string())?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|c| c.as_text()))
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_recon::Cell;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sniff_roster_export_delimiters() {
        let roster = "Guest Editor Name,Email Address,Date of entry\nJane Doe,jane@x.org,2026-01-02\n";
        assert_eq!(sniff_delimiter(roster), b',');

        // European Excel exports use semicolons; the comma in the quoted name is data
        let roster = "Guest Editor Name;Email Address\n\"Garcia, Maria\";maria@x.org\nLi Wei;li@x.org\n";
        assert_eq!(sniff_delimiter(roster), b';');

        let session = "Email Address\tFirst Name\tLast Name\tTime in Session\na@x.org\tJane\tDoe\t1 hour\n";
        assert_eq!(sniff_delimiter(session), b'\t');
    }

    #[test]
    fn sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("Email Address\na@x.org\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn sniff_prefers_consistent_widths() {
        // Commas inside free-text durations are data, not delimiters
        let session = "Email Address|Time in Session\na@x.org|1 hour, 5 minutes\nb@x.org|45\n";
        assert_eq!(sniff_delimiter(session), b'|');
    }

    #[test]
    fn test_semicolon_csv_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        fs::write(&path, "Guest Editor Name;Email Address\nJane Doe;jane@x.org\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.headers, vec!["Guest Editor Name", "Email Address"]);
        assert_eq!(table.rows[0], vec![Cell::text("Jane Doe"), Cell::text("jane@x.org")]);
    }

    #[test]
    fn test_numeric_fields_inferred() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.csv");
        fs::write(&path, "Email Address,Time in Session\na@x.org,45\nb@x.org,1 hour\nc@x.org,\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.rows[0][1], Cell::Number(45.0));
        assert_eq!(table.rows[1][1], Cell::text("1 hour"));
        assert_eq!(table.rows[2][1], Cell::Empty);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "José" with 0xE9 for é
        fs::write(&path, b"Name,Email\nJos\xe9 Ruiz,j@x.org\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.rows[0][0], Cell::text("José Ruiz"));
    }

    #[test]
    fn test_tsv_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        let mut table = Table::new(vec!["Guest Editor Name".into(), "Time in Session".into()]);
        table.push_row(vec![Cell::text("Jane Doe"), Cell::text("60 minutes")]);
        table.push_row(vec![Cell::text("Doe, John"), Cell::text("N/A")]);

        export_tsv(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains('\t'), "TSV should contain tab characters");

        let imported = import_tsv(&path).unwrap();
        assert_eq!(imported, table);
    }

    #[test]
    fn test_csv_export_quotes_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = Table::new(vec!["Guest Editor Name".into()]);
        table.push_row(vec![Cell::text("Public, Jane")]);
        export(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Guest Editor Name\n\"Public, Jane\"\n");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = import(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.starts_with("cannot read"));
    }
}
