//! Table loading
//!
//! Uploaded bytes are decoded into a [`Table`]. The first row is the header,
//! the first sheet is the only sheet read, and header cells are normalized to
//! unique canonical strings before any other component sees them.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use log::info;

use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::table::{Column, Table};

pub use self::csv::read_csv_bytes;
#[cfg(feature = "excel")]
pub use self::excel::read_excel_bytes;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Spreadsheet encodings the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Office Open XML workbook
    Xlsx,
    /// Legacy BIFF workbook
    Xls,
    /// UTF-8 comma separated values
    Csv,
}

impl SourceFormat {
    /// Guess the format from leading magic bytes
    pub fn detect(bytes: &[u8]) -> SourceFormat {
        if bytes.starts_with(&ZIP_MAGIC) {
            SourceFormat::Xlsx
        } else if bytes.starts_with(&OLE_MAGIC) {
            SourceFormat::Xls
        } else {
            SourceFormat::Csv
        }
    }

    /// Format implied by a file extension, if recognized
    pub fn from_extension(extension: &str) -> Option<SourceFormat> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(SourceFormat::Xlsx),
            "xls" => Some(SourceFormat::Xls),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Xls => "xls",
            SourceFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Decode uploaded bytes, detecting the format from their content
pub fn load(bytes: &[u8]) -> Result<Table> {
    load_with_format(bytes, SourceFormat::detect(bytes))
}

/// Decode uploaded bytes of a known format
///
/// Fails with [`Error::EmptyTable`] when the decoded table has no rows or no
/// columns.
pub fn load_with_format(bytes: &[u8], format: SourceFormat) -> Result<Table> {
    if bytes.is_empty() {
        return Err(Error::EmptyTable);
    }

    let table = match format {
        SourceFormat::Csv => read_csv_bytes(bytes)?,
        #[cfg(feature = "excel")]
        SourceFormat::Xlsx | SourceFormat::Xls => read_excel_bytes(bytes, format)?,
        #[cfg(not(feature = "excel"))]
        SourceFormat::Xlsx | SourceFormat::Xls => {
            return Err(Error::UnsupportedFormat(format!(
                "{} support requires the `excel` feature",
                format
            )))
        }
    };

    if table.is_empty() {
        return Err(Error::EmptyTable);
    }

    info!(
        "loaded {} table: {} rows x {} columns",
        format,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Read a spreadsheet file; the extension wins over content sniffing
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
        .unwrap_or_else(|| SourceFormat::detect(&bytes));
    load_with_format(&bytes, format)
}

/// Text markers read as missing values
pub const NA_TOKENS: [&str; 17] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

/// Whether a raw text cell is an NA marker
pub fn is_na_token(raw: &str) -> bool {
    NA_TOKENS.contains(&raw.trim())
}

/// Make header names canonical and unique
///
/// Names are kept as written, surrounding whitespace included. Blank headers
/// become `Unnamed: {index}`; repeated names get `.1`, `.2`, ... suffixes in
/// order of appearance.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = Vec::new();
    for (i, header) in raw.into_iter().enumerate() {
        let header = header.as_ref();
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            header.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

/// Assemble a table from a header and row-major cells, padding short rows
pub(crate) fn build_table(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Table> {
    let mut data: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); headers.len()];
    for row in rows {
        let mut cells = row.into_iter();
        for column in data.iter_mut() {
            column.push(cells.next().unwrap_or(CellValue::Missing));
        }
    }

    Table::from_columns(
        headers
            .into_iter()
            .zip(data)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(SourceFormat::detect(b"PK\x03\x04rest"), SourceFormat::Xlsx);
        assert_eq!(
            SourceFormat::detect(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0]),
            SourceFormat::Xls
        );
        assert_eq!(SourceFormat::detect(b"a,b\n1,2\n"), SourceFormat::Csv);
    }

    #[test]
    fn test_normalize_headers() {
        let names = normalize_headers(["a", "", "a", " b", "a", "  "]);
        assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", " b", "a.2", "Unnamed: 5"]);
    }

    #[test]
    fn test_build_table_pads_short_rows() {
        let table = build_table(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Number(1.0)], vec![CellValue::Number(2.0), "t".into()]],
        )
        .unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("b").unwrap().get(0), Some(&CellValue::Missing));
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert!(matches!(load(b""), Err(Error::EmptyTable)));
    }
}
