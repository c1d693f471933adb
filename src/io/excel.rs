use std::io::Cursor;

use calamine::{open_workbook_from_rs, DataType, Range, Reader, Xls, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::table::Table;

use super::{build_table, is_na_token, normalize_headers, SourceFormat};

/// Read the first worksheet of an xlsx or xls workbook held in memory
///
/// The first row is the header. Integer and float cells become numbers,
/// boolean cells become `True`/`False` text, date cells become
/// `YYYY-MM-DD HH:MM:SS` text, error and empty cells become missing.
///
/// # Example
///
/// ```no_run
/// use surveyrs::io::{read_excel_bytes, SourceFormat};
///
/// let bytes = std::fs::read("survey.xlsx").unwrap();
/// let table = read_excel_bytes(&bytes, SourceFormat::Xlsx).unwrap();
/// println!("{}", table.head(5));
/// ```
pub fn read_excel_bytes(bytes: &[u8], format: SourceFormat) -> Result<Table> {
    let range = match format {
        SourceFormat::Xlsx => first_sheet(
            open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(bytes))
                .map_err(|e| Error::Load(format!("could not open workbook: {}", e)))?,
        )?,
        SourceFormat::Xls => first_sheet(
            open_workbook_from_rs::<Xls<_>, _>(Cursor::new(bytes))
                .map_err(|e| Error::Load(format!("could not open workbook: {}", e)))?,
        )?,
        SourceFormat::Csv => {
            return Err(Error::UnsupportedFormat(
                "CSV data is not an Excel workbook".to_string(),
            ))
        }
    };

    let mut rows = range.rows();
    let header = rows.next().ok_or(Error::EmptyTable)?;
    let headers = normalize_headers(header.iter().map(header_text));
    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    build_table(headers, data)
}

fn first_sheet<RS, R>(mut workbook: R) -> Result<Range<DataType>>
where
    R: Reader<RS>,
    R::Error: std::fmt::Display,
    RS: std::io::Read + std::io::Seek,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Load("workbook has no worksheets".to_string()))?
        .map_err(|e| Error::Load(format!("could not read first worksheet: {}", e)))
}

fn header_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty | DataType::Error(_) => String::new(),
        DataType::DateTime(serial) => excel_date_text(*serial),
        other => other.to_string(),
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(v) => CellValue::Number(*v as f64),
        DataType::Float(v) => CellValue::number(*v),
        DataType::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
        DataType::String(s) if is_na_token(s) => CellValue::Missing,
        DataType::String(s) => CellValue::text(s.as_str()),
        DataType::DateTime(serial) => CellValue::text(excel_date_text(*serial)),
        DataType::Error(_) | DataType::Empty => CellValue::Missing,
        other => CellValue::text(other.to_string()),
    }
}

/// Excel serial day number as date-time text (1900 date system)
fn excel_date_text(serial: f64) -> String {
    excel_serial_to_datetime(serial)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| serial.to_string())
}

fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}
