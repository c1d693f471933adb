use csv::{ReaderBuilder, Trim};

use crate::cell::{try_parse_number, CellValue};
use crate::error::Result;
use crate::table::Table;

use super::{build_table, is_na_token, normalize_headers};

/// Read a CSV document with a header row
///
/// Cells that parse as numbers become `Number`, blank cells and NA markers
/// become `Missing`, everything else stays `Text`. Rows may be shorter than the header.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(bytes);

    let headers = normalize_headers(rdr.headers()?.iter());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(parse_cell).collect::<Vec<_>>());
    }

    build_table(headers, rows)
}

fn parse_cell(raw: &str) -> CellValue {
    if is_na_token(raw) {
        return CellValue::Missing;
    }
    match try_parse_number(raw) {
        CellValue::Missing => CellValue::text(raw),
        number => number,
    }
}
