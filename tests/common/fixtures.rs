//! Survey fixtures
//!
//! Six respondents answering two X items, two Y items, an age question and a
//! free-text comment. Respondent 4 skipped every X item and respondent 6 left
//! the second Y item blank.

pub const SURVEY_HEADERS: [&str; 6] = ["X1", "x2", " Y1", "y2", "age", "comment"];

/// Rows as raw text, blank strings for unanswered items
pub fn survey_rows() -> Vec<[&'static str; 6]> {
    vec![
        ["1", "2", "5", "4", "23", "great"],
        ["2", "3", "4", "4", "31", "ok"],
        ["3", "3", "3", "2", "27", "fine"],
        ["", "", "2", "1", "45", "meh"],
        ["5", "4", "1", "1", "38", "bad"],
        ["4", "5", "2", "", "52", "ok"],
    ]
}

/// The survey as CSV text
pub fn survey_csv() -> String {
    let mut out = SURVEY_HEADERS.join(",");
    out.push('\n');
    for row in survey_rows() {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Write the survey as an xlsx workbook; numbers are written as numeric cells
#[cfg(feature = "excel")]
pub fn write_survey_xlsx(path: &std::path::Path) {
    use simple_excel_writer::{Row, Workbook};

    let mut workbook = Workbook::create(path.to_str().expect("temp path is not UTF-8"));
    let mut sheet = workbook.create_sheet("Responses");

    workbook
        .write_sheet(&mut sheet, |sheet_writer| {
            sheet_writer.append_row(Row::from_iter(SURVEY_HEADERS.iter().cloned()))?;
            for row in survey_rows() {
                let mut excel_row = Row::new();
                for cell in row.iter() {
                    match cell.parse::<f64>() {
                        Ok(v) => excel_row.add_cell(v),
                        Err(_) if cell.is_empty() => excel_row.add_cell(()),
                        Err(_) => excel_row.add_cell(*cell),
                    }
                }
                sheet_writer.append_row(excel_row)?;
            }
            Ok(())
        })
        .expect("Failed to write sheet");

    workbook.close().expect("Failed to close workbook");
}
