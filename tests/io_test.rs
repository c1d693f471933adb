mod common;

use common::{survey_csv, write_temp_file, TempSurveyDir};
use surveyrs::io::{self, normalize_headers, SourceFormat};
use surveyrs::{CellValue, Error};

#[test]
fn test_load_csv_bytes() {
    let table = io::load(survey_csv().as_bytes()).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["X1", "x2", " Y1", "y2", "age", "comment"]
    );
    assert_eq!(table.row_count(), 6);
    assert_eq!(table.column("X1").unwrap().get(3), Some(&CellValue::Missing));
    assert_eq!(
        table.column("comment").unwrap().get(0),
        Some(&CellValue::Text("great".into()))
    );
}

#[test]
fn test_empty_inputs_are_rejected() {
    assert!(matches!(io::load(b""), Err(Error::EmptyTable)));
    assert!(matches!(io::load(b"a,b\n"), Err(Error::EmptyTable)));
}

#[test]
fn test_invalid_utf8_csv_is_a_load_error() {
    let err = io::load(b"a,b\n\xff\xfe,1\n").unwrap_err();
    assert!(err.is_load_error());
}

#[test]
fn test_duplicate_and_blank_headers() {
    let table = io::load(b"q,,q\n1,2,3\n").unwrap();
    assert_eq!(table.column_names(), vec!["q", "Unnamed: 1", "q.1"]);
    assert_eq!(normalize_headers(["", ""]), vec!["Unnamed: 0", "Unnamed: 1"]);
}

#[test]
fn test_ragged_rows_are_padded() {
    let table = io::load(b"a,b,c\n1,2\n4,5,6\n").unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("c").unwrap().get(0), Some(&CellValue::Missing));
}

#[test]
fn test_read_table_uses_extension() {
    let dir = TempSurveyDir::new("io_extension").unwrap();
    let path = write_temp_file(&dir, "survey.csv", survey_csv().as_bytes());
    let table = io::read_table(&path).unwrap();
    assert_eq!(table.column_count(), 6);

    let missing = dir.file("absent.csv");
    assert!(matches!(io::read_table(&missing), Err(Error::Io(_))));
}

#[test]
fn test_format_from_extension() {
    assert_eq!(SourceFormat::from_extension("XLSX"), Some(SourceFormat::Xlsx));
    assert_eq!(SourceFormat::from_extension("xls"), Some(SourceFormat::Xls));
    assert_eq!(SourceFormat::from_extension("csv"), Some(SourceFormat::Csv));
    assert_eq!(SourceFormat::from_extension("ods"), None);
}

#[cfg(feature = "excel")]
mod excel {
    use super::common::{write_survey_xlsx, TempSurveyDir};
    use surveyrs::classify::classify_numeric;
    use surveyrs::io::{self, SourceFormat};
    use surveyrs::{CellValue, Error, Session};

    #[test]
    fn test_load_xlsx_workbook() {
        let dir = TempSurveyDir::new("xlsx_load").unwrap();
        let path = dir.file("survey.xlsx");
        write_survey_xlsx(&path);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(SourceFormat::detect(&bytes), SourceFormat::Xlsx);

        let mut table = io::load(&bytes).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["X1", "x2", " Y1", "y2", "age", "comment"]
        );
        assert_eq!(table.row_count(), 6);
        assert_eq!(table.column("age").unwrap().get(0), Some(&CellValue::Number(23.0)));

        let numeric = classify_numeric(&mut table);
        assert_eq!(numeric, vec!["X1", "x2", " Y1", "y2", "age"]);
        assert_eq!(table.column("X1").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_session_upload_xlsx_path() {
        let dir = TempSurveyDir::new("xlsx_session").unwrap();
        let path = dir.file("survey.xlsx");
        write_survey_xlsx(&path);

        let mut session = Session::default();
        session.upload_path(&path).unwrap();
        assert!(session.can_correlate());
    }

    #[test]
    fn test_corrupt_workbook_is_a_load_error() {
        let err = io::load(b"PK\x03\x04garbage").unwrap_err();
        assert!(matches!(err, Error::Load(_)));
        assert!(err.is_load_error());
    }
}
