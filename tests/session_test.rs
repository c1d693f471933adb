mod common;

use common::{survey_csv, write_temp_file, TempSurveyDir};
use surveyrs::classify::GroupKind;
use surveyrs::{
    AnalyzerConfig, CorrelationMethod, CorrelationRefusal, Error, Session, TotalsOutcome,
};

fn loaded_session() -> Session {
    let mut session = Session::default();
    session.upload(survey_csv().as_bytes()).unwrap();
    session
}

#[test]
fn test_upload_reports_numeric_columns() {
    let session = loaded_session();
    assert_eq!(session.numeric_columns(), ["X1", "x2", " Y1", "y2", "age"]);
    assert_eq!(session.default_selection().len(), 5);
    assert_eq!(session.table().unwrap().row_count(), 6);
    assert_eq!(session.preview(2).unwrap().row_count(), 2);
}

#[test]
fn test_descriptive_report_for_all_groups() {
    let session = loaded_session();
    let report = session.analyze_descriptive(&session.default_selection()).unwrap();

    assert_eq!(report.groups.x, vec!["X1", "x2"]);
    assert_eq!(report.groups.y, vec![" Y1", "y2"]);
    assert_eq!(report.groups.other, vec!["age"]);
    assert_eq!(report.summary.columns().len(), 5);

    let kinds: Vec<GroupKind> = report.group_charts.iter().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![GroupKind::X, GroupKind::Y, GroupKind::Other, GroupKind::Totals]
    );

    let totals = report.group(GroupKind::Totals).unwrap();
    assert_eq!(totals.title(), "Total Scores");
    assert_eq!(totals.charts.len(), 2);

    let totals_summary = report.totals_summary.as_ref().unwrap();
    assert_eq!(totals_summary.get("count", "X_TOTAL"), Some(5.0));
    assert_eq!(totals_summary.get("count", "Y_TOTAL"), Some(6.0));
}

#[test]
fn test_selection_without_x_or_y_has_no_totals() {
    let session = loaded_session();
    let report = session.analyze_descriptive(&["age"]).unwrap();

    assert!(report.total_columns().is_empty());
    assert!(report.totals_summary.is_none());
    assert!(report
        .totals
        .iter()
        .all(|t| matches!(t, TotalsOutcome::Skipped { .. })));
    assert_eq!(report.group_charts.len(), 1);
    assert_eq!(report.group_charts[0].kind, GroupKind::Other);
}

#[test]
fn test_selection_must_be_numeric_and_present() {
    let session = loaded_session();
    let empty: [&str; 0] = [];
    assert!(matches!(
        session.analyze_descriptive(&empty),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        session.analyze_descriptive(&["missing"]),
        Err(Error::ColumnNotFound(_))
    ));
    assert!(matches!(
        session.analyze_descriptive(&["comment"]),
        Err(Error::NonNumericColumn(_))
    ));
}

#[test]
fn test_totals_are_not_correlation_candidates() {
    let session = loaded_session();
    session.analyze_descriptive(&["X1", "x2"]).unwrap();
    assert_eq!(session.correlation_candidates("X1"), vec!["x2", " Y1", "y2", "age"]);
    assert!(!session.table().unwrap().has_column("X_TOTAL"));
}

#[test]
fn test_correlate_through_session() {
    let session = loaded_session();
    let outcome = session
        .correlate("X1", "age", CorrelationMethod::Pearson)
        .unwrap();
    assert_eq!(outcome.unwrap().result.sample_size, 5);

    let refusal = session
        .correlate("X1", "comment", CorrelationMethod::Pearson)
        .unwrap()
        .unwrap_err();
    assert_eq!(refusal, CorrelationRefusal::InsufficientData { paired: 0 });
}

#[test]
fn test_new_upload_replaces_table() {
    let mut session = loaded_session();
    session.upload(b"q1,q2\n1,2\n3,4\n5,9\n").unwrap();
    assert_eq!(session.numeric_columns(), ["q1", "q2"]);
    assert!(!session.table().unwrap().has_column("X1"));
}

#[test]
fn test_failed_upload_leaves_session_ready() {
    let mut session = loaded_session();
    let err = session.upload(b"only_header\n").unwrap_err();
    assert!(matches!(err, Error::EmptyTable));
    assert!(err.is_load_error());
    assert!(session.table().is_none());
    assert!(!session.can_correlate());

    session.upload(survey_csv().as_bytes()).unwrap();
    assert!(session.has_table());
}

#[test]
fn test_upload_from_path() {
    let dir = TempSurveyDir::new("session_path").unwrap();
    let path = write_temp_file(&dir, "survey.csv", survey_csv().as_bytes());

    let mut session = Session::default();
    let table = session.upload_path(&path).unwrap();
    assert_eq!(table.column_count(), 6);
}

#[test]
fn test_custom_config() {
    let config = AnalyzerConfig {
        default_selection_limit: 2,
        x_total_name: "X_SUM".into(),
        ..AnalyzerConfig::default()
    };
    let mut session = Session::new(config).unwrap();
    session.upload(survey_csv().as_bytes()).unwrap();
    assert_eq!(session.default_selection(), vec!["X1", "x2"]);

    let report = session.analyze_descriptive(&session.default_selection()).unwrap();
    assert_eq!(report.total_columns(), vec!["X_SUM"]);
}

#[test]
fn test_invalid_config_rejected() {
    let config = AnalyzerConfig {
        numeric_threshold: 0.0,
        ..AnalyzerConfig::default()
    };
    assert!(matches!(Session::new(config), Err(Error::Config(_))));
}

#[test]
fn test_sparse_numeric_item_is_selectable_and_correlatable() {
    // x3 is an optional item answered by three respondents out of eight
    let mut session = Session::default();
    session
        .upload(b"x1,x3,y1\n1,2,3\n2,,4\n3,5,6\n4,,5\n5,,7\n6,7,9\n7,,8\n8,,10\n")
        .unwrap();

    assert_eq!(session.numeric_columns(), ["x1", "x3", "y1"]);
    assert_eq!(session.correlation_candidates("y1"), vec!["x1", "x3"]);

    let report = session.analyze_descriptive(&["x3"]).unwrap();
    assert_eq!(report.summary.get("count", "x3"), Some(3.0));
    assert_eq!(report.total_columns(), vec!["X_TOTAL"]);

    let correlation = session
        .correlate("x3", "y1", CorrelationMethod::Pearson)
        .unwrap()
        .unwrap();
    assert_eq!(correlation.result.sample_size, 3);
}

#[test]
fn test_uploaded_total_column_is_recomputed() {
    let mut session = Session::default();
    session
        .upload(b"x1,x2,X_TOTAL,y1\n1,2,99,4\n2,3,99,5\n3,1,99,6\n")
        .unwrap();

    let report = session.analyze_descriptive(&["x1", "x2", "y1"]).unwrap();
    assert_eq!(report.total_columns(), vec!["X_TOTAL", "Y_TOTAL"]);
    assert_eq!(report.table.column_count(), 5);
    assert_eq!(
        report.table.column("X_TOTAL").unwrap().numeric_values(),
        vec![3.0, 5.0, 4.0]
    );

    let totals_summary = report.totals_summary.as_ref().unwrap();
    assert_eq!(totals_summary.get("mean", "X_TOTAL"), Some(4.0));
    assert_eq!(
        session.table().unwrap().column("X_TOTAL").unwrap().numeric_values(),
        vec![99.0, 99.0, 99.0]
    );
}
