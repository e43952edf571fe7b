//! Upload Workflow Integration Tests

use crate::helpers::{XlsxCell, sample_csv, session_from_csv, xlsx_workbook};
use autoviz::app::{Notice, NoticeLevel, VizSession};
use autoviz::constants::{TEMPORAL_NOTICE, UNSUPPORTED_NOTICE};
use autoviz::data::{DataError, load_path};
use autoviz::settings::Settings;
use autoviz::types::{ChartKind, DataType};
use autoviz::viz::{ColumnClass, Selection};
use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

fn titles(session: &VizSession, selection: Selection) -> Vec<String> {
    session
        .visualize(&selection)
        .unwrap()
        .charts
        .into_iter()
        .map(|c| c.title)
        .collect()
}

#[test]
fn test_upload_declares_column_types() {
    let session = session_from_csv(sample_csv());

    assert_eq!(
        session.column_names(),
        vec!["region", "units", "revenue", "day", "promo"]
    );
    assert_eq!(session.column_type("region"), Some(DataType::Text));
    assert_eq!(session.column_type("units"), Some(DataType::Number));
    assert_eq!(session.column_type("revenue"), Some(DataType::Number));
    assert_eq!(session.column_type("day"), Some(DataType::Date));
    assert_eq!(session.column_type("promo"), Some(DataType::Boolean));
    assert_eq!(session.column_type("missing"), None);
}

#[test]
fn test_preview_is_capped() {
    let session = session_from_csv(sample_csv());
    let preview = session.preview();

    assert_eq!(preview.total_rows, 5);
    assert_eq!(preview.rows.len(), 5);
    // Missing cells preview as blanks
    assert_eq!(preview.rows[3][1], "");
    assert_eq!(preview.rows[0][2], "120.5");
}

#[test]
fn test_numeric_workflow() {
    let session = session_from_csv(sample_csv());

    assert_eq!(
        titles(&session, Selection::new("units")),
        vec![
            "Histogram of units",
            "Box Plot of units",
            "Line Chart of units",
            "Violin Plot of units",
            "Scatter Plot: units vs revenue",
            "Correlation Heatmap",
        ]
    );

    let report = session.visualize(&Selection::new("units")).unwrap();
    assert_eq!(report.class, ColumnClass::Numeric);
    assert!(report.notices.is_empty());

    match &report.charts[0].kind {
        ChartKind::Histogram { values, .. } => {
            assert_eq!(values, &vec![Some(10.0), Some(7.0), Some(12.0), None, Some(9.0)]);
        }
        other => panic!("expected histogram, got {:?}", other),
    }
}

#[test]
fn test_categorical_workflow() {
    let session = session_from_csv(sample_csv());
    let report = session.visualize(&Selection::new("region")).unwrap();

    assert_eq!(report.class, ColumnClass::Categorical);
    assert_eq!(report.charts.len(), 3);

    match &report.charts[2].kind {
        ChartKind::Donut { counts, hole, .. } => {
            assert_eq!(counts.labels(), vec!["North", "South", "East"]);
            assert_eq!(counts.counts(), vec![3, 1, 1]);
            assert_eq!(*hole, 0.4);
        }
        other => panic!("expected donut, got {:?}", other),
    }
}

#[test]
fn test_temporal_workflow() {
    let session = session_from_csv(sample_csv());

    assert_eq!(
        session.secondary_choices("day").unwrap(),
        Some(vec!["units".to_string(), "revenue".to_string()])
    );

    let report = session
        .visualize(&Selection::new("day").with_second("revenue"))
        .unwrap();
    assert_eq!(report.class, ColumnClass::Temporal);
    assert_eq!(report.notices, vec![Notice::info(TEMPORAL_NOTICE)]);
    assert_eq!(report.charts.len(), 1);
    assert_eq!(report.charts[0].title, "Time Series: revenue over day");

    match &report.charts[0].kind {
        ChartKind::TimeSeries { x, y, .. } => {
            let first = NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            assert_eq!(x[0], Some(first));
            assert!(x.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(y, &vec![Some(80.0), Some(150.0), Some(120.5), Some(99.0), Some(60.25)]);
        }
        other => panic!("expected time series, got {:?}", other),
    }
}

#[test]
fn test_temporal_defaults_to_first_numeric() {
    let session = session_from_csv(sample_csv());
    assert_eq!(
        titles(&session, Selection::new("day")),
        vec!["Time Series: units over day"]
    );
}

#[test]
fn test_unsupported_workflow() {
    let session = session_from_csv(sample_csv());
    let report = session.visualize(&Selection::new("promo")).unwrap();

    assert!(!report.is_supported());
    assert!(report.charts.is_empty());
    assert_eq!(report.notices.len(), 1);
    assert_eq!(report.notices[0].level, NoticeLevel::Warning);
    assert_eq!(report.notices[0].message, UNSUPPORTED_NOTICE);
}

#[test]
fn test_invalid_second_column_is_rejected() {
    let session = session_from_csv(sample_csv());
    let err = session
        .visualize(&Selection::new("units").with_second("region"))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::InvalidSelection { .. })
    ));
}

#[test]
fn test_unknown_column_is_an_error() {
    let session = session_from_csv(sample_csv());
    let err = session.visualize(&Selection::new("nope")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_rejected_uploads() {
    let settings = Settings::default();

    let err = VizSession::from_upload("notes.txt", b"a,b\n1,2\n", settings.clone()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::UnsupportedFormat(_))
    ));

    assert!(VizSession::from_upload("broken.xlsx", b"not a workbook", settings.clone()).is_err());
    assert!(VizSession::from_upload("empty.csv", b"", settings).is_err());
}

#[test]
fn test_load_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    fs::write(&path, sample_csv()).unwrap();

    let source = load_path(&path, &Settings::default()).unwrap();
    assert_eq!(source.row_count(), 5);
    assert_eq!(source.numeric_columns(), vec!["units", "revenue"]);
}

#[test]
fn test_single_numeric_column_has_no_scatter() {
    let session = session_from_csv("score\n1\n2\n3\n");

    assert_eq!(session.secondary_choices("score").unwrap(), None);
    assert_eq!(
        titles(&session, Selection::new("score")),
        vec![
            "Histogram of score",
            "Box Plot of score",
            "Line Chart of score",
            "Violin Plot of score",
        ]
    );
}

#[test]
fn test_late_text_row_keeps_upload() {
    // Longer than the default dtype sample; the last row is not a number
    let mut csv = String::from("code,qty\n");
    for i in 0..1_100 {
        csv.push_str(&format!("{},{}\n", i, i % 7));
    }
    csv.push_str("abc,3\n");

    let session = session_from_csv(&csv);
    assert_eq!(session.source().row_count(), 1_101);
    assert_eq!(session.column_type("code"), Some(DataType::Text));
    assert_eq!(session.column_type("qty"), Some(DataType::Number));

    let report = session.visualize(&Selection::new("code")).unwrap();
    assert_eq!(report.class, ColumnClass::Categorical);
}

#[test]
fn test_formatted_numbers_in_text_are_categorical() {
    let session = session_from_csv("price,n\n\"$1,200\",1\n12%,2\n$15,3\n");
    assert_eq!(session.column_type("price"), Some(DataType::Text));
    let report = session.visualize(&Selection::new("price")).unwrap();
    assert_eq!(report.class, ColumnClass::Categorical);
}

#[test]
fn test_xlsx_upload_workflow() {
    use XlsxCell::{Date, Number, Text};

    // 45292 is 2024-01-01 in Excel's serial day numbering
    let bytes = xlsx_workbook(&[
        vec![Text("day"), Text("units"), Text("region")],
        vec![Date(45294.0), Number(10.0), Text("North")],
        vec![Date(45292.0), Number(7.0), Text("South")],
        vec![Date(45293.0), Number(12.0), Text("North")],
    ]);
    let session = VizSession::from_upload("sales.xlsx", &bytes, Settings::default()).unwrap();

    assert_eq!(session.column_names(), vec!["day", "units", "region"]);
    assert_eq!(session.column_type("day"), Some(DataType::Date));
    assert_eq!(session.column_type("units"), Some(DataType::Number));
    assert_eq!(session.column_type("region"), Some(DataType::Text));
    assert_eq!(session.preview().rows[0][0], "2024-01-03 00:00:00");

    let report = session.visualize(&Selection::new("day")).unwrap();
    assert_eq!(report.class, ColumnClass::Temporal);
    assert_eq!(report.charts[0].title, "Time Series: units over day");
    match &report.charts[0].kind {
        ChartKind::TimeSeries { x, y, .. } => {
            let first = NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            assert_eq!(x[0], Some(first));
            assert_eq!(y, &vec![Some(7.0), Some(12.0), Some(10.0)]);
        }
        other => panic!("expected time series, got {:?}", other),
    }

    let report = session.visualize(&Selection::new("region")).unwrap();
    assert_eq!(report.class, ColumnClass::Categorical);
}

#[test]
fn test_xlsx_date_text_is_categorical() {
    use XlsxCell::{Empty, Number, Text};

    let bytes = xlsx_workbook(&[
        vec![Text("when"), Text("value")],
        vec![Text("2024-01-01"), Number(1.0)],
        vec![Empty, Number(2.0)],
        vec![Text("2024-02-01"), Number(3.0)],
    ]);
    let session = VizSession::from_upload("dates.xlsx", &bytes, Settings::default()).unwrap();

    assert_eq!(session.column_type("when"), Some(DataType::Text));
    let report = session.visualize(&Selection::new("when")).unwrap();
    assert_eq!(report.class, ColumnClass::Categorical);
    assert_eq!(session.secondary_choices("when").unwrap(), None);
}
