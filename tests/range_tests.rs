// Range validator and date parsing tests

mod common;

use common::*;
use telemetry_reports::error::ReportError;
use telemetry_reports::models::DataBounds;
use telemetry_reports::reports::range::{ReportWindow, parse_day, parse_instant, validate};

fn bounds() -> Option<DataBounds> {
    Some(DataBounds {
        min: at(2024, 6, 1, 0, 0),
        max: at(2024, 7, 31, 23, 0),
    })
}

#[test]
fn validate_accepts_start_equal_to_data_min() {
    let b = bounds().unwrap();
    assert!(validate(b.min, b.min + HOUR, bounds()).is_ok());
}

#[test]
fn validate_rejects_start_one_ms_before_data_min() {
    let b = bounds().unwrap();
    let err = validate(b.min - 1, b.min + HOUR, bounds()).unwrap_err();
    match err {
        ReportError::OutOfRange {
            valid_min,
            valid_max,
        } => {
            assert_eq!(valid_min, date(2024, 6, 1));
            assert_eq!(valid_max, date(2024, 7, 31));
        }
        other => panic!("expected OutOfRange, got {:?}", other),
    }
}

#[test]
fn validate_end_bound_is_inclusive() {
    let b = bounds().unwrap();
    assert!(validate(b.min, b.max, bounds()).is_ok());
    assert!(matches!(
        validate(b.min, b.max + 1, bounds()),
        Err(ReportError::OutOfRange { .. })
    ));
}

#[test]
fn validate_out_of_range_message_names_valid_dates() {
    let err = validate(0, 1, bounds()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Date range should be between 2024-06-01 and 2024-07-31."
    );
}

#[test]
fn validate_inverted_range_is_distinct_error() {
    let b = bounds().unwrap();
    let err = validate(b.min + HOUR, b.min, bounds()).unwrap_err();
    assert!(matches!(err, ReportError::InvertedRange { .. }));
    assert!(err.is_bad_request());
}

#[test]
fn validate_empty_store_is_not_a_range_violation() {
    let err = validate(0, 1, None).unwrap_err();
    assert!(matches!(err, ReportError::EmptyStore));
    assert!(err.is_no_data());
    assert!(!err.is_bad_request());
}

#[test]
fn parse_instant_accepts_date_as_utc_midnight() {
    assert_eq!(parse_instant("2024-07-01").unwrap(), at(2024, 7, 1, 0, 0));
}

#[test]
fn parse_instant_accepts_rfc3339() {
    assert_eq!(
        parse_instant("2024-07-01T05:30:00Z").unwrap(),
        at(2024, 7, 1, 5, 30)
    );
    assert_eq!(
        parse_instant("2024-07-01T07:30:00+02:00").unwrap(),
        at(2024, 7, 1, 5, 30)
    );
}

#[test]
fn parse_instant_rejects_garbage() {
    for bad in ["", "yesterday", "2024-13-01", "2024-02-30", "07/01/2024"] {
        let err = parse_instant(bad).unwrap_err();
        assert!(matches!(err, ReportError::InvalidDate(_)), "{:?}", bad);
    }
}

#[test]
fn parse_day_rejects_timestamps() {
    assert_eq!(parse_day("2024-06-05").unwrap(), date(2024, 6, 5));
    let err = parse_day("2024-06-05T00:00:00Z").unwrap_err();
    assert!(matches!(err, ReportError::InvalidDay(_)));
    assert!(err.is_bad_request());
}

#[test]
fn window_parse_rejects_start_after_end() {
    let err = ReportWindow::parse("2024-07-10", "2024-07-01").unwrap_err();
    assert!(matches!(err, ReportError::InvertedRange { .. }));
}

#[test]
fn window_parse_allows_single_instant() {
    let w = ReportWindow::parse("2024-07-01", "2024-07-01").unwrap();
    assert_eq!(w.start, w.end);
}
