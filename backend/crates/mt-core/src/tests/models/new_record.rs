use crate::{CoreError, NewRecord};

use googletest::prelude::*;

#[test]
fn given_messy_car_identifier_when_parsed_then_normalized() {
    let record = NewRecord::parse(" 12가 3456 ", "2024-01-10", " 엔진오일교체 ", " 5W-30 ").unwrap();

    assert_that!(record.car_identifier, eq("12가3456"));
    assert_that!(record.date, eq("2024-01-10"));
    assert_that!(record.record_type, eq("엔진오일교체"));
    assert_that!(record.description, eq("5W-30"));
}

#[test]
fn given_empty_description_when_parsed_then_ok() {
    let result = NewRecord::parse("12가3456", "2024-01-10", "타이어교체", "");

    assert_that!(result, ok(anything()));
}

#[test]
fn given_blank_required_field_when_parsed_then_validation_error_names_field() {
    let cases = [
        ("   ", "2024-01-10", "타이어교체", "car_identifier"),
        ("12가3456", "", "타이어교체", "date"),
        ("12가3456", "2024-01-10", "  ", "record_type"),
    ];

    for (car, date, kind, expected_field) in cases {
        let err = NewRecord::parse(car, date, kind, "desc").unwrap_err();
        match err {
            CoreError::Validation { field, .. } => {
                assert_that!(field, some(eq(expected_field)));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

#[test]
fn given_malformed_date_when_parsed_then_invalid_date() {
    let err = NewRecord::parse("12가3456", "2024/01/10", "타이어교체", "").unwrap_err();

    assert!(matches!(err, CoreError::InvalidDate { .. }));
}
