// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn parses_simple_weekday_range() {
    let window = parse("9:00 - 17:00 every weekday").expect("valid window");
    assert_eq!(window.start, "09:00");
    assert_eq!(window.end, "17:00");
    assert_eq!(window.recurrence, "weekday");
    assert!(!window.always_on);
    assert!(!window.always_off);
}

#[test]
fn applies_pm_modifier_to_second_time_only() {
    let window = parse("9am - 5pm every day").expect("valid window");
    assert_eq!(window.start, "09:00");
    assert_eq!(window.end, "17:00");
}

#[test]
fn twelve_am_normalizes_to_midnight() {
    let window = parse("12am - 1am every day").expect("valid window");
    assert_eq!(window.start, "00:00");
    assert_eq!(window.end, "01:00");
}

#[test]
fn never_sets_always_off() {
    let window = parse("never").expect("valid window");
    assert!(window.always_off);
}

#[test]
fn any_time_sets_always_on() {
    let window = parse("any time").expect("valid window");
    assert!(window.always_on);
    assert!(window.recurrence.is_empty());
}

#[test]
fn any_time_except_a_dated_window_records_the_exception() {
    let window = parse("any time except 9:00 - 17:00 on 25/12/2026").expect("valid window");
    assert!(window.always_on);
    assert_eq!(window.start, "09:00");
    assert_eq!(window.end, "17:00");
    assert_eq!(window.on_date.as_deref(), Some("25/12/2026"));
}

#[test]
fn where_timezone_sets_timezone_field() {
    let window = parse("9:00 - 17:00 every day where timezone = GMT").expect("valid window");
    assert_eq!(window.timezone.as_deref(), Some("GMT"));
}

#[test]
fn specific_date_recurrence() {
    let window = parse("9:00 - 17:00 on 25/12/2026").expect("valid window");
    assert_eq!(window.on_date.as_deref(), Some("25/12/2026"));
}

#[test]
fn recognizes_month_and_day_recurrence() {
    let window = parse("9:00 - 17:00 every 25/12 yearly").expect("valid window");
    assert_eq!(window.recurrence, "25/12 yearly");
}

#[test]
fn bare_yearly_without_qualifier_is_an_error() {
    let err = parse("9:00 - 17:00 every 1st yearly").expect_err("should reject");
    assert!(matches!(err, ParseError::InvalidRecurrence(_)));
}

#[parameterized(
    missing_dash = { "9:00 17:00 every day" },
    trailing_garbage = { "9:00 - 17:00 every day blorp" },
)]
fn rejects_malformed_input(input: &str) {
    assert!(parse(input).is_err());
}

#[test]
fn empty_string_is_rejected() {
    assert_eq!(parse(""), Err(ParseError::Empty));
}
