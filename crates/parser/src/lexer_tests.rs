// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn normalizes_case_and_whitespace() {
    assert_eq!(normalize("  9:00  - 17:00   EVERY Weekday  "), "9:00 - 17:00 every weekday");
}

#[test]
fn lexes_plain_time_range_with_recurrence() {
    let tokens = lex("9:00 - 17:00 every weekday");
    assert_eq!(
        tokens,
        vec![
            Token::Start,
            Token::Time("09:00".into()),
            Token::TimeRange,
            Token::Time("17:00".into()),
            Token::Recurrence,
            Token::Day("weekday".into()),
            Token::End,
        ]
    );
}

#[test]
fn splits_attached_am_pm_into_its_own_token() {
    let tokens = lex("2pm - 5pm every day");
    assert_eq!(
        tokens,
        vec![
            Token::Start,
            Token::Time("02:00".into()),
            Token::TimeModifier(TimeModifier::Pm),
            Token::TimeRange,
            Token::Time("05:00".into()),
            Token::TimeModifier(TimeModifier::Pm),
            Token::Recurrence,
            Token::RecurringByDayMonthYear("day".into()),
            Token::End,
        ]
    );
}

#[test]
fn lexes_calendar_dates() {
    let tokens = lex("on 25/12/2026");
    assert_eq!(tokens, vec![Token::Start, Token::On, Token::Calendar("25/12/2026".into()), Token::End]);
}

#[test]
fn lexes_ordinal_day() {
    let tokens = lex("on the 25th of december yearly");
    assert_eq!(
        tokens,
        vec![
            Token::Start,
            Token::On,
            Token::Clarification,
            Token::Calendar("25th".into()),
            Token::Clarification,
            Token::Month("december".into()),
            Token::RecurringByDayMonthYear("yearly".into()),
            Token::End,
        ]
    );
}

#[test]
fn lexes_timezone_param() {
    let tokens = lex("any time except 2:00 - 4:00 where timezone = gmt");
    assert_eq!(
        tokens,
        vec![
            Token::Start,
            Token::AnyAlways,
            Token::AnyAlwaysClarification,
            Token::Exception,
            Token::Time("02:00".into()),
            Token::TimeRange,
            Token::Time("04:00".into()),
            Token::Where,
            Token::TimeZoneParam,
            Token::Equals,
            Token::TimeZone("GMT".into()),
            Token::End,
        ]
    );
}

#[test]
fn never_is_a_single_token() {
    assert_eq!(lex("never"), vec![Token::Start, Token::Never, Token::End]);
}
