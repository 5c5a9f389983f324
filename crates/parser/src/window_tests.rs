// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single().unwrap()
}

fn ranged(start: &str, end: &str, recurrence: &str) -> Window {
    Window {
        start: start.to_string(),
        end: end.to_string(),
        recurrence: recurrence.to_string(),
        ..Window::default()
    }
}

#[test]
fn always_on_with_no_recurrence_is_open_from_now() {
    let window = Window { always_on: true, ..Window::default() };
    let now = at(2026, 7, 28, 10, 0);
    assert_eq!(window.next_start_time(now), now);
    assert_eq!(window.next_end_time(now), Some(far_future()));
}

#[test]
fn always_off_never_opens() {
    let window = Window { always_off: true, ..Window::default() };
    let now = at(2026, 7, 28, 10, 0);
    assert_eq!(window.next_start_time(now), far_future());
    assert_eq!(window.next_end_time(now), Some(far_future_plus_one_year()));
}

#[test]
fn always_on_with_exception_reports_no_end_while_inside_it() {
    let mut window = ranged("09:00", "17:00", "day");
    window.always_on = true;
    // 10:00, inside the daily 09:00-17:00 exception window.
    let now = at(2026, 7, 28, 10, 0);
    assert_eq!(window.next_start_time(now), at(2026, 7, 28, 17, 0));
    assert_eq!(window.next_end_time(now), None);
}

#[test]
fn always_on_with_exception_resumes_outside_it() {
    let mut window = ranged("09:00", "17:00", "day");
    window.always_on = true;
    // 20:00, past today's exception; the next one starts tomorrow morning.
    let now = at(2026, 7, 28, 20, 0);
    assert_eq!(window.next_start_time(now), now);
    assert_eq!(window.next_end_time(now), Some(at(2026, 7, 29, 9, 0)));
}

#[test]
fn one_shot_on_date_resolves_to_that_calendar_date() {
    let window = Window {
        start: "09:00".to_string(),
        end: "17:00".to_string(),
        on_date: Some("25/12/2026".to_string()),
        ..Window::default()
    };
    let now = at(2026, 1, 1, 0, 0);
    assert_eq!(window.next_start_time(now), at(2026, 12, 25, 9, 0));
    assert_eq!(window.next_end_time(now), Some(at(2026, 12, 25, 17, 0)));
}

#[test]
fn daily_recurrence_is_open_right_now_when_inside_the_window() {
    let window = ranged("09:00", "17:00", "day");
    let now = at(2026, 7, 28, 10, 0);
    assert_eq!(window.next_start_time(now), now);
    assert_eq!(window.next_end_time(now), Some(at(2026, 7, 28, 17, 0)));
}

#[test]
fn daily_recurrence_waits_for_later_today() {
    let window = ranged("09:00", "17:00", "day");
    let now = at(2026, 7, 28, 7, 0);
    assert_eq!(window.next_start_time(now), at(2026, 7, 28, 9, 0));
}

#[test]
fn daily_recurrence_rolls_to_tomorrow_once_missed() {
    let window = ranged("09:00", "17:00", "day");
    let now = at(2026, 7, 28, 18, 0);
    assert_eq!(window.next_start_time(now), at(2026, 7, 29, 9, 0));
}

#[test]
fn specific_weekday_is_open_right_now_on_a_match() {
    // 2024-01-01 is a Monday.
    let window = ranged("09:00", "17:00", "monday");
    let now = at(2024, 1, 1, 10, 0);
    assert_eq!(window.next_start_time(now), now);
}

#[test]
fn specific_weekday_rolls_to_next_week_once_todays_window_has_ended() {
    let window = ranged("09:00", "17:00", "monday");
    let now = at(2024, 1, 1, 20, 0);
    assert_eq!(window.next_start_time(now), at(2024, 1, 8, 9, 0));
}

#[test]
fn specific_weekday_before_this_week_wraps_forward() {
    // Sunday 2024-01-07, looking for Monday: rolls forward one day.
    let window = ranged("09:00", "17:00", "monday");
    let now = at(2024, 1, 7, 6, 0);
    assert_eq!(window.next_start_time(now), at(2024, 1, 8, 9, 0));
}

#[test]
fn specific_weekday_after_this_week_wraps_to_next_week() {
    // Tuesday 2024-01-02, looking for Monday: rolls to the following Monday.
    let window = ranged("09:00", "17:00", "monday");
    let now = at(2024, 1, 2, 6, 0);
    assert_eq!(window.next_start_time(now), at(2024, 1, 8, 9, 0));
}

#[test]
fn weekday_recurrence_is_open_on_a_weekday() {
    // 2024-01-02 is a Tuesday.
    let window = ranged("09:00", "17:00", "weekday");
    let now = at(2024, 1, 2, 10, 0);
    assert_eq!(window.next_start_time(now), now);
}

#[test]
fn weekday_recurrence_rolls_from_saturday_to_monday() {
    let window = ranged("09:00", "17:00", "weekday");
    let now = at(2024, 1, 6, 10, 0);
    assert_eq!(window.next_start_time(now), at(2024, 1, 8, 9, 0));
}

#[test]
fn weekday_recurrence_rolls_from_sunday_to_monday() {
    let window = ranged("09:00", "17:00", "weekday");
    let now = at(2024, 1, 7, 10, 0);
    assert_eq!(window.next_start_time(now), at(2024, 1, 8, 9, 0));
}

#[test]
fn weekend_recurrence_is_open_on_saturday() {
    let window = ranged("09:00", "17:00", "weekend");
    let now = at(2024, 1, 6, 10, 0);
    assert_eq!(window.next_start_time(now), now);
}

#[test]
fn weekend_recurrence_rolls_from_a_weekday_to_saturday() {
    let window = ranged("09:00", "17:00", "weekend");
    let now = at(2024, 1, 2, 10, 0);
    assert_eq!(window.next_start_time(now), at(2024, 1, 6, 9, 0));
}

#[test]
fn nth_of_month_resolves_to_this_month_when_still_upcoming() {
    let window = ranged("09:00", "17:00", "20 month");
    let now = at(2026, 7, 1, 10, 0);
    assert_eq!(window.next_start_time(now), at(2026, 7, 20, 9, 0));
}

#[test]
fn nth_of_month_rolls_to_next_month_once_past() {
    let window = ranged("09:00", "17:00", "5 month");
    let now = at(2026, 7, 10, 10, 0);
    assert_eq!(window.next_start_time(now), at(2026, 8, 5, 9, 0));
}

#[test]
fn nth_of_month_is_open_right_now_on_the_day() {
    let window = ranged("09:00", "17:00", "15 month");
    let now = at(2026, 7, 15, 10, 0);
    assert_eq!(window.next_start_time(now), now);
}

#[test]
fn specific_month_and_day_resolves_to_this_year_when_upcoming() {
    let window = ranged("09:00", "17:00", "25 december");
    let now = at(2026, 1, 1, 10, 0);
    assert_eq!(window.next_start_time(now), at(2026, 12, 25, 9, 0));
}

#[test]
fn specific_month_and_day_rolls_to_next_year_once_past() {
    let window = ranged("09:00", "17:00", "25 december");
    let now = at(2026, 12, 26, 10, 0);
    assert_eq!(window.next_start_time(now), at(2027, 12, 25, 9, 0));
}

#[test]
fn specific_date_yearly_in_slash_form_resolves_forward() {
    let window = ranged("09:00", "17:00", "25/12 yearly");
    let now = at(2026, 1, 1, 10, 0);
    assert_eq!(window.next_start_time(now), at(2026, 12, 25, 9, 0));
}

#[test]
fn default_timezone_is_utc() {
    let window = Window::default();
    assert_eq!(window.timezone(), chrono_tz::Tz::UTC);
}

#[test]
fn explicit_timezone_shifts_the_resolved_window() {
    // 01:30 UTC on 2026-07-28 is 21:30 on 2026-07-27 in US/Eastern, so a
    // "09:00-17:00 every day" window hasn't opened yet in local time.
    let window = Window {
        start: "09:00".to_string(),
        end: "17:00".to_string(),
        recurrence: "day".to_string(),
        timezone: Some("America/New_York".to_string()),
        ..Window::default()
    };
    let now = at(2026, 7, 28, 1, 30);
    let next = window.next_start_time(now);
    assert!(next > now);
}
