// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The parsed `Window` type and its recurrence-resolution logic.
//!
//! Grounded on `types/window.go` in the original source: same recurrence
//! vocabulary (daily, specific weekday, weekday/weekend, Nth-of-month,
//! specific month+day, specific date yearly, one-shot date, always-on,
//! always-off) and the same always-on-with-exception inversion, expressed
//! with `chrono` date arithmetic instead of hand-rolled day/month rollover.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::ParseError;

/// A resolved window-of-operation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Window {
    pub start: String,
    pub end: String,
    pub recurrence: String,
    pub on_date: Option<String>,
    pub timezone: Option<String>,
    pub always_on: bool,
    pub always_off: bool,
}

/// Far-future sentinel used for always-off queues and for the upper bound of
/// an always-on queue with no exceptions (mirrors the source's `2500-01-00`
/// / `2501-01-00` sentinels, expressed as valid dates).
fn far_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2500, 1, 1, 0, 0, 0).single().unwrap_or_else(|| Utc::now() + Duration::days(365 * 400))
}

fn far_future_plus_one_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2501, 1, 1, 0, 0, 0).single().unwrap_or_else(far_future)
}

impl Window {
    pub fn timezone(&self) -> Tz {
        self.timezone
            .as_deref()
            .and_then(|tz| tz.parse::<Tz>().ok())
            .unwrap_or(Tz::UTC)
    }

    /// The next instant at which the queue should begin dispatching.
    pub fn next_start_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let (start, end) = self.generate(now);
        if self.always_on && !self.recurrence.is_empty() {
            // Inverted: `start`/`end` denote the *exception* window during
            // which the queue should be closed.
            let probe = now + Duration::seconds(1);
            if probe > start && probe < end {
                end
            } else {
                now
            }
        } else {
            start
        }
    }

    /// The next instant at which the queue should stop dispatching.
    ///
    /// Returns `None` while an always-on queue is inside its exception
    /// window — the next end time cannot be known until the exception
    /// closes. Callers should treat `None` as "no known end", not an error
    /// (this mirrors a documented quirk of the source system).
    pub fn next_end_time(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (start, end) = self.generate(now);
        if self.always_on && !self.recurrence.is_empty() {
            let probe = now + Duration::seconds(1);
            if probe > start && probe < end {
                None
            } else {
                Some(start)
            }
        } else {
            Some(end)
        }
    }

    fn generate(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        if self.always_on && self.recurrence.is_empty() {
            return (now, far_future());
        }
        if self.always_off {
            return (far_future(), far_future_plus_one_year());
        }
        if !self.always_on {
            if let Some(on_date) = &self.on_date {
                if let Ok(date) = parse_calendar_date(on_date) {
                    let start = self.timestamp(date, &self.start).unwrap_or(now);
                    let end = self.timestamp(date, &self.end).unwrap_or(now);
                    return (start, end);
                }
            }
        }

        let tz = self.timezone();
        let local_now = now.with_timezone(&tz);
        let today = local_now.date_naive();
        let current_minutes = (local_now.hour() * 60 + local_now.minute()) as i64;
        let start_minutes = minutes_since_midnight(&self.start);
        let end_minutes = minutes_since_midnight(&self.end);

        let mut start_date = today;
        let mut end_date = today;

        let elements: Vec<&str> = self.recurrence.split(' ').collect();
        let Some(first) = elements.first().copied() else {
            return (now, far_future());
        };

        if first == "day" {
            if end_minutes < start_minutes {
                end_date = add_days(end_date, 1);
            }
            return self.derive_for_today(current_minutes, start_minutes, end_minutes, start_date, end_date, now);
        }

        if let Some(requested) = weekday_named(first) {
            let today_wd = today.weekday();
            if end_minutes < start_minutes {
                end_date = add_days(end_date, 1);
            }
            let today_num = weekday_index(today_wd);
            let requested_num = weekday_index(requested);
            if today_wd == requested {
                if end_minutes < current_minutes && start_date == end_date {
                    start_date = add_days(start_date, 7);
                    end_date = add_days(end_date, 7);
                    return self.finish(start_date, end_date, now);
                }
                return self.derive_for_today(current_minutes, start_minutes, end_minutes, start_date, end_date, now);
            }
            if today_num < requested_num {
                let delta = requested_num - today_num;
                start_date = add_days(start_date, delta);
                end_date = add_days(end_date, delta);
            } else {
                let delta = (6 - today_num) + requested_num + 1;
                start_date = add_days(start_date, delta);
                end_date = add_days(end_date, delta);
            }
            return self.finish(start_date, end_date, now);
        }

        if first == "weekday" || first == "weekend" {
            let today_wd = today.weekday();
            if end_minutes < start_minutes {
                end_date = add_days(end_date, 1);
            }
            let is_weekend = matches!(today_wd, chrono::Weekday::Sat | chrono::Weekday::Sun);
            if first == "weekday" && !is_weekend {
                return self.derive_for_today(current_minutes, start_minutes, end_minutes, start_date, end_date, now);
            } else if first == "weekday" && is_weekend {
                let days_to_add = if today_wd == chrono::Weekday::Sun { 1 } else { 2 };
                start_date = add_days(start_date, days_to_add);
                end_date = add_days(end_date, days_to_add);
            } else if first == "weekend" && is_weekend {
                return self.derive_for_today(current_minutes, start_minutes, end_minutes, start_date, end_date, now);
            } else {
                let today_num = weekday_index(today_wd) as i64;
                let days_to_add = 6 - today_num;
                start_date = add_days(start_date, days_to_add);
                end_date = add_days(end_date, days_to_add);
            }
            return self.finish(start_date, end_date, now);
        }

        let Some(&second) = elements.get(1) else {
            return (now, far_future());
        };

        if second == "month" || second == "monthly" {
            if let Ok(day) = first.parse::<u32>() {
                start_date = set_day(start_date, day);
                end_date = set_day(end_date, day);
                if end_minutes < start_minutes {
                    end_date = add_days(end_date, 1);
                }
                if day < today.day() {
                    start_date = add_month(start_date);
                    end_date = add_month(end_date);
                } else if day > today.day() {
                    // this month, upcoming: dates already computed above.
                } else {
                    return self.derive_for_today(current_minutes, start_minutes, end_minutes, start_date, end_date, now);
                }
            }
            return self.finish(start_date, end_date, now);
        }

        if let Some(month) = month_named(second) {
            if let Ok(day) = first.parse::<u32>() {
                start_date = set_month_day(start_date, month, day);
                end_date = set_month_day(end_date, month, day);
                if end_minutes < start_minutes {
                    end_date = add_days(end_date, 1);
                }
                return self.derive_for_year(today, start_date, end_date, current_minutes, start_minutes, end_minutes, now);
            }
        }

        if second == "year" || second == "yearly" {
            let parts: Vec<&str> = first.split('/').collect();
            if let Some(day_str) = parts.first() {
                if let Ok(day) = day_str.parse::<u32>() {
                    start_date = set_day(start_date, day);
                }
            }
            if let Some(month_str) = parts.get(1) {
                if let Ok(month) = month_str.parse::<u32>() {
                    start_date = set_month(start_date, month);
                }
            }
            end_date = start_date;
            if end_minutes < start_minutes {
                end_date = add_days(end_date, 1);
            }
            return self.derive_for_year(today, start_date, end_date, current_minutes, start_minutes, end_minutes, now);
        }

        (now, far_future())
    }

    fn derive_for_today(
        &self,
        current_minutes: i64,
        start_minutes: i64,
        end_minutes: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        if start_minutes <= current_minutes && end_minutes > current_minutes {
            let end = self.timestamp(end_date, &self.end).unwrap_or(now);
            (now, end)
        } else if start_minutes > current_minutes {
            self.finish(start_date, end_date, now)
        } else {
            self.finish(add_days(start_date, 1), add_days(end_date, 1), now)
        }
    }

    fn derive_for_year(
        &self,
        today: NaiveDate,
        start_date: NaiveDate,
        end_date: NaiveDate,
        current_minutes: i64,
        start_minutes: i64,
        end_minutes: i64,
        now: DateTime<Utc>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        if start_date.month() < today.month() || (start_date.month() == today.month() && start_date.day() < today.day()) {
            self.finish(add_year(start_date), add_year(end_date), now)
        } else if start_date.month() > today.month() || (start_date.month() == today.month() && start_date.day() > today.day()) {
            self.finish(start_date, end_date, now)
        } else {
            self.derive_for_today(current_minutes, start_minutes, end_minutes, start_date, end_date, now)
        }
    }

    fn finish(&self, start_date: NaiveDate, end_date: NaiveDate, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.timestamp(start_date, &self.start).unwrap_or(now);
        let end = self.timestamp(end_date, &self.end).unwrap_or(now);
        (start, end)
    }

    fn timestamp(&self, date: NaiveDate, time: &str) -> Option<DateTime<Utc>> {
        let minutes = minutes_since_midnight(time);
        if minutes < 0 {
            return None;
        }
        let naive = date.and_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)?;
        let tz = self.timezone();
        tz.from_local_datetime(&naive).single().map(|dt| dt.with_timezone(&Utc))
    }
}

fn minutes_since_midnight(time: &str) -> i64 {
    let Some((h, m)) = time.split_once(':') else {
        return -1;
    };
    match (h.parse::<i64>(), m.parse::<i64>()) {
        (Ok(h), Ok(m)) => h * 60 + m,
        _ => -1,
    }
}

fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

fn add_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 { (date.year() + 1, 1) } else { (date.year(), date.month() + 1) };
    clamp_date(year, month, date.day())
}

fn add_year(date: NaiveDate) -> NaiveDate {
    clamp_date(date.year() + 1, date.month(), date.day())
}

fn set_day(date: NaiveDate, day: u32) -> NaiveDate {
    clamp_date(date.year(), date.month(), day)
}

fn set_month(date: NaiveDate, month: u32) -> NaiveDate {
    clamp_date(date.year(), month, date.day())
}

fn set_month_day(date: NaiveDate, month: u32, day: u32) -> NaiveDate {
    clamp_date(date.year(), month, day)
}

fn clamp_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        let last_day = days_in_month(year, month);
        NaiveDate::from_ymd_opt(year, month, last_day).unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN))
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn weekday_index(day: chrono::Weekday) -> i64 {
    // Sunday == 0, mirroring Go's time.Weekday.
    match day {
        chrono::Weekday::Sun => 0,
        chrono::Weekday::Mon => 1,
        chrono::Weekday::Tue => 2,
        chrono::Weekday::Wed => 3,
        chrono::Weekday::Thu => 4,
        chrono::Weekday::Fri => 5,
        chrono::Weekday::Sat => 6,
    }
}

fn weekday_named(input: &str) -> Option<chrono::Weekday> {
    Some(match input {
        "sunday" | "sun" => chrono::Weekday::Sun,
        "monday" | "mon" => chrono::Weekday::Mon,
        "tuesday" | "tue" => chrono::Weekday::Tue,
        "wednesday" | "wed" => chrono::Weekday::Wed,
        "thursday" | "thu" => chrono::Weekday::Thu,
        "friday" | "fri" => chrono::Weekday::Fri,
        "saturday" | "sat" => chrono::Weekday::Sat,
        _ => return None,
    })
}

fn month_named(input: &str) -> Option<u32> {
    Some(match input {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    })
}

fn parse_calendar_date(input: &str) -> Result<NaiveDate, ParseError> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 3 {
        return Err(ParseError::InvalidDate(input.to_string()));
    }
    let day: u32 = parts[0].parse().map_err(|_| ParseError::InvalidDate(input.to_string()))?;
    let month: u32 = parts[1].parse().map_err(|_| ParseError::InvalidDate(input.to_string()))?;
    let year: i32 = parts[2].parse().map_err(|_| ParseError::InvalidDate(input.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ParseError::InvalidDate(input.to_string()))
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
