// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokenizer for the window-of-operation grammar.
//!
//! Classification order per token: exact-match keyword table, then a
//! calendar-date pattern, then a time-of-day pattern (which may synthesize a
//! trailing am/pm token, e.g. `"2pm"` becomes `Time("14:00")` directly while
//! `"2 pm"` becomes `Time("02:00")` followed by a separate `TimeModifier`
//! pushed back onto the stream), then a timezone heuristic, else free text.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start,
    Time(String),
    TimeRange,
    Where,
    And,
    TimeModifier(TimeModifier),
    Recurrence,
    AnyAlways,
    Never,
    AnyAlwaysClarification,
    Exception,
    On,
    Equals,
    TimeZoneParam,
    Clarification,
    Day(String),
    Month(String),
    RecurringByDayMonthYear(String),
    Calendar(String),
    TimeZone(String),
    Text(String),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeModifier {
    Am,
    Pm,
}

fn keyword_table() -> &'static HashMap<&'static str, Token> {
    static TABLE: OnceLock<HashMap<&'static str, Token>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut m: HashMap<&'static str, Token> = HashMap::new();
        m.insert("-", Token::TimeRange);
        m.insert("to", Token::TimeRange);
        m.insert("where", Token::Where);
        m.insert("and", Token::And);
        m.insert("pm", Token::TimeModifier(TimeModifier::Pm));
        m.insert("am", Token::TimeModifier(TimeModifier::Am));
        m.insert("every", Token::Recurrence);
        m.insert("any", Token::AnyAlways);
        m.insert("always", Token::AnyAlways);
        m.insert("never", Token::Never);
        m.insert("time", Token::AnyAlwaysClarification);
        m.insert("except", Token::Exception);
        m.insert("on", Token::On);
        m.insert("=", Token::Equals);
        m.insert("timezone", Token::TimeZoneParam);
        m.insert("of", Token::Clarification);
        m.insert("the", Token::Clarification);
        for day in [
            "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sun",
            "mon", "tue", "wed", "thu", "fri", "sat", "weekday", "weekend",
        ] {
            m.insert(day, Token::Day(day.to_string()));
        }
        for month in [
            "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
            "january", "february", "march", "april", "june", "july", "august", "september",
            "october", "november", "december",
        ] {
            m.insert(month, Token::Month(month.to_string()));
        }
        for unit in ["day", "month", "year", "monthly", "yearly"] {
            m.insert(unit, Token::RecurringByDayMonthYear(unit.to_string()));
        }
        m
    })
}

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let trimmed = lowered.trim();
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn lex(input: &str) -> Vec<Token> {
    let mut out = vec![Token::Start];
    let mut words: Vec<String> = input.split(' ').map(str::to_string).collect();
    let mut idx = 0;
    while idx < words.len() {
        let word = words[idx].clone();
        if let Some(tok) = keyword_table().get(word.as_str()) {
            out.push(tok.clone());
        } else if is_calendar(&word) {
            out.push(Token::Calendar(word.replace('-', "/")));
        } else if let Some((time_str, modifier)) = parse_time(&word) {
            if let Some(modifier) = modifier {
                words.insert(idx + 1, modifier);
            }
            out.push(Token::Time(time_str));
        } else if is_timezone(&word) {
            out.push(Token::TimeZone(word.to_uppercase()));
        } else {
            out.push(Token::Text(word));
        }
        idx += 1;
    }
    out.push(Token::End);
    out
}

/// `\d+(st|nd|rd|th)$` (an ordinal day) or a `D/M` / `D/M/Y` calendar date,
/// per the source grammar's `RE_CALENDAR`.
fn is_calendar(word: &str) -> bool {
    if word.len() >= 3 {
        let suffix = &word[word.len() - 2..];
        let digits = &word[..word.len() - 2];
        if matches!(suffix, "st" | "nd" | "rd" | "th")
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return true;
        }
    }
    let sep = if word.contains('/') {
        '/'
    } else if word.contains('-') {
        '-'
    } else {
        return false;
    };
    let parts: Vec<&str> = word.split(sep).collect();
    if parts.len() != 2 && parts.len() != 3 {
        return false;
    }
    let numeric = |s: &str, max_len: usize| -> bool {
        !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
    };
    let day_month_ok = numeric(parts[0], 2) && numeric(parts[1], 2);
    let year_ok = parts.len() == 2 || numeric(parts[2], 4);
    day_month_ok && year_ok
}

/// `(?P<hour>\d{1,2}):?(?P<minute>\d{2})?\s?(?P<mod>am|pm)?`
fn parse_time(word: &str) -> Option<(String, Option<String>)> {
    let lower = word.to_lowercase();
    let (digits, modifier) = if let Some(stripped) = lower.strip_suffix("am") {
        (stripped, Some("am"))
    } else if let Some(stripped) = lower.strip_suffix("pm") {
        (stripped, Some("pm"))
    } else {
        (lower.as_str(), None)
    };
    if digits.is_empty() {
        return None;
    }
    let (hour_str, minute_str) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None => (digits, "0"),
    };
    if hour_str.is_empty() || !hour_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !minute_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: i64 = hour_str.parse().ok()?;
    let minute: i64 = if minute_str.is_empty() { 0 } else { minute_str.parse().ok()? };
    if !(0..=23).contains(&hour) || !(0..=59).contains(&minute) {
        return None;
    }
    let time_str = format!("{hour:02}:{minute:02}");
    Some((time_str, modifier.map(str::to_string)))
}

/// Mirrors Go's `time.parseTimeZone` uppercase-letter-count heuristic.
fn is_timezone(word: &str) -> bool {
    let upper = word.to_uppercase();
    if upper.len() < 3 {
        return false;
    }
    if upper.starts_with("CHST") {
        return true;
    }
    if upper.starts_with("GMT") {
        return true;
    }
    let n_upper = upper
        .bytes()
        .take(6)
        .take_while(|b| b.is_ascii_uppercase())
        .count();
    match n_upper {
        5 => upper.as_bytes()[4] == b'T',
        4 => upper.as_bytes()[3] == b'T',
        3 => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
