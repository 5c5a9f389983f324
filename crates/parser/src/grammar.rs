// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive-descent parser over the lexed token stream, producing a
//! [`Window`]. The state progression mirrors `types/parser.go`'s DAG of
//! parser states, expressed as ordinary method calls rather than a
//! trampoline of function pointers.

use crate::error::ParseError;
use crate::lexer::{self, Token, TimeModifier};
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Time,
    TimeRange,
    Where,
    TimeModifier,
    Recurrence,
    AnyAlways,
    AnyAlwaysClarification,
    Never,
    Exception,
    On,
    Equals,
    TimeZoneParam,
    TimeZone,
    Calendar,
    Day,
    Month,
    RecurringByDayMonthYear,
    Clarification,
    End,
    /// Never a member of any valid-continuation list; forces a parse error.
    Invalid,
}

fn kind_of(token: &Token) -> Kind {
    match token {
        Token::Start => Kind::Invalid, // never matched against; Start is consumed implicitly
        Token::Time(_) => Kind::Time,
        Token::TimeRange => Kind::TimeRange,
        Token::Where => Kind::Where,
        Token::And => Kind::Invalid, // "and" has no valid continuation in this grammar
        Token::TimeModifier(_) => Kind::TimeModifier,
        Token::Recurrence => Kind::Recurrence,
        Token::AnyAlways => Kind::AnyAlways,
        Token::Never => Kind::Never,
        Token::AnyAlwaysClarification => Kind::AnyAlwaysClarification,
        Token::Exception => Kind::Exception,
        Token::On => Kind::On,
        Token::Equals => Kind::Equals,
        Token::TimeZoneParam => Kind::TimeZoneParam,
        Token::Clarification => Kind::Clarification,
        Token::Day(_) => Kind::Day,
        Token::Month(_) => Kind::Month,
        Token::RecurringByDayMonthYear(_) => Kind::RecurringByDayMonthYear,
        Token::Calendar(_) => Kind::Calendar,
        Token::TimeZone(_) => Kind::TimeZone,
        Token::Text(_) => Kind::Invalid, // free text is never a valid continuation
        Token::End => Kind::End,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    window: Window,
}

/// Parse a window-of-operation string.
pub fn parse(input: &str) -> Result<Window, ParseError> {
    let normalized = lexer::normalize(input);
    if normalized.is_empty() {
        return Err(ParseError::Empty);
    }
    let tokens = lexer::lex(&normalized);
    let mut parser = Parser {
        tokens,
        pos: 0,
        window: Window::default(),
    };
    parser.run()?;
    Ok(parser.window)
}

impl Parser {
    fn run(&mut self) -> Result<(), ParseError> {
        // Entry: Start must lead to a time range, always/any, or never.
        let next = self.advance();
        let valid = [Kind::Time, Kind::AnyAlways, Kind::Never];
        self.dispatch(next, &valid)
    }

    fn advance(&mut self) -> Token {
        self.pos += 1;
        self.tokens.get(self.pos).cloned().unwrap_or(Token::End)
    }

    fn last_calendar(&self) -> Option<&str> {
        for tok in self.tokens[..=self.pos.min(self.tokens.len().saturating_sub(1))].iter().rev() {
            if let Token::Calendar(value) = tok {
                return Some(value);
            }
        }
        None
    }

    fn update_recurrence(&mut self, item: &str) {
        if self.window.recurrence.is_empty() {
            self.window.recurrence = item.to_string();
        } else {
            self.window.recurrence = format!("{} {}", self.window.recurrence, item);
        }
    }

    fn switch(&mut self, valid: &[Kind]) -> Result<(), ParseError> {
        let token = self.advance();
        self.dispatch(token, valid)
    }

    fn dispatch(&mut self, token: Token, valid: &[Kind]) -> Result<(), ParseError> {
        let kind = kind_of(&token);
        if !valid.contains(&kind) {
            let text = describe(&token);
            return Err(ParseError::UnexpectedToken(text));
        }
        match token {
            Token::End => Ok(()),
            Token::Time(value) => self.parse_time(value),
            Token::TimeRange => self.switch(&[Kind::Time]),
            Token::TimeModifier(modifier) => self.parse_time_modifier(modifier),
            Token::Where => self.switch(&[Kind::TimeZoneParam]),
            Token::Equals => self.switch(&[Kind::TimeZone]),
            Token::Recurrence => self.switch(&[Kind::Day, Kind::Calendar, Kind::RecurringByDayMonthYear]),
            Token::AnyAlways => {
                self.window.always_on = true;
                self.switch(&[Kind::AnyAlwaysClarification, Kind::Exception, Kind::End])
            }
            Token::AnyAlwaysClarification => self.switch(&[Kind::Exception, Kind::End]),
            Token::Never => {
                self.window.always_off = true;
                self.switch(&[Kind::End])
            }
            Token::Exception => self.switch(&[Kind::Time, Kind::Calendar]),
            Token::On => self.switch(&[Kind::Calendar]),
            Token::TimeZoneParam => self.switch(&[Kind::Equals]),
            Token::TimeZone(value) => {
                self.window.timezone = Some(value);
                self.switch(&[Kind::End])
            }
            Token::Calendar(value) => self.parse_calendar(value),
            Token::Day(value) | Token::Month(value) => self.parse_day_month(value),
            Token::RecurringByDayMonthYear(value) => self.parse_recurring_by_day_month_year(value),
            Token::Clarification => self.switch(&[Kind::RecurringByDayMonthYear, Kind::Month, Kind::Clarification]),
            Token::Start | Token::And | Token::Text(_) => {
                Err(ParseError::UnexpectedToken(describe(&token)))
            }
        }
    }

    fn parse_time(&mut self, value: String) -> Result<(), ParseError> {
        let is_second = !self.window.start.is_empty();
        if is_second {
            self.window.end = value;
            self.switch(&[Kind::TimeModifier, Kind::Recurrence, Kind::On])
        } else {
            self.window.start = value;
            self.switch(&[Kind::TimeModifier, Kind::TimeRange])
        }
    }

    fn parse_time_modifier(&mut self, modifier: TimeModifier) -> Result<(), ParseError> {
        let target_is_end = !self.window.end.is_empty();
        let target = if target_is_end { &self.window.end } else { &self.window.start };
        if let Some((hour_str, rest)) = target.split_once(':') {
            if let Ok(mut hour) = hour_str.parse::<i64>() {
                match modifier {
                    TimeModifier::Am => {
                        if hour >= 12 {
                            // 12am is 00:00, not noon.
                            hour -= 12;
                        }
                    }
                    TimeModifier::Pm => {
                        if (0..12).contains(&hour) {
                            hour += 12;
                        }
                    }
                }
                let updated = format!("{hour:02}:{rest}");
                if target_is_end {
                    self.window.end = updated;
                } else {
                    self.window.start = updated;
                }
            }
        }
        self.switch(&[Kind::TimeRange, Kind::On, Kind::Recurrence])
    }

    fn parse_calendar(&mut self, value: String) -> Result<(), ParseError> {
        let elements: Vec<&str> = value.split('/').collect();
        if elements.len() == 3 {
            self.window.on_date = Some(if elements[2].len() == 2 {
                format!("{}/{}/20{}", elements[0], elements[1], elements[2])
            } else {
                value.clone()
            });
            self.switch(&[Kind::Where, Kind::End])
        } else {
            let stripped = value
                .replace("st", "")
                .replace("nd", "")
                .replace("rd", "")
                .replace("th", "");
            self.update_recurrence(&stripped);
            self.switch(&[Kind::RecurringByDayMonthYear, Kind::Month, Kind::Clarification])
        }
    }

    fn parse_day_month(&mut self, value: String) -> Result<(), ParseError> {
        self.update_recurrence(&value);
        self.switch(&[Kind::Where, Kind::End])
    }

    fn parse_recurring_by_day_month_year(&mut self, value: String) -> Result<(), ParseError> {
        if value == "year" || value == "yearly" {
            let calendar = self.last_calendar().unwrap_or_default().to_string();
            let elements: Vec<&str> = calendar.split('/').collect();
            if elements.len() != 2 {
                return Err(ParseError::InvalidRecurrence(calendar));
            }
        }
        self.update_recurrence(&value);
        self.switch(&[Kind::Where, Kind::End])
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Time(v) | Token::Calendar(v) | Token::TimeZone(v) | Token::Text(v) | Token::Day(v) | Token::Month(v) | Token::RecurringByDayMonthYear(v) => v.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "grammar_tests.rs"]
mod tests;
