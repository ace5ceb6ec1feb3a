//! Route/date shorthand parsing
//!
//! Accepts `ORIG-DEST outDate [inDate]`, where a date is one of
//! `2026-10-20`, `20oct`, `+3`, `today` or `tomorrow`.

use chrono::{Datelike, Days, Local, NaiveDate};
use log::debug;

use super::QuerySpec;
use crate::error::{FlysasClientError, Result};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parses typed search shorthand relative to a reference day
#[derive(Debug, Clone)]
pub struct QueryParser {
    today: NaiveDate,
}

impl QueryParser {
    /// Parser relative to the local calendar date
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Reference day relative dates resolve against
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Parse one query segment
    pub fn parse(&self, input: &str) -> Result<QuerySpec> {
        let mut tokens = input.split_whitespace();

        let route = tokens
            .next()
            .ok_or_else(|| syntax("Empty query".to_string()))?;
        let (from, to) = parse_route(route)?;

        let out_token = tokens
            .next()
            .ok_or_else(|| syntax("Missing outbound date".to_string()))?;
        let out_date = self.parse_date(out_token)?;

        let in_date = match tokens.next() {
            Some(token) => {
                let in_date = self.parse_date(token)?;
                if in_date < out_date {
                    return Err(syntax(format!(
                        "Inbound date {} is before outbound date {}",
                        in_date, out_date
                    )));
                }
                Some(in_date)
            }
            None => None,
        };

        if let Some(extra) = tokens.next() {
            return Err(syntax(format!("Unexpected '{}'", extra)));
        }

        let query = QuerySpec {
            from,
            to,
            out_date,
            in_date,
        };
        debug!("Parsed query: {}", query);
        Ok(query)
    }

    fn parse_date(&self, token: &str) -> Result<NaiveDate> {
        let lower = token.to_ascii_lowercase();

        let date = match lower.as_str() {
            "today" => Some(self.today),
            "tomorrow" => self.today.checked_add_days(Days::new(1)),
            _ if lower.starts_with('+') => lower[1..]
                .parse::<u64>()
                .ok()
                .and_then(|n| self.today.checked_add_days(Days::new(n))),
            _ if lower.contains('-') => NaiveDate::parse_from_str(&lower, "%Y-%m-%d").ok(),
            _ => self.parse_day_month(&lower),
        };

        let date = date.ok_or_else(|| syntax(format!("Unknown date '{}'", token)))?;
        if date < self.today {
            return Err(syntax(format!("Date {} is in the past", date)));
        }
        Ok(date)
    }

    /// `20oct` resolves to the next 20 October on or after today
    fn parse_day_month(&self, token: &str) -> Option<NaiveDate> {
        let split = token.find(|c: char| !c.is_ascii_digit())?;
        let (day, month) = token.split_at(split);
        let day: u32 = day.parse().ok()?;
        let month = MONTHS.iter().position(|m| *m == month)? as u32 + 1;

        // 29feb may be several years away
        (self.today.year()..=self.today.year() + 4)
            .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
            .find(|date| *date >= self.today)
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_route(route: &str) -> Result<(String, String)> {
    let (from, to) = route
        .split_once('-')
        .ok_or_else(|| syntax(format!("Expected Origin-Destination, got '{}'", route)))?;
    let from = parse_airport(from)?;
    let to = parse_airport(to)?;
    if from == to {
        return Err(syntax(format!("Origin and destination are both {}", from)));
    }
    Ok((from, to))
}

fn parse_airport(code: &str) -> Result<String> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(syntax(format!("Invalid airport code '{}'", code)))
    }
}

fn syntax(message: String) -> FlysasClientError {
    FlysasClientError::QuerySyntax(message)
}
