//! Spanish calendrical phrase parser
//!
//! Finds the first date expression in a sentence and resolves it against a
//! reference instant, preferring future dates when the phrase is ambiguous.
//! Supported forms:
//! - ISO dates: "2024-03-15"
//! - Day-first numeric dates: "15/03", "15/03/24", "15/03/2024"
//! - Day and month name: "15 de marzo", "15 de marzo de 2025"
//! - Offsets: "en 3 días", "dentro de 2 semanas", "en 1 mes"
//! - Next week: "la semana que viene", "la próxima semana"
//! - Weekday names: "el viernes", "próximo lunes"

use crate::dates::CalendarParser;
use crate::error::DateParseError;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};
use regex::{Captures, Regex};
use std::str::FromStr;

const MONTHS: [(&str, u32); 13] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

const WEEKDAYS: [(&str, Weekday); 9] = [
    ("lunes", Weekday::Mon),
    ("martes", Weekday::Tue),
    ("miércoles", Weekday::Wed),
    ("miercoles", Weekday::Wed),
    ("jueves", Weekday::Thu),
    ("viernes", Weekday::Fri),
    ("sábado", Weekday::Sat),
    ("sabado", Weekday::Sat),
    ("domingo", Weekday::Sun),
];

/// Rule-based Spanish date parser used as the date resolver's fallback.
pub struct SpanishCalendar {
    iso: Regex,
    numeric: Regex,
    day_month: Regex,
    offset: Regex,
    next_week: Regex,
    weekday: Regex,
}

impl SpanishCalendar {
    pub fn new() -> Self {
        let month_names = MONTHS.map(|(name, _)| name).join("|");
        let weekday_names = WEEKDAYS.map(|(name, _)| name).join("|");

        Self {
            iso: Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("Invalid regex"),
            numeric: Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b")
                .expect("Invalid regex"),
            day_month: Regex::new(&format!(
                r"\b(\d{{1,2}})\s+de\s+({})(?:\s+(?:de|del)\s+(\d{{4}}))?\b",
                month_names
            ))
            .expect("Invalid regex"),
            offset: Regex::new(
                r"\b(?:en|dentro\s+de)\s+(\d+)\s+(días|dias|día|dia|semanas|semana|meses|mes)\b",
            )
            .expect("Invalid regex"),
            next_week: Regex::new(
                r"\b(?:semana\s+que\s+viene|pr[oó]xima\s+semana|semana\s+pr[oó]xima)\b",
            )
            .expect("Invalid regex"),
            weekday: Regex::new(&format!(r"\b({})\b", weekday_names)).expect("Invalid regex"),
        }
    }

    fn iso_date(caps: &Captures<'_>) -> Result<NaiveDate, DateParseError> {
        ymd(number(&caps[1])?, number(&caps[2])?, number(&caps[3])?)
    }

    fn numeric_date(caps: &Captures<'_>, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
        let day = number(&caps[1])?;
        let month = number(&caps[2])?;
        let year = match caps.get(3) {
            Some(m) => {
                let year: i32 = number(m.as_str())?;
                Some(if year < 100 { 2000 + year } else { year })
            }
            None => None,
        };
        upcoming(today, month, day, year)
    }

    fn day_month_date(caps: &Captures<'_>, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
        let day = number(&caps[1])?;
        let month = MONTHS
            .iter()
            .find(|(name, _)| *name == &caps[2])
            .map(|(_, num)| *num)
            .ok_or_else(|| DateParseError::Number(caps[2].to_string()))?;
        let year = caps.get(3).map(|m| number(m.as_str())).transpose()?;
        upcoming(today, month, day, year)
    }

    fn offset_date(caps: &Captures<'_>, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
        let amount: u32 = number(&caps[1])?;
        let out_of_range = || DateParseError::OutOfRange(caps[0].to_string());

        match &caps[2] {
            "mes" | "meses" => today
                .checked_add_months(Months::new(amount))
                .ok_or_else(out_of_range),
            unit => {
                let delta = if unit.starts_with("semana") {
                    Duration::try_weeks(i64::from(amount))
                } else {
                    Duration::try_days(i64::from(amount))
                };
                delta
                    .and_then(|d| today.checked_add_signed(d))
                    .ok_or_else(out_of_range)
            }
        }
    }

    fn weekday_date(caps: &Captures<'_>, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
        let target = WEEKDAYS
            .iter()
            .find(|(name, _)| *name == &caps[1])
            .map(|(_, day)| *day)
            .ok_or_else(|| DateParseError::Number(caps[1].to_string()))?;
        Ok(next_weekday(today, target))
    }
}

impl Default for SpanishCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarParser for SpanishCalendar {
    fn parse(&self, text: &str, base: NaiveDateTime) -> Result<Option<NaiveDate>, DateParseError> {
        let text = text.to_lowercase();
        let today = base.date();
        let mut found: Vec<(usize, Result<NaiveDate, DateParseError>)> = Vec::new();

        if let Some(caps) = self.iso.captures(&text) {
            found.push((caps.get(0).map_or(0, |m| m.start()), Self::iso_date(&caps)));
        }
        if let Some(caps) = self.numeric.captures(&text) {
            found.push((
                caps.get(0).map_or(0, |m| m.start()),
                Self::numeric_date(&caps, today),
            ));
        }
        if let Some(caps) = self.day_month.captures(&text) {
            found.push((
                caps.get(0).map_or(0, |m| m.start()),
                Self::day_month_date(&caps, today),
            ));
        }
        if let Some(caps) = self.offset.captures(&text) {
            found.push((
                caps.get(0).map_or(0, |m| m.start()),
                Self::offset_date(&caps, today),
            ));
        }
        if let Some(m) = self.next_week.find(&text) {
            let date = Duration::try_weeks(1)
                .and_then(|d| today.checked_add_signed(d))
                .ok_or_else(|| DateParseError::OutOfRange(m.as_str().to_string()));
            found.push((m.start(), date));
        }
        if let Some(caps) = self.weekday.captures(&text) {
            found.push((
                caps.get(0).map_or(0, |m| m.start()),
                Self::weekday_date(&caps, today),
            ));
        }

        // The earliest expression in the sentence wins
        found
            .into_iter()
            .min_by_key(|(start, _)| *start)
            .map(|(_, date)| date)
            .transpose()
    }
}

fn number<T: FromStr>(s: &str) -> Result<T, DateParseError> {
    s.parse::<T>()
        .map_err(|_| DateParseError::Number(s.to_string()))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateParseError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::InvalidDate { year, month, day })
}

/// Day and month with an optional year; without a year, a date already past
/// this year moves to next year.
fn upcoming(
    today: NaiveDate,
    month: u32,
    day: u32,
    year: Option<i32>,
) -> Result<NaiveDate, DateParseError> {
    if let Some(year) = year {
        return ymd(year, month, day);
    }
    let this_year = ymd(today.year(), month, day)?;
    if this_year < today {
        ymd(today.year() + 1, month, day)
    } else {
        Ok(this_year)
    }
}

/// Next occurrence of `target` strictly after `today`.
fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let current = today.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let days_ahead = match (7 + wanted - current) % 7 {
        0 => 7,
        n => n,
    };
    today + Duration::days(i64::from(days_ahead))
}
