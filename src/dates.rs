//! Due-date resolution and the reference clock

use crate::calendar::SpanishCalendar;
use crate::error::DateParseError;
use crate::lexicon::Lexicon;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the reference instant for relative dates
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midnight of `date`
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// General calendrical phrase parser consulted when no relative keyword matches.
pub trait CalendarParser: Send + Sync {
    /// `Ok(None)` when the text holds no date expression.
    fn parse(&self, text: &str, base: NaiveDateTime) -> Result<Option<NaiveDate>, DateParseError>;
}

/// What date resolution found, before failures are folded into "no date".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    Resolved(NaiveDate),
    NotDetected,
    Failed(DateParseError),
}

/// Relative keywords first, then the calendrical fallback.
pub struct DateResolver {
    relative_days: Vec<(String, i64)>,
    calendar: Box<dyn CalendarParser>,
}

impl DateResolver {
    pub fn new(relative_days: Vec<(String, i64)>, calendar: Box<dyn CalendarParser>) -> Self {
        Self {
            relative_days,
            calendar,
        }
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        Self::new(lexicon.relative_days.clone(), Box::new(SpanishCalendar::new()))
    }

    /// Swap the fallback parser.
    pub fn with_calendar(mut self, calendar: Box<dyn CalendarParser>) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn outcome(&self, text: &str, reference: NaiveDateTime) -> DateOutcome {
        let text_lower = text.to_lowercase();

        for (keyword, offset) in &self.relative_days {
            if text_lower.contains(keyword.as_str()) {
                return match Duration::try_days(*offset)
                    .and_then(|d| reference.date().checked_add_signed(d))
                {
                    Some(date) => DateOutcome::Resolved(date),
                    None => DateOutcome::Failed(DateParseError::OutOfRange(keyword.clone())),
                };
            }
        }

        match self.calendar.parse(&text_lower, reference) {
            Ok(Some(date)) => DateOutcome::Resolved(date),
            Ok(None) => DateOutcome::NotDetected,
            Err(err) => DateOutcome::Failed(err),
        }
    }

    /// Resolve a due date; parse failures are logged and reported as no date.
    pub fn resolve(&self, text: &str, reference: NaiveDateTime) -> Option<NaiveDate> {
        match self.outcome(text, reference) {
            DateOutcome::Resolved(date) => Some(date),
            DateOutcome::NotDetected => None,
            DateOutcome::Failed(err) => {
                tracing::warn!(error = %err, "Error parsing date");
                None
            }
        }
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::from_lexicon(&Lexicon::spanish())
    }
}
