//! Report windows: the inclusive time range a report considers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default window length when the caller gives no `from`.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Upper bound accepted for a configured default window length.
pub const MAX_WINDOW_DAYS: i64 = 36_600;

/// Source of the current instant, injected so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Raw window bounds as supplied by a caller (query string or JSON body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Resolved window; both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    pub from: Timestamp,
    pub to: Timestamp,
}

impl ReportWindow {
    pub fn contains(&self, at: Timestamp) -> bool {
        self.from <= at && at <= self.to
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Resolve caller-supplied bounds into a [`ReportWindow`].
///
/// Each bound accepts an RFC 3339 timestamp, a local `YYYY-MM-DDTHH:MM:SS`
/// date-time, or a plain `YYYY-MM-DD` date (start of day for `from`, end of
/// day for `to`), local times being read in `offset`. A missing or blank
/// `to` is `now`; a missing or blank `from` is `default_days` before `to`.
pub fn resolve_window(
    params: &WindowParams,
    now: Timestamp,
    default_days: i64,
    offset: FixedOffset,
) -> Result<ReportWindow, CoreError> {
    let to = match present(&params.to) {
        Some(raw) => parse_bound(raw, "to", Bound::End, offset)?,
        None => now,
    };
    let from = match present(&params.from) {
        Some(raw) => parse_bound(raw, "from", Bound::Start, offset)?,
        None => TimeDelta::try_days(default_days)
            .and_then(|span| to.checked_sub_signed(span))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "cannot derive 'from' as {default_days} days before 'to' ({to})"
                ))
            })?,
    };

    if from > to {
        return Err(CoreError::Validation(format!(
            "'from' ({from}) must not be after 'to' ({to})"
        )));
    }
    Ok(ReportWindow { from, to })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bound(
    raw: &str,
    field: &str,
    bound: Bound,
    offset: FixedOffset,
) -> Result<Timestamp, CoreError> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    let local = if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        Some(at)
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => NaiveTime::MIN,
            Bound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap_or(NaiveTime::MIN),
        };
        Some(date.and_time(time))
    } else {
        None
    };

    local
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid '{field}' date '{raw}': expected an RFC 3339 timestamp or YYYY-MM-DD"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
