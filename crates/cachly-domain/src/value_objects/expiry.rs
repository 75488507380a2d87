//! Expiration values
//!
//! [`Expires`] is what callers pass to `set`; it is resolved to an absolute
//! epoch (or [`NEVER_EXPIRES`]) exactly once, at write time. [`ExpiryStatus`]
//! is what `expires_at` reports back.
//!
//! ## Expression grammar
//!
//! [`Expires::parse`] accepts, after trimming:
//!
//! | Input | Result |
//! |-------|--------|
//! | `""`, `"0"` | [`Expires::Never`] |
//! | integer, e.g. `"1596885301"`, `"300"` | [`Expires::EpochOrTtl`] |
//! | RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD` | [`Expires::At`] (naive forms are UTC) |
//! | optional `+` then a humantime duration: `"+10 hours"`, `"2 seconds"`, `"1h 30min"` | [`Expires::After`] |
//!
//! Whitespace inside a relative expression is ignored. Units follow
//! `humantime` (`s`, `sec`, `min`, `h`, `hours`, `days`, `weeks`, `months` =
//! 30.44 days, `years` = 365.25 days, ...).

use crate::constants::NEVER_EXPIRES;
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// When a newly written entry should expire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expires {
    /// Entry lives until deleted
    #[default]
    Never,
    /// Entry expires this long after the write
    After(Duration),
    /// Entry expires at this instant; a past instant is stored already expired
    At(DateTime<Utc>),
    /// Epoch seconds if that lies in the future at write time, otherwise a
    /// TTL in seconds; zero or negative means never
    EpochOrTtl(i64),
}

impl Expires {
    /// Shorthand for a TTL in seconds
    pub fn after_secs(secs: u64) -> Self {
        Self::After(Duration::from_secs(secs))
    }

    /// Parse an expiry expression (see module docs for the grammar)
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        if expr.is_empty() || expr == "0" {
            return Ok(Self::Never);
        }

        if let Ok(number) = expr.parse::<i64>() {
            return Ok(Self::EpochOrTtl(number));
        }

        if let Some(at) = parse_absolute(expr) {
            return Ok(Self::At(at));
        }

        let relative: String = expr
            .strip_prefix('+')
            .unwrap_or(expr)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        humantime::parse_duration(&relative)
            .map(Self::After)
            .map_err(|e| {
                Error::invalid_argument(format!("Unrecognized expiry expression '{expr}': {e}"))
            })
    }

    /// Resolve to the absolute epoch stored in the envelope
    ///
    /// An absolute instant at or before `now` resolves to its own epoch, so
    /// the entry is written already expired. Instants at or before the Unix
    /// epoch clamp to `1` to stay distinct from [`NEVER_EXPIRES`].
    pub fn resolve(&self, now: i64) -> i64 {
        match *self {
            Self::Never => NEVER_EXPIRES,
            Self::After(duration) => {
                let mut secs = duration.as_secs();
                if duration.subsec_nanos() > 0 {
                    secs += 1;
                }
                if secs == 0 {
                    return NEVER_EXPIRES;
                }
                let secs = i64::try_from(secs).unwrap_or(i64::MAX);
                now.saturating_add(secs)
            }
            Self::At(at) => at.timestamp().max(NEVER_EXPIRES + 1),
            Self::EpochOrTtl(n) if n <= 0 => NEVER_EXPIRES,
            Self::EpochOrTtl(n) if n > now => n,
            Self::EpochOrTtl(n) => now.saturating_add(n),
        }
    }
}

fn parse_absolute(expr: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(expr) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(expr, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(expr, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl FromStr for Expires {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Duration> for Expires {
    fn from(duration: Duration) -> Self {
        Self::After(duration)
    }
}

impl From<DateTime<Utc>> for Expires {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl From<i64> for Expires {
    fn from(n: i64) -> Self {
        Self::EpochOrTtl(n)
    }
}

/// Whether a stored expiry has passed
pub fn is_expired_at(expires_at: i64, now: i64) -> bool {
    expires_at != NEVER_EXPIRES && now > expires_at
}

/// Expiration state of a stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Backend holds no data for the key
    Missing,
    /// Entry never expires
    Never,
    /// Entry is past its expiry (or its data can no longer be read)
    Expired,
    /// Entry expires at this epoch
    At(i64),
}

impl ExpiryStatus {
    /// Classify a stored expiry value
    pub fn from_stored(expires_at: i64, now: i64) -> Self {
        if expires_at == NEVER_EXPIRES {
            Self::Never
        } else if is_expired_at(expires_at, now) {
            Self::Expired
        } else {
            Self::At(expires_at)
        }
    }

    /// The expiry epoch, when there is one
    pub fn epoch(&self) -> Option<i64> {
        match self {
            Self::At(epoch) => Some(*epoch),
            _ => None,
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::Never => f.write_str("never"),
            Self::Expired => f.write_str("expired"),
            Self::At(epoch) => write!(f, "{epoch}"),
        }
    }
}
