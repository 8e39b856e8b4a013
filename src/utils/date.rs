//! Calendar date parsing for post metadata.
//!
//! Posts carry dates as `YYYY-MM-DD` strings. This module validates them,
//! truncates RFC3339 timestamps to the date part, and digs dates out of
//! slugs like `2025-09-20-hello-world`.

use anyhow::{Result, bail};
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// `YYYY-MM-DD` anywhere in a string (used to scan slugs).
/// Explicit ASCII classes: `\d` needs regex's unicode-perl feature,
/// which this crate does not enable.
static YMD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid regex"));

/// Calendar date without time-of-day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse from "YYYY-MM-DD", or any longer string starting with it
    /// ("2025-09-20T08:30:00Z" truncates to the date part).
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        if bytes.len() < 10 {
            return None;
        }
        if bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        // Anything after the date must be a time component, not more digits
        if bytes.len() > 10 && bytes[10] != b'T' && bytes[10] != b' ' {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;

        let date = Self::from_ymd(year, month, day);
        date.validate().ok()?;
        Some(date)
    }

    /// Find the first `YYYY-MM-DD` pattern in a slug, if it validates.
    pub fn from_slug(slug: &str) -> Option<Self> {
        YMD_RE.find(slug).and_then(|m| Self::parse(m.as_str()))
    }

    /// Current date, UTC. Same basis as the artifact's `generated`
    /// timestamp, so a post defaulting to "today" agrees with it.
    pub fn today() -> Self {
        use chrono::Datelike;
        let now = chrono::Utc::now();
        Self::from_ymd(now.year() as u16, now.month() as u8, now.day() as u8)
    }

    pub fn validate(&self) -> Result<()> {
        let Self { year, month, day } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let is_leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        let max_days = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if is_leap => 29,
            2 => 28,
            _ => unreachable!(),
        };

        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }

        Ok(())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn parse_u16(bytes: &[u8]) -> Option<u16> {
    let mut n: u16 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add((b - b'0') as u16)?;
    }
    Some(n)
}

fn parse_u8(bytes: &[u8]) -> Option<u8> {
    let mut n: u8 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(b - b'0')?;
    }
    Some(n)
}
