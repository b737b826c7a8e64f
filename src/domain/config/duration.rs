//! Duration value object used for the transport timeout setting

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default transport timeout for analysis requests (2 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A positive whole-second duration written as `30s`, `2m` or `1m30s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    secs: u64,
}

impl Duration {
    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Default transport timeout (2 minutes)
    pub const fn default_timeout() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_secs(self.secs)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_ascii_lowercase();

        let mut total: u64 = 0;
        let mut digits = String::new();
        let mut seen_minutes = false;
        let mut seen_seconds = false;

        for ch in input.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                'm' if !digits.is_empty() && !seen_minutes && !seen_seconds => {
                    let minutes: u64 = digits.parse().map_err(|_| err())?;
                    total = minutes.checked_mul(60).ok_or_else(err)?;
                    digits.clear();
                    seen_minutes = true;
                }
                's' if !digits.is_empty() && !seen_seconds => {
                    let seconds: u64 = digits.parse().map_err(|_| err())?;
                    total = total.checked_add(seconds).ok_or_else(err)?;
                    digits.clear();
                    seen_seconds = true;
                }
                _ => return Err(err()),
            }
        }

        if !digits.is_empty() || total == 0 {
            return Err(err());
        }

        Ok(Self { secs: total })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minutes, seconds) = (self.secs / 60, self.secs % 60);
        match (minutes, seconds) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_supported_forms() {
        assert_eq!("45s".parse::<Duration>().unwrap().as_secs(), 45);
        assert_eq!("3m".parse::<Duration>().unwrap().as_secs(), 180);
        assert_eq!("1m30s".parse::<Duration>().unwrap().as_secs(), 90);
        assert_eq!(" 2M ".parse::<Duration>().unwrap().as_secs(), 120);
    }

    #[test]
    fn parse_rejects_zero_and_garbage() {
        for input in ["", "0s", "0m0s", "90", "abc", "1s2m", "5x", "1m1m"] {
            assert!(input.parse::<Duration>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn display_round_trips_common_values() {
        assert_eq!(Duration::from_secs(30).to_string(), "30s");
        assert_eq!(Duration::from_secs(120).to_string(), "2m");
        assert_eq!(Duration::from_secs(150).to_string(), "2m30s");
    }

    #[test]
    fn default_timeout_is_two_minutes() {
        assert_eq!(Duration::default().as_std(), StdDuration::from_secs(120));
    }
}
