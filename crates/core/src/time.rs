use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, SecondsFormat, Utc};

/// 100ns intervals per second.
pub const TICKS_PER_SEC: u64 = 10_000_000;

/// Seconds between 1601-01-01 and 1970-01-01 (UTC).
const EPOCH_DELTA_SECS: i64 = 11_644_473_600;

/// Tick count of the Unix epoch.
pub const UNIX_EPOCH_TICKS: u64 = EPOCH_DELTA_SECS as u64 * TICKS_PER_SEC;

/// Timestamp as a count of 100ns ticks since 1601-01-01 UTC.
///
/// This is the native FILETIME representation; it is stored verbatim by the
/// codec so that round trips are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FileTime(u64);

impl FileTime {
    #[inline]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    #[inline]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Rebuild from the (high, low) pair used by FILETIME.
    #[inline]
    pub const fn from_halves(high: u32, low: u32) -> Self {
        Self(((high as u64) << 32) | low as u64)
    }

    #[inline]
    pub const fn high(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub const fn low(self) -> u32 {
        self.0 as u32
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert a `SystemTime`. Instants before 1601 clamp to 0.
    pub fn from_system_time(t: SystemTime) -> Self {
        let ticks = match t.duration_since(UNIX_EPOCH) {
            Ok(after) => UNIX_EPOCH_TICKS.saturating_add(duration_to_ticks(after)),
            Err(e) => UNIX_EPOCH_TICKS.saturating_sub(duration_to_ticks(e.duration())),
        };
        Self(ticks)
    }

    pub fn to_system_time(self) -> SystemTime {
        if self.0 >= UNIX_EPOCH_TICKS {
            UNIX_EPOCH
                .checked_add(ticks_to_duration(self.0 - UNIX_EPOCH_TICKS))
                .unwrap_or(UNIX_EPOCH)
        } else {
            UNIX_EPOCH
                .checked_sub(ticks_to_duration(UNIX_EPOCH_TICKS - self.0))
                .unwrap_or(UNIX_EPOCH)
        }
    }

    /// Convert a UTC datetime; sub-100ns precision is truncated.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let secs = i128::from(dt.timestamp()) + i128::from(EPOCH_DELTA_SECS);
        let ticks = secs * i128::from(TICKS_PER_SEC) + i128::from(dt.timestamp_subsec_nanos() / 100);
        Self(ticks.clamp(0, i128::from(u64::MAX)) as u64)
    }

    /// `None` when the tick count lies outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let secs = (self.0 / TICKS_PER_SEC) as i64 - EPOCH_DELTA_SECS;
        let nanos = ((self.0 % TICKS_PER_SEC) * 100) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl From<SystemTime> for FileTime {
    fn from(t: SystemTime) -> Self {
        Self::from_system_time(t)
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "{} ticks", self.0),
        }
    }
}

#[inline]
fn duration_to_ticks(d: Duration) -> u64 {
    d.as_secs()
        .saturating_mul(TICKS_PER_SEC)
        .saturating_add(u64::from(d.subsec_nanos() / 100))
}

#[inline]
fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::new(ticks / TICKS_PER_SEC, ((ticks % TICKS_PER_SEC) * 100) as u32)
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
