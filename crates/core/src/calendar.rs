use chrono::{FixedOffset, Local, NaiveTime, Offset, TimeZone, Utc};

use crate::models::chart::MS_PER_DAY;

/// Where calendar days begin and end.
///
/// Daily change and per-day chart consolidation both depend on "midnight",
/// which differs between time zones. `Local` follows the host's zone;
/// `Fixed` pins a UTC offset so results are reproducible anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Calendar {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Calendar {
    /// Calendar in UTC.
    pub fn utc() -> Self {
        Calendar::Fixed(Utc.fix())
    }

    /// Calendar at a fixed offset east of UTC. `None` if the offset is not
    /// strictly within ±24 hours.
    pub fn fixed_minutes(offset_minutes: i32) -> Option<Self> {
        offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Calendar::Fixed)
    }

    /// Epoch milliseconds of midnight at the start of the day containing `ts_ms`.
    pub fn start_of_day(&self, ts_ms: i64) -> i64 {
        match self {
            Calendar::Local => start_of_day_in(&Local, ts_ms),
            Calendar::Fixed(offset) => start_of_day_in(offset, ts_ms),
        }
    }

    /// `true` when both timestamps fall on the same calendar day.
    pub fn same_day(&self, a_ms: i64, b_ms: i64) -> bool {
        self.start_of_day(a_ms) == self.start_of_day(b_ms)
    }

    /// Render `ts_ms` with a `chrono` format string. Timestamps chrono
    /// cannot represent render as an empty string.
    pub fn format(&self, ts_ms: i64, pattern: &str) -> String {
        match self {
            Calendar::Local => format_in(&Local, ts_ms, pattern),
            Calendar::Fixed(offset) => format_in(offset, ts_ms, pattern),
        }
    }
}

fn start_of_day_in<Tz: TimeZone>(tz: &Tz, ts_ms: i64) -> i64 {
    let Some(dt) = tz.timestamp_millis_opt(ts_ms).single() else {
        return ts_ms.div_euclid(MS_PER_DAY).saturating_mul(MS_PER_DAY);
    };
    let midnight = dt.date_naive().and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp_millis(),
        // Midnight skipped by a DST jump: the day starts at the first valid instant.
        None => {
            let elapsed = dt.naive_local().time() - NaiveTime::MIN;
            ts_ms.saturating_sub(elapsed.num_milliseconds())
        }
    }
}

fn format_in<Tz: TimeZone>(tz: &Tz, ts_ms: i64, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(ts_ms)
        .single()
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_default()
}

