use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// A single point of the portfolio value curve.
///
/// The core generates these and the frontend just renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Valuation instant, epoch milliseconds (minute-aligned for built curves)
    pub timestamp: i64,

    /// Total portfolio value at this instant
    pub total_value: f64,
}

impl CurvePoint {
    pub fn new(timestamp: i64, total_value: f64) -> Self {
        Self {
            timestamp,
            total_value,
        }
    }
}

/// Granularity of x-axis labels for a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelFormat {
    /// Abbreviated weekday, e.g. "Mon"
    DayName,
    /// Abbreviated month and day, e.g. "Jan 05"
    MonthDay,
    /// Abbreviated month and year, e.g. "Jan 2025"
    MonthYear,
}

impl LabelFormat {
    /// `chrono` format string for this granularity.
    pub fn pattern(&self) -> &'static str {
        match self {
            LabelFormat::DayName => "%a",
            LabelFormat::MonthDay => "%b %d",
            LabelFormat::MonthYear => "%b %Y",
        }
    }
}

/// The fixed set of chart windows offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last 7 days
    Week,
    /// Last 30 days
    #[default]
    Month,
    /// Last 180 days
    HalfYear,
    /// Last 365 days
    Year,
    /// Entire history
    All,
}

impl TimeRange {
    /// Window length in days, `None` for `All`.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::HalfYear => Some(180),
            TimeRange::Year => Some(365),
            TimeRange::All => None,
        }
    }

    /// Fraction of the value span added above and below the curve.
    /// Wider windows get tighter padding.
    pub fn padding_factor(&self) -> f64 {
        match self {
            TimeRange::Week => 0.10,
            TimeRange::Month => 0.08,
            TimeRange::HalfYear => 0.05,
            TimeRange::Year | TimeRange::All => 0.03,
        }
    }

    pub fn label_format(&self) -> LabelFormat {
        match self {
            TimeRange::Week => LabelFormat::DayName,
            TimeRange::Month | TimeRange::HalfYear => LabelFormat::MonthDay,
            TimeRange::Year | TimeRange::All => LabelFormat::MonthYear,
        }
    }

    /// Earliest timestamp (inclusive) kept for this window, relative to `now_ms`.
    pub fn cutoff(&self, now_ms: i64) -> i64 {
        match self.days() {
            Some(days) => now_ms.saturating_sub(days * MS_PER_DAY),
            None => 0,
        }
    }

    /// Short label used in UIs and when parsing (`"7d"`, ..., `"all"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::HalfYear => "180d",
            TimeRange::Year => "365d",
            TimeRange::All => "all",
        }
    }

    /// All ranges, shortest first.
    pub fn all() -> [TimeRange; 5] {
        [
            TimeRange::Week,
            TimeRange::Month,
            TimeRange::HalfYear,
            TimeRange::Year,
            TimeRange::All,
        ]
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "180d" => Ok(TimeRange::HalfYear),
            "365d" => Ok(TimeRange::Year),
            "all" => Ok(TimeRange::All),
            _ => Err(CoreError::InvalidTimeRange(s.to_string())),
        }
    }
}

/// Vertical bounds for rendering a value chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for AxisRange {
    /// Range shown when there is nothing to plot.
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

/// A curve ready for display: filtered to a window, one point per day,
/// bounded in size, with axis bounds and label spacing precomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedChart {
    /// The window this chart was prepared for
    pub range: TimeRange,

    /// Points to plot, ascending by timestamp
    pub points: Vec<CurvePoint>,

    /// Padded value-axis bounds
    pub y_axis: AxisRange,

    /// Label every n-th point on the x-axis
    pub label_spacing: usize,
}
