use serde::{Deserialize, Serialize};

use super::chart::TimeRange;
use crate::calendar::Calendar;
use crate::errors::CoreError;

/// Default upper bound on points handed to a chart.
pub const DEFAULT_MAX_CHART_POINTS: usize = 120;

/// Minutes in a day. Offsets must stay strictly inside ±this value.
const MINUTES_PER_DAY: i32 = 24 * 60;

/// User-configurable settings for valuation and chart preparation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Charts are downsampled to at most this many points.
    #[serde(default = "default_max_chart_points")]
    pub max_chart_points: usize,

    /// Fixed UTC offset (minutes east) defining calendar days.
    /// `None` uses the system's local time zone.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Window used when the caller does not pick one.
    #[serde(default)]
    pub default_range: TimeRange,
}

fn default_max_chart_points() -> usize {
    DEFAULT_MAX_CHART_POINTS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_chart_points: DEFAULT_MAX_CHART_POINTS,
            utc_offset_minutes: None,
            default_range: TimeRange::default(),
        }
    }
}

impl Settings {
    /// Settings pinned to UTC calendar days.
    pub fn utc() -> Self {
        Self {
            utc_offset_minutes: Some(0),
            ..Self::default()
        }
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_chart_points == 0 {
            return Err(CoreError::ValidationError(
                "max_chart_points must be at least 1".into(),
            ));
        }
        if let Some(offset) = self.utc_offset_minutes {
            if offset <= -MINUTES_PER_DAY || offset >= MINUTES_PER_DAY {
                return Err(CoreError::ValidationError(format!(
                    "UTC offset of {offset} minutes is outside the allowed range of ±{} minutes",
                    MINUTES_PER_DAY - 1
                )));
            }
        }
        Ok(())
    }

    /// Day-boundary policy derived from `utc_offset_minutes`.
    /// An offset that fails validation falls back to local time.
    pub fn calendar(&self) -> Calendar {
        self.utc_offset_minutes
            .and_then(Calendar::fixed_minutes)
            .unwrap_or(Calendar::Local)
    }
}
