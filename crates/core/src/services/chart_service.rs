use std::collections::BTreeMap;

use tracing::debug;

use crate::calendar::Calendar;
use crate::models::chart::{AxisRange, CurvePoint, PreparedChart, TimeRange};

/// Share of the mid value used as the smallest allowed axis padding.
const MIN_PADDING_RATIO: f64 = 0.01 / 2.0;

/// Prepares value curves for display.
///
/// The core computes all the numbers; the frontend only renders.
/// None of the operations modify the source curve.
pub struct ChartService {
    calendar: Calendar,
}

impl ChartService {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    /// Run the full display pipeline for one window:
    /// 1. Keep points inside `range` and consolidate to one point per day
    /// 2. Downsample to at most `max_points`
    /// 3. Compute padded y-axis bounds and x-axis label spacing
    pub fn prepare(
        &self,
        curve: &[CurvePoint],
        range: TimeRange,
        now_ms: i64,
        max_points: usize,
    ) -> PreparedChart {
        let filtered = self.filter_by_time_range(curve, range, now_ms);
        let points = self.downsample(&filtered, max_points);
        let y_axis = self.y_axis_range(&points, range);
        let label_spacing = self.axis_label_spacing(points.len());

        PreparedChart {
            range,
            points,
            y_axis,
            label_spacing,
        }
    }

    /// Thin a series to roughly `max_points`, keeping every `len / max_points`-th
    /// point plus the last one. Short series (and `max_points == 0`) come back
    /// unchanged.
    pub fn downsample(&self, points: &[CurvePoint], max_points: usize) -> Vec<CurvePoint> {
        if max_points == 0 || points.len() <= max_points {
            return points.to_vec();
        }

        let step = points.len() / max_points;
        let last = points.len() - 1;
        points
            .iter()
            .enumerate()
            .filter(|(i, _)| i % step == 0 || *i == last)
            .map(|(_, p)| *p)
            .collect()
    }

    /// Keep points inside the window ending at `now_ms`, then reduce each
    /// calendar day to its latest point. Output is ascending by timestamp.
    pub fn filter_by_time_range(
        &self,
        points: &[CurvePoint],
        range: TimeRange,
        now_ms: i64,
    ) -> Vec<CurvePoint> {
        let cutoff = range.cutoff(now_ms);

        // One entry per calendar day, keyed by that day's midnight.
        let mut by_day: BTreeMap<i64, CurvePoint> = BTreeMap::new();
        for point in points.iter().filter(|p| p.timestamp >= cutoff) {
            let day = self.calendar.start_of_day(point.timestamp);
            by_day
                .entry(day)
                .and_modify(|kept| {
                    if point.timestamp >= kept.timestamp {
                        *kept = *point;
                    }
                })
                .or_insert(*point);
        }

        debug!(
            range = %range,
            input = points.len(),
            days = by_day.len(),
            "filtered curve to time range"
        );
        by_day.into_values().collect()
    }

    /// Value-axis bounds with range-dependent padding.
    ///
    /// Padding is `span × range.padding_factor()`, but never less than half a
    /// percent of the mid value so a flat series still gets vertical room.
    /// The lower bound is clamped at 0. Empty input yields `(0, 100)`.
    pub fn y_axis_range(&self, points: &[CurvePoint], range: TimeRange) -> AxisRange {
        if points.is_empty() {
            return AxisRange::default();
        }

        let (min_v, max_v) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.total_value), hi.max(p.total_value))
        });
        let span = max_v - min_v;
        let padding = span * range.padding_factor();
        let min_padding = (min_v + max_v) / 2.0 * MIN_PADDING_RATIO;
        let adjusted = padding.max(min_padding);

        AxisRange::new((min_v - adjusted).max(0.0), max_v + adjusted)
    }

    /// Label every n-th x-axis point so roughly five or six labels show.
    /// Never returns 0.
    pub fn axis_label_spacing(&self, point_count: usize) -> usize {
        match point_count {
            0..=7 => 1,
            8..=30 => (point_count / 6).max(1),
            _ => (point_count / 5).max(1),
        }
    }

    /// Format an x-axis label at the granularity of `range`
    /// ("Mon", "Jan 05", "Jan 2025").
    pub fn format_axis_label(&self, timestamp: i64, range: TimeRange) -> String {
        self.calendar.format(timestamp, range.label_format().pattern())
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(Calendar::default())
    }
}
