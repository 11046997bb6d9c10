use crate::models::analytics::HistoricalStats;
use crate::models::chart::CurvePoint;

/// Computes all-time and step statistics over a value curve.
///
/// Pure business logic: one forward pass over the curve.
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// Compute ATH/ATL, best/worst step, max drawdown and total return.
    ///
    /// - Curves with fewer than two points yield `HistoricalStats::default()`.
    /// - ATH/ATL keep the first occurrence on ties.
    /// - Best/worst step start at 0, so a curve that never rises reports a
    ///   best step of 0 (and one that never falls a worst step of 0).
    /// - Every percentage divides by a prior value and is 0 when it is 0.
    pub fn compute(&self, curve: &[CurvePoint]) -> HistoricalStats {
        let (first, last) = match curve {
            [first, .., last] => (first, last),
            _ => return HistoricalStats::default(),
        };

        let mut stats = HistoricalStats {
            all_time_high: first.total_value,
            all_time_high_date: first.timestamp,
            all_time_low: first.total_value,
            all_time_low_date: first.timestamp,
            ..HistoricalStats::default()
        };
        let mut peak = first.total_value;

        for (prev, point) in curve.iter().zip(curve.iter().skip(1)) {
            let value = point.total_value;

            if value > stats.all_time_high {
                stats.all_time_high = value;
                stats.all_time_high_date = point.timestamp;
            }
            if value < stats.all_time_low {
                stats.all_time_low = value;
                stats.all_time_low_date = point.timestamp;
            }

            let change = value - prev.total_value;
            let change_pct = percent_of(change, prev.total_value);
            if change > stats.best_step_absolute {
                stats.best_step_absolute = change;
                stats.best_step_percent = change_pct;
                stats.best_step_date = point.timestamp;
            }
            if change < stats.worst_step_absolute {
                stats.worst_step_absolute = change;
                stats.worst_step_percent = change_pct;
                stats.worst_step_date = point.timestamp;
            }

            peak = peak.max(value);
            if peak > 0.0 {
                let drawdown = (peak - value) / peak * 100.0;
                if drawdown > stats.max_drawdown_percent {
                    stats.max_drawdown_percent = drawdown;
                }
            }
        }

        stats.total_return_percent = percent_of(last.total_value - first.total_value, first.total_value);
        stats
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}

/// `amount / base * 100`, or 0 when `base` is 0.
pub(crate) fn percent_of(amount: f64, base: f64) -> f64 {
    if base != 0.0 {
        amount / base * 100.0
    } else {
        0.0
    }
}
