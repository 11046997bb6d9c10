use crate::calendar::Calendar;
use crate::models::analytics::DailyChange;
use crate::models::chart::CurvePoint;

/// Computes the day-over-day change of a value curve.
///
/// "Day" is defined by the `Calendar` the service was created with.
pub struct ChangeService {
    calendar: Calendar,
}

impl ChangeService {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    /// Compare the latest point with the last point of any earlier day.
    ///
    /// Returns `{0, 0}` when the curve is empty or has no point before
    /// today's midnight. The percentage is 0 when the baseline value is 0.
    pub fn daily_change(&self, curve: &[CurvePoint]) -> DailyChange {
        let Some(current) = curve.last() else {
            return DailyChange::default();
        };
        let start_of_day = self.calendar.start_of_day(current.timestamp);

        let baseline = curve
            .iter()
            .filter(|p| p.timestamp < start_of_day)
            .max_by_key(|p| p.timestamp);

        match baseline {
            Some(baseline) => {
                let absolute = current.total_value - baseline.total_value;
                let percent = if baseline.total_value != 0.0 {
                    absolute / baseline.total_value * 100.0
                } else {
                    0.0
                };
                DailyChange::new(absolute, percent)
            }
            None => DailyChange::default(),
        }
    }
}

impl Default for ChangeService {
    fn default() -> Self {
        Self::new(Calendar::default())
    }
}
