use serde::{Deserialize, Serialize};

use super::asset::AssetId;

/// Day-over-day change of the portfolio value.
///
/// `{0, 0}` means there was no earlier day to compare against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyChange {
    /// Current value minus the last value of the previous day
    pub absolute: f64,

    /// `absolute` relative to the previous day's value, in percent
    pub percent: f64,
}

impl DailyChange {
    pub fn new(absolute: f64, percent: f64) -> Self {
        Self { absolute, percent }
    }
}

/// Performance statistics over a whole value curve.
///
/// All fields are zero when the curve has fewer than two points. Dates are
/// epoch milliseconds, and a date of `0` is the "not computed" marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalStats {
    pub all_time_high: f64,
    pub all_time_high_date: i64,
    pub all_time_low: f64,
    pub all_time_low_date: i64,

    /// Largest step-over-step increase (0 if the value never rose)
    pub best_step_absolute: f64,
    pub best_step_percent: f64,
    /// Timestamp of the later point of the best step
    pub best_step_date: i64,

    /// Largest step-over-step decrease, negative (0 if the value never fell)
    pub worst_step_absolute: f64,
    pub worst_step_percent: f64,
    /// Timestamp of the later point of the worst step
    pub worst_step_date: i64,

    /// Largest decline from a running peak, as a positive percentage
    pub max_drawdown_percent: f64,

    /// Change from the first to the last point, in percent
    pub total_return_percent: f64,
}

impl HistoricalStats {
    /// `false` for the all-zero value returned on curves shorter than two points.
    pub fn has_data(&self) -> bool {
        *self != Self::default()
    }
}

/// Summary of the entire portfolio at its latest known prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Timestamp of the most recent price event for a held asset, if any
    pub last_updated: Option<i64>,

    /// Σ quantity × latest price
    pub total_value: f64,

    /// Σ quantity × cost basis
    pub total_cost: f64,

    /// total_value - total_cost
    pub total_gain_loss: f64,

    /// (total_gain_loss / total_cost) * 100
    pub total_return_pct: f64,

    /// Per-asset breakdown, largest allocation first
    pub holdings: Vec<HoldingSummary>,
}

/// Summary of a single held asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingSummary {
    pub asset_id: AssetId,

    /// Display name copied from the asset
    pub name: String,

    /// Units held
    pub quantity: f64,

    /// Sell price of the latest event, or the cost basis if there is none
    pub latest_price: f64,

    /// Whether any price event exists for this asset
    pub has_price_history: bool,

    /// quantity × latest_price
    pub current_value: f64,

    /// quantity × cost_basis
    pub total_cost: f64,

    /// current_value - total_cost
    pub gain_loss: f64,

    /// Percentage return for this asset
    pub return_pct: f64,

    /// Allocation percentage (this asset's value / total portfolio value × 100)
    pub allocation_pct: f64,
}
