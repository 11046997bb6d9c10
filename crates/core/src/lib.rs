pub mod calendar;
pub mod errors;
pub mod models;
pub mod services;

use models::{
    analytics::{DailyChange, HistoricalStats, PortfolioSummary},
    asset::Asset,
    chart::{CurvePoint, PreparedChart, TimeRange},
    portfolio::PortfolioSnapshot,
    price::PriceEvent,
    settings::Settings,
};
use services::{
    analytics_service::AnalyticsService, change_service::ChangeService,
    chart_service::ChartService, curve_service::CurveService, stats_service::StatsService,
};
use tracing::warn;

use errors::CoreError;

/// Main entry point for the portfolio valuation core library.
/// Holds the latest asset/price snapshot and the settings, and recomputes
/// every output from them on demand. Nothing is cached between calls.
#[must_use]
pub struct PortfolioTracker {
    snapshot: PortfolioSnapshot,
    settings: Settings,
    curve_service: CurveService,
    change_service: ChangeService,
    stats_service: StatsService,
    chart_service: ChartService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("assets", &self.snapshot.assets.len())
            .field("price_events", &self.snapshot.history.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl PortfolioTracker {
    /// Create a tracker with no assets and no history.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        Self::with_snapshot(PortfolioSnapshot::default(), settings)
    }

    /// Create a tracker over an existing snapshot.
    pub fn with_snapshot(snapshot: PortfolioSnapshot, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(snapshot, settings))
    }

    /// Create a tracker from a JSON snapshot (`{"assets": [...], "history": [...]}`).
    pub fn from_json(json: &str, settings: Settings) -> Result<Self, CoreError> {
        let snapshot: PortfolioSnapshot = serde_json::from_str(json)?;
        Self::with_snapshot(snapshot, settings)
    }

    // ── Snapshot ────────────────────────────────────────────────────

    /// Replace the holdings.
    pub fn set_assets(&mut self, assets: Vec<Asset>) {
        self.snapshot.assets = assets;
    }

    /// Replace the price history.
    pub fn set_history(&mut self, history: Vec<PriceEvent>) {
        self.snapshot.history = history;
    }

    /// Append newly observed price events (any order).
    pub fn add_price_events(&mut self, events: impl IntoIterator<Item = PriceEvent>) {
        self.snapshot.history.extend(events);
    }

    #[must_use]
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Invalid settings are rejected and the
    /// current ones stay in effect.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        if let Err(e) = settings.validate() {
            warn!(error = %e, "rejected settings update");
            return Err(e);
        }
        let snapshot = std::mem::take(&mut self.snapshot);
        *self = Self::build(snapshot, settings);
        Ok(())
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// The portfolio value curve, one point per valuation minute.
    #[must_use]
    pub fn build_curve(&self) -> Vec<CurvePoint> {
        self.curve_service
            .build_curve(&self.snapshot.history, &self.snapshot.assets)
    }

    /// Change of the latest value against the previous day's last value.
    #[must_use]
    pub fn daily_change(&self) -> DailyChange {
        self.change_service.daily_change(&self.build_curve())
    }

    /// ATH/ATL, best/worst step, max drawdown and total return.
    #[must_use]
    pub fn historical_stats(&self) -> HistoricalStats {
        self.stats_service.compute(&self.build_curve())
    }

    /// Value, cost and allocation per holding at the latest prices.
    #[must_use]
    pub fn portfolio_summary(&self) -> PortfolioSummary {
        self.analytics_service
            .portfolio_summary(&self.snapshot.history, &self.snapshot.assets)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Display-ready curve for `range`, relative to the current time.
    #[must_use]
    pub fn prepare_chart(&self, range: TimeRange) -> PreparedChart {
        self.prepare_chart_at(range, chrono::Utc::now().timestamp_millis())
    }

    /// Display-ready curve for the configured default range.
    #[must_use]
    pub fn prepare_default_chart(&self) -> PreparedChart {
        self.prepare_chart(self.settings.default_range)
    }

    /// Display-ready curve for `range`, relative to `now_ms`.
    #[must_use]
    pub fn prepare_chart_at(&self, range: TimeRange, now_ms: i64) -> PreparedChart {
        self.chart_service.prepare(
            &self.build_curve(),
            range,
            now_ms,
            self.settings.max_chart_points,
        )
    }

    /// X-axis label for `timestamp` at the granularity of `range`.
    #[must_use]
    pub fn axis_label(&self, timestamp: i64, range: TimeRange) -> String {
        self.chart_service.format_axis_label(timestamp, range)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the snapshot as a JSON string (readable by `from_json`).
    pub fn export_snapshot_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    /// Export the value curve as a JSON array of points.
    pub fn export_curve_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.build_curve())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize curve: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(snapshot: PortfolioSnapshot, settings: Settings) -> Self {
        let calendar = settings.calendar();
        Self {
            snapshot,
            settings,
            curve_service: CurveService::new(),
            change_service: ChangeService::new(calendar),
            stats_service: StatsService::new(),
            chart_service: ChartService::new(calendar),
            analytics_service: AnalyticsService::new(),
        }
    }
}
