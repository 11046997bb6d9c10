// ═══════════════════════════════════════════════════════════════════
// Integration Tests — PortfolioTracker facade end to end
// ═══════════════════════════════════════════════════════════════════

use portfolio_valuation_core::errors::CoreError;
use portfolio_valuation_core::models::asset::Asset;
use portfolio_valuation_core::models::chart::{CurvePoint, TimeRange, MS_PER_DAY};
use portfolio_valuation_core::models::portfolio::PortfolioSnapshot;
use portfolio_valuation_core::models::price::PriceEvent;
use portfolio_valuation_core::models::settings::Settings;
use portfolio_valuation_core::PortfolioTracker;

/// 2025-01-15T00:00:00Z (a Wednesday)
const JAN_15_2025: i64 = 1_736_899_200_000;
const HOUR: i64 = 3_600_000;

fn day(n: i64) -> i64 {
    JAN_15_2025 + n * MS_PER_DAY
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Two assets priced over three days:
/// - asset 1: 2 units, cost 100
/// - asset 2: 1 unit, cost 50, first priced on day 1
fn sample_snapshot() -> PortfolioSnapshot {
    PortfolioSnapshot::new(
        vec![
            Asset::with_name(1, 2.0, 100.0, "Gold"),
            Asset::with_name(2, 1.0, 50.0, "Silver"),
        ],
        vec![
            PriceEvent::new(1, day(0) + 9 * HOUR, 100.0),  // 200 + 50 = 250
            PriceEvent::new(1, day(1) + 9 * HOUR, 150.0),  // 300 + 50 = 350
            PriceEvent::new(2, day(1) + 9 * HOUR, 60.0),   // 300 + 60 = 360
            PriceEvent::new(1, day(2) + 10 * HOUR, 120.0), // 240 + 60 = 300
        ],
    )
}

fn tracker() -> PortfolioTracker {
    init_tracing();
    PortfolioTracker::with_snapshot(sample_snapshot(), Settings::utc()).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ═══════════════════════════════════════════════════════════════════
//  Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn new_tracker_is_empty() {
        let t = PortfolioTracker::new(Settings::default()).unwrap();
        assert!(t.snapshot().is_empty());
        assert!(t.build_curve().is_empty());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            max_chart_points: 0,
            ..Settings::default()
        };
        let err = PortfolioTracker::new(settings).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn from_json_snapshot() {
        let json = r#"{
            "assets": [{"id": 1, "quantity": 2.0, "cost_basis": 10.0}],
            "history": [{"asset_id": 1, "timestamp": 60000, "sell_price": 12.0, "buy_price": 13.0}]
        }"#;

        let t = PortfolioTracker::from_json(json, Settings::utc()).unwrap();

        assert_eq!(t.build_curve(), vec![CurvePoint::new(60_000, 24.0)]);
    }

    #[test]
    fn from_malformed_json_fails() {
        let err = PortfolioTracker::from_json("[1, 2", Settings::utc()).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn debug_impl_summarizes_counts() {
        let dbg = format!("{:?}", tracker());
        assert!(dbg.contains("PortfolioTracker"));
        assert!(dbg.contains("assets: 2"));
        assert!(dbg.contains("price_events: 4"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Valuation
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    #[test]
    fn curve_groups_simultaneous_updates() {
        let curve = tracker().build_curve();
        let values: Vec<f64> = curve.iter().map(|p| p.total_value).collect();
        assert_eq!(values, vec![250.0, 360.0, 300.0]);
    }

    #[test]
    fn daily_change_against_previous_day() {
        let change = tracker().daily_change();
        assert!(approx(change.absolute, -60.0));
        assert!(approx(change.percent, -60.0 / 360.0 * 100.0));
    }

    #[test]
    fn historical_stats() {
        let t = tracker();
        let stats = t.historical_stats();

        assert_eq!(stats.all_time_high, 360.0);
        assert_eq!(stats.all_time_high_date, day(1) + 9 * HOUR);
        assert_eq!(stats.all_time_low, 250.0);
        assert_eq!(stats.best_step_absolute, 110.0);
        assert!(approx(stats.best_step_percent, 44.0));
        assert_eq!(stats.worst_step_absolute, -60.0);
        assert!(approx(stats.max_drawdown_percent, 60.0 / 360.0 * 100.0));
        assert!(approx(stats.total_return_percent, 20.0));
    }

    #[test]
    fn portfolio_summary() {
        let summary = tracker().portfolio_summary();

        assert!(approx(summary.total_value, 300.0));
        assert!(approx(summary.total_cost, 250.0));
        assert!(approx(summary.total_return_pct, 20.0));
        assert_eq!(summary.last_updated, Some(day(2) + 10 * HOUR));
        assert_eq!(summary.holdings[0].name, "Gold");
    }

    #[test]
    fn growing_history_is_recomputed_from_scratch() {
        let mut t = tracker();
        let before = t.build_curve();

        t.add_price_events(vec![PriceEvent::new(2, day(3), 40.0)]);
        let after = t.build_curve();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().unwrap().total_value, 280.0);
    }

    #[test]
    fn replacing_assets_changes_valuation() {
        let mut t = tracker();
        t.set_assets(vec![Asset::new(1, 1.0, 100.0)]);

        let values: Vec<f64> = t.build_curve().iter().map(|p| p.total_value).collect();

        // asset 2 events are now unknown and ignored
        assert_eq!(values, vec![100.0, 150.0, 120.0]);
    }

    #[test]
    fn clearing_history_resets_every_output() {
        let mut t = tracker();
        t.set_history(vec![]);

        assert!(t.build_curve().is_empty());
        assert!(!t.historical_stats().has_data());
        assert_eq!(t.daily_change().absolute, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Charts
// ═══════════════════════════════════════════════════════════════════

mod charts {
    use super::*;

    #[test]
    fn prepare_chart_at_consolidates_days() {
        let chart = tracker().prepare_chart_at(TimeRange::Week, day(3));

        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.label_spacing, 1);
        // span 110, 10% padding
        assert!(approx(chart.y_axis.min, 239.0));
        assert!(approx(chart.y_axis.max, 371.0));
    }

    #[test]
    fn prepare_chart_respects_max_points() {
        let mut t = tracker();
        t.set_history((0..100).map(|i| PriceEvent::new(1, day(i), 100.0 + i as f64)).collect());
        t.set_settings(Settings {
            max_chart_points: 10,
            ..Settings::utc()
        })
        .unwrap();

        let chart = t.prepare_chart_at(TimeRange::All, day(100));

        // 100 days → step 10 → 10 points, last index 99 not a multiple
        assert_eq!(chart.points.len(), 11);
        assert_eq!(chart.points.last().unwrap().timestamp, day(99));
    }

    #[test]
    fn prepare_chart_now_excludes_old_history_from_short_ranges() {
        // Sample data is from January 2025, well outside the last 7 days.
        let chart = tracker().prepare_chart(TimeRange::Week);
        assert!(chart.points.is_empty());

        let all = tracker().prepare_chart(TimeRange::All);
        assert_eq!(all.points.len(), 3);
    }

    #[test]
    fn default_chart_uses_configured_range() {
        let mut t = tracker();
        t.set_settings(Settings {
            default_range: TimeRange::All,
            ..Settings::utc()
        })
        .unwrap();
        assert_eq!(t.prepare_default_chart().range, TimeRange::All);
    }

    #[test]
    fn invalid_settings_update_keeps_previous() {
        let mut t = tracker();
        let result = t.set_settings(Settings {
            utc_offset_minutes: Some(24 * 60),
            ..Settings::default()
        });

        assert!(result.is_err());
        assert_eq!(t.settings(), &Settings::utc());
        assert_eq!(t.build_curve().len(), 3);
    }

    #[test]
    fn axis_label_uses_calendar() {
        let t = tracker();
        assert_eq!(t.axis_label(day(0), TimeRange::Week), "Wed");
        assert_eq!(t.axis_label(day(0), TimeRange::All), "Jan 2025");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Export
// ═══════════════════════════════════════════════════════════════════

mod export {
    use super::*;

    #[test]
    fn snapshot_json_roundtrip() {
        let t = tracker();
        let json = t.export_snapshot_json().unwrap();

        let back = PortfolioTracker::from_json(&json, Settings::utc()).unwrap();

        assert_eq!(back.snapshot(), t.snapshot());
        assert_eq!(back.build_curve(), t.build_curve());
    }

    #[test]
    fn curve_json_is_array_of_points() {
        let t = tracker();
        let json = t.export_curve_json().unwrap();

        let points: Vec<CurvePoint> = serde_json::from_str(&json).unwrap();

        assert_eq!(points, t.build_curve());
    }
}
