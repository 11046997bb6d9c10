use std::collections::{HashMap, HashSet};

use crate::models::analytics::{HoldingSummary, PortfolioSummary};
use crate::models::asset::{Asset, AssetId};
use crate::models::price::PriceEvent;
use crate::services::curve_service::sorted_events;
use crate::services::stats_service::percent_of;

/// Computes holding-level analytics: current value vs. cost basis,
/// gain/loss, returns, allocation breakdown.
///
/// Uses the same "last known price" rule as the value curve: the sell price
/// of the latest event, or the cost basis while an asset has no events.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a portfolio summary at the latest known prices.
    ///
    /// Computes:
    /// - Total current value and total cost
    /// - Gain/loss and % return (overall and per-asset)
    /// - Allocation percentages, largest first
    pub fn portfolio_summary(&self, history: &[PriceEvent], assets: &[Asset]) -> PortfolioSummary {
        // 1. Latest (price, timestamp) per known asset
        let mut latest: HashMap<AssetId, (f64, i64)> = HashMap::new();
        let known: HashSet<AssetId> = assets.iter().map(|a| a.id).collect();
        for event in sorted_events(history) {
            if known.contains(&event.asset_id) {
                latest.insert(event.asset_id, (event.sell_price, event.timestamp));
            }
        }

        // 2. Per-asset value and cost
        let mut holdings: Vec<HoldingSummary> = assets
            .iter()
            .map(|asset| {
                let observed = latest.get(&asset.id).copied();
                let latest_price = observed.map_or(asset.cost_basis, |(price, _)| price);
                let current_value = asset.quantity * latest_price;
                let total_cost = asset.total_cost();
                let gain_loss = current_value - total_cost;

                HoldingSummary {
                    asset_id: asset.id,
                    name: asset.name.clone(),
                    quantity: asset.quantity,
                    latest_price,
                    has_price_history: observed.is_some(),
                    current_value,
                    total_cost,
                    gain_loss,
                    return_pct: percent_of(gain_loss, total_cost),
                    allocation_pct: 0.0, // filled below
                }
            })
            .collect();

        let total_value: f64 = holdings.iter().map(|h| h.current_value).sum();
        let total_cost: f64 = holdings.iter().map(|h| h.total_cost).sum();

        // 3. Allocation needs the total first
        for holding in &mut holdings {
            holding.allocation_pct = percent_of(holding.current_value, total_value);
        }

        // Sort by allocation (largest first); stable, so ties keep asset order
        holdings.sort_by(|a, b| {
            b.allocation_pct
                .partial_cmp(&a.allocation_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_gain_loss = total_value - total_cost;

        PortfolioSummary {
            last_updated: latest.values().map(|(_, ts)| *ts).max(),
            total_value,
            total_cost,
            total_gain_loss,
            total_return_pct: percent_of(total_gain_loss, total_cost),
            holdings,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
