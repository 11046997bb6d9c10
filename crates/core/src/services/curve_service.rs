use std::collections::HashMap;

use tracing::debug;

use crate::models::asset::{Asset, AssetId};
use crate::models::chart::CurvePoint;
use crate::models::price::PriceEvent;

/// Builds the portfolio value curve from raw price events.
///
/// Pure business logic with no I/O and no shared state. Every call starts from
/// scratch, so it can be re-run on a growing history at any time.
pub struct CurveService;

impl CurveService {
    pub fn new() -> Self {
        Self
    }

    /// Merge per-asset price events into one chronological value series.
    ///
    /// 1. Seed a last-known-price map with each asset's cost basis
    /// 2. Sort events by timestamp and group them by minute
    /// 3. For each group, apply its prices (later events win) and sum
    ///    `quantity × last known price` over all assets
    ///
    /// Events for ids that are not in `assets` are ignored. Returns one point
    /// per minute group, ascending; empty when either input is empty.
    pub fn build_curve(&self, history: &[PriceEvent], assets: &[Asset]) -> Vec<CurvePoint> {
        if history.is_empty() || assets.is_empty() {
            return Vec::new();
        }

        let seed: HashMap<AssetId, f64> = assets.iter().map(|a| (a.id, a.cost_basis)).collect();
        let groups = group_by_minute(&sorted_events(history));
        let mut ignored = 0usize;

        let (_, curve) = groups.iter().fold(
            (seed, Vec::with_capacity(groups.len())),
            |(mut prices, mut curve), (minute, events)| {
                for event in events {
                    match prices.get_mut(&event.asset_id) {
                        Some(price) => *price = event.sell_price,
                        None => ignored += 1,
                    }
                }
                curve.push(CurvePoint::new(*minute, total_value(assets, &prices)));
                (prices, curve)
            },
        );

        debug!(
            events = history.len(),
            points = curve.len(),
            ignored_events = ignored,
            "built portfolio value curve"
        );
        curve
    }
}

impl Default for CurveService {
    fn default() -> Self {
        Self::new()
    }
}

/// Events ordered by timestamp. The sort is stable, so events sharing a
/// timestamp keep their input order.
pub(crate) fn sorted_events(history: &[PriceEvent]) -> Vec<&PriceEvent> {
    let mut events: Vec<&PriceEvent> = history.iter().collect();
    events.sort_by_key(|e| e.timestamp);
    events
}

/// Split sorted events into runs sharing the same valuation minute.
fn group_by_minute<'a>(events: &[&'a PriceEvent]) -> Vec<(i64, Vec<&'a PriceEvent>)> {
    let mut groups: Vec<(i64, Vec<&'a PriceEvent>)> = Vec::new();
    for &event in events {
        let minute = event.valuation_minute();
        if let Some((current, batch)) = groups.last_mut() {
            if *current == minute {
                batch.push(event);
                continue;
            }
        }
        groups.push((minute, vec![event]));
    }
    groups
}

fn total_value(assets: &[Asset], prices: &HashMap<AssetId, f64>) -> f64 {
    assets
        .iter()
        .map(|a| a.quantity * prices.get(&a.id).copied().unwrap_or(0.0))
        .sum()
}
