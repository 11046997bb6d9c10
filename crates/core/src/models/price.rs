use serde::{Deserialize, Serialize};

use super::asset::AssetId;

/// Milliseconds in one minute. Events are grouped at this granularity.
pub const MS_PER_MINUTE: i64 = 60_000;

/// A single price observation for one asset.
///
/// Events arrive unsorted and several may reference the same asset.
/// Valuation uses `sell_price` (what the holding would fetch right now).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEvent {
    /// The asset this price belongs to
    pub asset_id: AssetId,

    /// Observation time, epoch milliseconds
    pub timestamp: i64,

    /// Price per unit when selling
    pub sell_price: f64,

    /// Price per unit when buying
    pub buy_price: f64,

    /// `true` when entered by the user, `false` when scraped automatically
    #[serde(default)]
    pub is_manual: bool,
}

impl PriceEvent {
    /// Create an automatic price event with the same buy and sell price.
    pub fn new(asset_id: AssetId, timestamp: i64, price: f64) -> Self {
        Self {
            asset_id,
            timestamp,
            sell_price: price,
            buy_price: price,
            is_manual: false,
        }
    }

    /// Create a manually entered price event with distinct buy/sell prices.
    pub fn manual(asset_id: AssetId, timestamp: i64, sell_price: f64, buy_price: f64) -> Self {
        Self {
            asset_id,
            timestamp,
            sell_price,
            buy_price,
            is_manual: true,
        }
    }

    /// The valuation instant this event belongs to: its timestamp with
    /// seconds and milliseconds dropped. Saturates at `i64::MIN`.
    pub fn valuation_minute(&self) -> i64 {
        self.timestamp
            .div_euclid(MS_PER_MINUTE)
            .saturating_mul(MS_PER_MINUTE)
    }
}
