use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetId};
use super::price::PriceEvent;

/// The inputs of every valuation: holdings plus their price history.
///
/// This is an immutable snapshot handed over by the storage layer. Order of
/// either list is irrelevant; the engine sorts what it needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Holdings with quantity and cost basis
    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Price observations for the holdings, in any order
    #[serde(default)]
    pub history: Vec<PriceEvent>,
}

impl PortfolioSnapshot {
    pub fn new(assets: Vec<Asset>, history: Vec<PriceEvent>) -> Self {
        Self { assets, history }
    }

    /// `true` when there are neither assets nor price events.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.history.is_empty()
    }

    /// Find an asset by its id.
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }
}
