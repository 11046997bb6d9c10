use serde::{Deserialize, Serialize};

/// Identifier of a held asset, as assigned by the persistence layer.
pub type AssetId = i64;

/// A single holding in the portfolio.
///
/// Only `id`, `quantity` and `cost_basis` take part in valuation.
/// `name` is display data carried along for summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier, referenced by `PriceEvent::asset_id`
    pub id: AssetId,

    /// Number of units held
    pub quantity: f64,

    /// Originally paid price per unit. Used as the price of the asset
    /// until its first price event is seen.
    pub cost_basis: f64,

    /// Human-readable name (e.g., "Bitcoin", "Gold 1oz coin")
    #[serde(default)]
    pub name: String,
}

impl Asset {
    pub fn new(id: AssetId, quantity: f64, cost_basis: f64) -> Self {
        Self {
            id,
            quantity,
            cost_basis,
            name: String::new(),
        }
    }

    /// Create an asset with a display name attached.
    pub fn with_name(
        id: AssetId,
        quantity: f64,
        cost_basis: f64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            quantity,
            cost_basis,
            name: name.into(),
        }
    }

    /// Total amount paid for the holding (quantity × cost basis).
    pub fn total_cost(&self) -> f64 {
        self.quantity * self.cost_basis
    }
}
