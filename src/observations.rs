//! Price Observations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stores::StoreId;

/// An observed price for an item at a store, as sourced from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    /// Catalog item name
    pub item_name: String,

    /// Store the price was observed at
    pub store_id: StoreId,

    /// Store display name
    pub store_name: String,

    /// Shelf price
    pub regular_price: Decimal,

    /// Promotional price, if the item is on sale
    #[serde(default)]
    pub sale_price: Option<Decimal>,

    /// Promotion text shown alongside the sale price
    #[serde(default)]
    pub sale_label: Option<String>,
}

impl PriceObservation {
    /// Create an observation at the regular price.
    pub fn new(
        item_name: impl Into<String>,
        store_id: impl Into<StoreId>,
        store_name: impl Into<String>,
        regular_price: Decimal,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            store_id: store_id.into(),
            store_name: store_name.into(),
            regular_price,
            sale_price: None,
            sale_label: None,
        }
    }

    /// Set the sale price.
    #[must_use]
    pub fn on_sale(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Set the sale label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.sale_label = Some(label.into());
        self
    }

    /// The price the shopper actually pays.
    ///
    /// A sale price above the shelf price is ignored, so the effective price never exceeds the
    /// regular price.
    pub fn effective_price(&self) -> Decimal {
        self.sale_price
            .map_or(self.regular_price, |sale| sale.min(self.regular_price))
    }

    /// Difference between the regular and effective price.
    pub fn savings(&self) -> Decimal {
        self.regular_price - self.effective_price()
    }
}
