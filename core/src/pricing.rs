//! Time-aligned list price lookup.
//!
//! Each product's price history is a step function: a list price holds from
//! its start date until the product's next start date. A sale is priced with
//! the step in force on its transaction date (last observation carried
//! forward, per product). Sales dated before a product's first price, or
//! for products with no history at all, have no list price.

use crate::{
    quarter::Quarter,
    store::{ListPriceRow, SaleRow},
    types::ProductId,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Per-product price steps, sorted by start date.
#[derive(Debug, Clone, Default)]
pub struct PriceTimeline {
    steps: HashMap<ProductId, Vec<(NaiveDateTime, f64)>>,
}

impl PriceTimeline {
    /// Input order does not matter. When a product has two entries with the
    /// same start date, the later one in `history` wins.
    pub fn from_history(history: &[ListPriceRow]) -> Self {
        let mut steps: HashMap<ProductId, Vec<(NaiveDateTime, f64)>> = HashMap::new();
        for row in history {
            steps
                .entry(row.product_id)
                .or_default()
                .push((row.start_date, row.list_price));
        }
        for list in steps.values_mut() {
            // Stable, so equal dates keep input order and the last one is found first
            // by the upper-bound search below.
            list.sort_by_key(|(start, _)| *start);
        }
        Self { steps }
    }

    /// The list price in force for `product` at `at`, if any.
    pub fn price_at(&self, product: ProductId, at: NaiveDateTime) -> Option<f64> {
        let list = self.steps.get(&product)?;
        let upper = list.partition_point(|(start, _)| *start <= at);
        upper.checked_sub(1).map(|idx| list[idx].1)
    }
}

/// A sale joined with the list price in force on its date.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSale {
    pub product_id: ProductId,
    pub transaction_date: NaiveDateTime,
    pub quantity: i64,
    pub actual_cost: f64,
    pub list_price: f64,
    /// More than one unit was bought.
    pub multi_item: bool,
}

impl PricedSale {
    /// `(list price - actual unit cost) * quantity`.
    pub fn total_discount(&self) -> f64 {
        (self.list_price - self.actual_cost) * self.quantity as f64
    }

    pub fn quarter(&self) -> Quarter {
        Quarter::of_timestamp(self.transaction_date)
    }
}

/// Result of aligning sales against a price timeline.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    pub priced: Vec<PricedSale>,
    /// Sales with no list price on their date; excluded from aggregates.
    pub unpriced: Vec<SaleRow>,
}

/// Price every sale. Sale order is preserved within each output list.
pub fn align(sales: &[SaleRow], timeline: &PriceTimeline) -> Alignment {
    let mut alignment = Alignment::default();
    for sale in sales {
        match timeline.price_at(sale.product_id, sale.transaction_date) {
            Some(list_price) => alignment.priced.push(PricedSale {
                product_id: sale.product_id,
                transaction_date: sale.transaction_date,
                quantity: sale.quantity,
                actual_cost: sale.actual_cost,
                list_price,
                multi_item: sale.quantity > 1,
            }),
            None => alignment.unpriced.push(sale.clone()),
        }
    }
    alignment
}
