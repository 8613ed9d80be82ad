//! Total inventory quantity per product model.

use super::{Report, ReportStats};
use crate::{
    error::ReportResult,
    output::write_rows,
    relational::{group_sum, hash_join, nulls_last},
    store::{InventoryRow, ProductRow, Session},
    types::ProductModelId,
};
use serde::Serialize;
use std::io::Write;

pub const FILE_NAME: &str = "inventory_by_product_model.csv";
pub const HEADER: [&str; 2] = ["productmodelid", "quantity"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelQuantity {
    pub product_model_id: Option<ProductModelId>,
    pub quantity: i64,
}

/// Join inventory to products and sum quantity per model. Products without
/// a model form their own group, listed last.
pub fn inventory_by_product_model(
    products: &[ProductRow],
    inventory: &[InventoryRow],
) -> Vec<ModelQuantity> {
    let joined = hash_join(inventory, products, |i| i.product_id, |p| p.product_id);
    let totals = group_sum(joined, |(_, p)| p.product_model_id, |(i, _)| i.quantity);
    nulls_last(totals)
        .into_iter()
        .map(|(product_model_id, quantity)| ModelQuantity {
            product_model_id,
            quantity,
        })
        .collect()
}

pub struct InventoryByModel;

impl Report for InventoryByModel {
    fn name(&self) -> &'static str {
        "inventory_by_product_model"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn run(&self, session: &mut Session, out: &mut dyn Write) -> ReportResult<ReportStats> {
        let products = session.products()?;
        let inventory = session.inventory()?;
        let rows = inventory_by_product_model(&products, &inventory);
        Ok(ReportStats {
            rows_written: write_rows(&HEADER, &rows, out)?,
            rows_skipped: 0,
        })
    }
}
