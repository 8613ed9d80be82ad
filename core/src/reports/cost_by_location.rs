//! Standard cost of the stock held at each location.

use super::{Report, ReportStats};
use crate::{
    error::ReportResult,
    output::write_rows,
    relational::{group_sum, hash_join, nulls_last},
    store::{InventoryRow, ProductRow, Session},
    types::LocationId,
};
use serde::Serialize;
use std::io::Write;

pub const FILE_NAME: &str = "total_cost_by_location.csv";
pub const HEADER: [&str; 2] = ["locationid", "totalcost"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationCost {
    pub location_id: Option<LocationId>,
    pub total_cost: f64,
}

/// `quantity * standardcost` per inventory row, summed per location.
pub fn cost_per_location(products: &[ProductRow], inventory: &[InventoryRow]) -> Vec<LocationCost> {
    let joined = hash_join(inventory, products, |i| i.product_id, |p| p.product_id);
    let totals = group_sum(
        joined,
        |(i, _)| i.location_id,
        |(i, p)| i.quantity as f64 * p.standard_cost,
    );
    nulls_last(totals)
        .into_iter()
        .map(|(location_id, total_cost)| LocationCost {
            location_id,
            total_cost,
        })
        .collect()
}

pub struct CostByLocation;

impl Report for CostByLocation {
    fn name(&self) -> &'static str {
        "total_cost_by_location"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn run(&self, session: &mut Session, out: &mut dyn Write) -> ReportResult<ReportStats> {
        let products = session.products()?;
        let inventory = session.inventory()?;
        let rows = cost_per_location(&products, &inventory);
        Ok(ReportStats {
            rows_written: write_rows(&HEADER, &rows, out)?,
            rows_skipped: 0,
        })
    }
}
