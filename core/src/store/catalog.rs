use super::{InventoryRow, ProductRow, Session};
use crate::error::ReportResult;

impl Session {
    // ── Product ───────────────────────────────────────────────────

    pub fn products(&mut self) -> ReportResult<Vec<ProductRow>> {
        let sql = format!(
            "SELECT productid, productmodelid,
                    CAST(standardcost AS DOUBLE PRECISION) AS standardcost
             FROM {}",
            self.qualified("product")
        );
        let table = self.run_query(&sql)?;
        let (id, model, cost) = (
            table.column("productid")?,
            table.column("productmodelid")?,
            table.column("standardcost")?,
        );
        table
            .rows()
            .map(|row| {
                Ok(ProductRow {
                    product_id: row[id].as_i64("productid")?,
                    product_model_id: row[model].as_opt_i64("productmodelid")?,
                    standard_cost: row[cost].as_f64("standardcost")?,
                })
            })
            .collect()
    }

    // ── Inventory ─────────────────────────────────────────────────

    pub fn inventory(&mut self) -> ReportResult<Vec<InventoryRow>> {
        let sql = format!(
            "SELECT productid, locationid, quantity FROM {}",
            self.qualified("productinventory")
        );
        let table = self.run_query(&sql)?;
        let (id, location, qty) = (
            table.column("productid")?,
            table.column("locationid")?,
            table.column("quantity")?,
        );
        table
            .rows()
            .map(|row| {
                Ok(InventoryRow {
                    product_id: row[id].as_i64("productid")?,
                    location_id: row[location].as_opt_i64("locationid")?,
                    quantity: row[qty].as_i64("quantity")?,
                })
            })
            .collect()
    }
}
