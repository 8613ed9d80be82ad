use super::{ListPriceRow, SaleRow, Session};
use crate::error::ReportResult;

impl Session {
    /// Sales transactions ordered by product, then date.
    pub fn sales(&mut self) -> ReportResult<Vec<SaleRow>> {
        let sql = format!(
            "SELECT productid, transactiondate, quantity,
                    CAST(actualcost AS DOUBLE PRECISION) AS actualcost
             FROM {}
             WHERE transactiontype = 'S'
             ORDER BY productid, transactiondate",
            self.qualified("transactionhistory")
        );
        let table = self.run_query(&sql)?;
        let (id, date, qty, cost) = (
            table.column("productid")?,
            table.column("transactiondate")?,
            table.column("quantity")?,
            table.column("actualcost")?,
        );
        table
            .rows()
            .map(|row| {
                Ok(SaleRow {
                    product_id: row[id].as_i64("productid")?,
                    transaction_date: row[date].as_timestamp("transactiondate")?,
                    quantity: row[qty].as_i64("quantity")?,
                    actual_cost: row[cost].as_f64("actualcost")?,
                })
            })
            .collect()
    }

    /// List price history ordered by product, then start date.
    pub fn list_prices(&mut self) -> ReportResult<Vec<ListPriceRow>> {
        let sql = format!(
            "SELECT productid, startdate,
                    CAST(listprice AS DOUBLE PRECISION) AS listprice
             FROM {}
             ORDER BY productid, startdate",
            self.qualified("productlistpricehistory")
        );
        let table = self.run_query(&sql)?;
        let (id, start, price) = (
            table.column("productid")?,
            table.column("startdate")?,
            table.column("listprice")?,
        );
        table
            .rows()
            .map(|row| {
                Ok(ListPriceRow {
                    product_id: row[id].as_i64("productid")?,
                    start_date: row[start].as_timestamp("startdate")?,
                    list_price: row[price].as_f64("listprice")?,
                })
            })
            .collect()
    }
}
