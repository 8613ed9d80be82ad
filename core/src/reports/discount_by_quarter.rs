//! Discount given on sales, per product, purchase size and calendar quarter.
//!
//! Each sale is priced with the list price in force on its transaction date
//! (see `pricing`). Its discount is `(listprice - actualcost) * quantity`.
//! Discounts are summed per (product, multi-item flag, quarter). Sales with
//! no list price on their date are left out and counted.

use super::{Report, ReportStats};
use crate::{
    error::ReportResult,
    output::write_rows,
    pricing::{align, PriceTimeline},
    relational::group_sum,
    store::{ListPriceRow, SaleRow, Session},
    types::ProductId,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

pub const FILE_NAME: &str = "total_prouct_discount_by_quarter.csv";
pub const HEADER: [&str; 4] = ["productid", "multiitem", "transactiondate", "totaldiscount"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterDiscount {
    pub product_id: ProductId,
    #[serde(serialize_with = "crate::output::title_case_bool")]
    pub multi_item: bool,
    /// Last day of the quarter.
    pub quarter_end: NaiveDate,
    pub total_discount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountSummary {
    pub rows: Vec<QuarterDiscount>,
    pub unpriced_sales: usize,
}

pub fn discount_by_quarter(sales: &[SaleRow], history: &[ListPriceRow]) -> DiscountSummary {
    let timeline = PriceTimeline::from_history(history);
    let alignment = align(sales, &timeline);

    let totals = group_sum(
        &alignment.priced,
        |s| (s.product_id, s.multi_item, s.quarter()),
        |s| s.total_discount(),
    );
    let rows = totals
        .into_iter()
        .map(|((product_id, multi_item, quarter), total_discount)| QuarterDiscount {
            product_id,
            multi_item,
            quarter_end: quarter.end_date(),
            total_discount,
        })
        .collect();

    DiscountSummary {
        rows,
        unpriced_sales: alignment.unpriced.len(),
    }
}

pub struct DiscountByQuarter;

impl Report for DiscountByQuarter {
    fn name(&self) -> &'static str {
        "discount_by_quarter"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn run(&self, session: &mut Session, out: &mut dyn Write) -> ReportResult<ReportStats> {
        let sales = session.sales()?;
        let history = session.list_prices()?;
        log::debug!(
            "discount: {} sales, {} list price entries",
            sales.len(),
            history.len()
        );

        let summary = discount_by_quarter(&sales, &history);
        if summary.unpriced_sales > 0 {
            log::warn!(
                "discount: {} of {} sales have no list price on their date; left out of totals",
                summary.unpriced_sales,
                sales.len()
            );
        }
        Ok(ReportStats {
            rows_written: write_rows(&HEADER, &summary.rows, out)?,
            rows_skipped: summary.unpriced_sales,
        })
    }
}
