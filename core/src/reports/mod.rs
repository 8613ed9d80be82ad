//! Report trait and the three built-in reports.
//!
//! RULE: A report reads everything it needs through the `Session` it is
//! handed, computes in memory, and writes exactly one CSV document.

use crate::{error::ReportResult, store::Session};
use std::io::Write;

pub mod cost_by_location;
pub mod discount_by_quarter;
pub mod inventory_by_model;

pub use cost_by_location::CostByLocation;
pub use discount_by_quarter::DiscountByQuarter;
pub use inventory_by_model::InventoryByModel;

/// Row counts from one report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub rows_written: usize,
    /// Source rows left out of the aggregate (e.g. unpriced sales).
    pub rows_skipped: usize,
}

/// The contract every report fulfils.
pub trait Report {
    /// Unique stable name, used to select reports on the command line.
    fn name(&self) -> &'static str;

    /// Output file name, relative to the output directory.
    fn file_name(&self) -> &'static str;

    fn run(&self, session: &mut Session, out: &mut dyn Write) -> ReportResult<ReportStats>;
}

/// All built-in reports, in execution order.
pub fn standard_reports() -> Vec<Box<dyn Report>> {
    vec![
        Box::new(InventoryByModel),
        Box::new(CostByLocation),
        Box::new(DiscountByQuarter),
    ]
}
