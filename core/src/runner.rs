//! The report runner: query, transform, write.
//!
//! EXECUTION ORDER (fixed):
//!   1. Inventory by product model
//!   2. Total cost by location
//!   3. Discount by quarter
//!
//! RULES:
//!   - Reports run one at a time, in registration order.
//!   - Each report gets its own session, released when the report returns.
//!   - The first report error stops the run; earlier output files stay.
//!   - A report's file is only replaced once the report has succeeded.

use crate::{
    config::{Credentials, Dialect, SourceConfig},
    error::{ConnectError, ReportResult},
    reports::{standard_reports, Report},
    store::Database,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Build the typed source config from a credentials section and open it.
///
/// Failure here is the recoverable tier: callers log it and skip the run.
pub fn connect(dialect: Dialect, creds: &Credentials) -> Result<Database, ConnectError> {
    let config = SourceConfig::from_credentials(dialect, creds)?;
    Database::open(&config)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub report: &'static str,
    pub path: PathBuf,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub reports: Vec<ReportOutcome>,
}

pub struct ReportRunner {
    out_dir: PathBuf,
    reports: Vec<Box<dyn Report>>,
}

impl ReportRunner {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            reports: Vec::new(),
        }
    }

    /// Runner with every built-in report registered.
    pub fn standard(out_dir: impl Into<PathBuf>) -> Self {
        let mut runner = Self::new(out_dir);
        for report in standard_reports() {
            runner.register(report);
        }
        runner
    }

    pub fn register(&mut self, report: Box<dyn Report>) {
        self.reports.push(report);
    }

    /// Keep only the named reports, preserving execution order.
    pub fn retain(&mut self, names: &[String]) {
        self.reports.retain(|r| names.iter().any(|n| n == r.name()));
    }

    pub fn report_names(&self) -> Vec<&'static str> {
        self.reports.iter().map(|r| r.name()).collect()
    }

    pub fn run(&self, db: &Database) -> ReportResult<RunSummary> {
        let mut summary = RunSummary::default();
        for report in &self.reports {
            summary.reports.push(self.run_one(report.as_ref(), db)?);
        }
        Ok(summary)
    }

    fn run_one(&self, report: &dyn Report, db: &Database) -> ReportResult<ReportOutcome> {
        let path = self.out_dir.join(report.file_name());
        let mut session = db.session()?;
        // Output is buffered so a failing report leaves the previous file in place.
        let mut buf = Vec::new();
        let stats = report.run(&mut session, &mut buf)?;
        fs::write(&path, buf)?;

        log::info!(
            "{}: wrote {} rows to {}",
            report.name(),
            stats.rows_written,
            path.display()
        );
        Ok(ReportOutcome {
            report: report.name(),
            path,
            rows_written: stats.rows_written,
            rows_skipped: stats.rows_skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order_is_fixed() {
        let runner = ReportRunner::standard("out");
        assert_eq!(
            runner.report_names(),
            vec![
                "inventory_by_product_model",
                "total_cost_by_location",
                "discount_by_quarter"
            ]
        );
    }

    #[test]
    fn retain_keeps_execution_order() {
        let mut runner = ReportRunner::standard("out");
        runner.retain(&["discount_by_quarter".into(), "inventory_by_product_model".into()]);
        assert_eq!(
            runner.report_names(),
            vec!["inventory_by_product_model", "discount_by_quarter"]
        );
    }
}
