//! Inventory, cost and discount reports over the AdventureWorks
//! production schema.
//!
//! Rows are read from PostgreSQL or SQLite, joined and aggregated in
//! memory, and written as CSV files.

pub mod config;
pub mod error;
pub mod output;
pub mod pricing;
pub mod quarter;
pub mod relational;
pub mod reports;
pub mod runner;
pub mod store;
pub mod table;
pub mod types;
