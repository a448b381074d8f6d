//! Database boundary for dbspin.
//!
//! Opens driver connections against the provisioned container, creates the
//! demonstration database, and runs the fixed schema/DML demonstration:
//! one two-column table, two inserted rows, one ordered select-all.

pub mod dialect;

mod client;

pub use client::{DbError, DbResult, DemoRow, dial, render_rows, run_demo};
