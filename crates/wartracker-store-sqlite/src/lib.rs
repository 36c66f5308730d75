//! Read-only SQLite backend for War Tracker reports.
//!
//! Every report opens its own read-only connection through [`DbConn`], runs on
//! a [`tokio_rusqlite`] background thread, and closes the connection before
//! returning.

mod conn;
mod materialize;
mod options;
mod store;

pub mod error;

pub use conn::DbConn;
pub use error::{Error, Result};
pub use materialize::materialize;
pub use options::{load_dimension, load_distinct, load_options};
pub use store::SqliteReports;
