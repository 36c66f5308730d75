//! Core types and query builders for the War Tracker reporting back end.
//!
//! This crate is deliberately free of HTTP and database dependencies. It turns
//! structured filter selections into SQL text, merges day-over-day result
//! tables, and defines the [`ReportSource`](store::ReportSource) seam that
//! storage backends implement.

pub mod compare;
pub mod dimension;
pub mod error;
pub mod filter;
pub mod query;
pub mod result;
pub mod store;

pub use error::{Error, ErrorKind, Result};
