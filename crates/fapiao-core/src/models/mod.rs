//! Data models for parsed receipts.

pub mod receipt;

pub use receipt::{Bill, Category, ParsedReceipt};
