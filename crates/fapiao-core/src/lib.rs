//! Core library for Taiwanese receipt parsing.
//!
//! This crate turns unstructured OCR text from a photographed receipt
//! into a structured record and assigns a spending category:
//! - Amount extraction (總計/小計 labels, NT$ markers, fallbacks)
//! - Purchase-date extraction, including Minguo (ROC) calendar years
//! - Merchant-name inference from layout heuristics
//! - Keyword-based spending categories with an optional model seam
//!
//! Image capture, OCR, persistence and UI are external collaborators;
//! the contract here starts once a text string exists. Parsing is a
//! synchronous pure computation and is safe to run concurrently for
//! independent inputs.

pub mod classify;
pub mod error;
pub mod models;
pub mod receipt;

pub use classify::{DateDetector, ExpenseModel, OrganizationDetector};
pub use error::ClassifyError;
pub use models::receipt::{Bill, Category, ParsedReceipt};
pub use receipt::rules::{MerchantPolicy, UNKNOWN_MERCHANT};
pub use receipt::ReceiptParser;
