//! Amount extraction for Taiwanese receipts.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{BARE_DECIMAL, CURRENCY_AMOUNT, LABELED_AMOUNT};
use super::FieldExtractor;

/// Subtotal label on Taiwanese receipts; every other label marks a
/// total.
const SUBTOTAL_LABEL: &str = "小計";

/// Amounts outside the open interval (0, 1 000 000) are treated as
/// OCR false positives and discarded.
const MAX_AMOUNT: i64 = 1_000_000;

/// Monetary amounts recovered from one receipt.
///
/// Both fields are independent; a subtotal may be present without a
/// total. Zero matches is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptAmounts {
    /// Total amount (總計/合計/金額/Total/Amount).
    pub total: Option<Decimal>,
    /// Subtotal amount (小計).
    pub subtotal: Option<Decimal>,
}

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the total and subtotal from receipt text.
    ///
    /// Labeled matches are scanned in document order and later
    /// occurrences overwrite earlier ones; receipts often restate the
    /// total near the bottom. When no labeled match exists at all,
    /// fallback pattern families are tried in priority order
    /// (currency-prefixed numbers, then bare two-decimal numbers) and
    /// the first accepted value becomes the total.
    pub fn extract_amounts(&self, text: &str) -> ReceiptAmounts {
        let mut result = ReceiptAmounts::default();

        for caps in LABELED_AMOUNT.captures_iter(text) {
            let Some(value) = parse_amount(&caps[2]) else {
                continue;
            };
            if &caps[1] == SUBTOTAL_LABEL {
                result.subtotal = Some(value);
            } else {
                result.total = Some(value);
            }
        }

        if result.total.is_none() && result.subtotal.is_none() {
            for pattern in [&*CURRENCY_AMOUNT, &*BARE_DECIMAL] {
                if let Some(value) = pattern
                    .captures_iter(text)
                    .find_map(|caps| parse_amount(&caps[1]))
                {
                    result.total = Some(value);
                    break;
                }
            }
        }

        result
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// All accepted labeled amounts in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        LABELED_AMOUNT
            .captures_iter(text)
            .filter_map(|caps| parse_amount(&caps[2]))
            .collect()
    }
}

/// Extract amounts from receipt text.
pub fn extract_amounts(text: &str) -> ReceiptAmounts {
    AmountExtractor::new().extract_amounts(text)
}

/// Parse a numeric literal with optional thousands separators.
///
/// Returns `None` for unparseable input and for values outside the
/// open interval (0, 1 000 000).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let value = Decimal::from_str(&s.replace(',', "")).ok()?;
    if value > Decimal::ZERO && value < Decimal::from(MAX_AMOUNT) {
        Some(value)
    } else {
        None
    }
}
