//! Common regex patterns for Taiwanese receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled amounts: "總計: NT$ 1,234.56", "Total 180", "小計 100".
    // The label may be followed by a currency marker and a full-width
    // or ASCII colon in either order.
    pub static ref LABELED_AMOUNT: Regex = Regex::new(
        r"(?i)(total|amount|總計|合計|小計|金額)[\s:：]*(?:NT\$|NTD|\$)?[\s:：]*([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{1,2})?|[0-9]+(?:\.[0-9]{1,2})?)\b"
    ).unwrap();

    // Fallback: currency-prefixed bare number ("NT$1,234.56", "$ 75")
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"(?i)(?:NT\$|NTD|\$)\s*([0-9,]+(?:\.[0-9]{1,2})?)\b"
    ).unwrap();

    // Fallback: bare decimal with exactly two fraction digits
    pub static ref BARE_DECIMAL: Regex = Regex::new(
        r"\b([0-9]+\.[0-9]{2})\b"
    ).unwrap();

    // Gregorian year-month-day: 2024-02-11, 2024/2/11, 2024.02.11
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\b"
    ).unwrap();

    // Minguo (ROC) calendar year-month-day: 113/02/11 is 2024-02-11
    pub static ref DATE_ROC: Regex = Regex::new(
        r"\b(\d{3})[-/.](\d{1,2})[-/.](\d{1,2})\b"
    ).unwrap();

    // Month-day-year: 02/11/2024
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_amount_variants() {
        for text in [
            "總計: 180",
            "總計 NT$ 180",
            "Total: $180",
            "TOTAL 180",
            "合計：1,234.56",
            "金額 180",
        ] {
            assert!(LABELED_AMOUNT.is_match(text), "no match for {text:?}");
        }
    }

    #[test]
    fn test_labeled_amount_captures_label_and_value() {
        let caps = LABELED_AMOUNT.captures("小計 100").unwrap();
        assert_eq!(&caps[1], "小計");
        assert_eq!(&caps[2], "100");
    }

    #[test]
    fn test_roc_date_does_not_match_gregorian_years() {
        assert!(!DATE_ROC.is_match("2024/02/11"));
        assert!(DATE_ROC.is_match("113/02/11"));
    }

    #[test]
    fn test_bare_decimal_requires_two_fraction_digits() {
        assert!(BARE_DECIMAL.is_match("coffee 85.00"));
        assert!(!BARE_DECIMAL.is_match("coffee 85.0"));
        assert!(!BARE_DECIMAL.is_match("coffee 85"));
    }
}
