//! Receipt data models produced by the parsing core.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured data recovered from one OCR'd receipt.
///
/// Every field except the merchant name and the raw text is optional:
/// a receipt with no recognizable amount or date still parses. The
/// raw OCR text is preserved for audit and downstream classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Merchant/store name. Never empty; falls back to
    /// [`UNKNOWN_MERCHANT`](crate::receipt::rules::merchant::UNKNOWN_MERCHANT)
    /// when no heuristic matches.
    pub merchant_name: String,

    /// Total amount, absent when no confident match was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// Subtotal (小計). Independent of the total; may be present
    /// without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_amount: Option<Decimal>,

    /// Purchase date, absent when no confident match was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,

    /// The original OCR text.
    pub raw_text: String,
}

/// Spending category assigned to a receipt.
///
/// A closed set; exactly one value is assigned per parse, with
/// [`Category::Other`] as the default when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Restaurants, cafes, food stalls (餐飲).
    Food,
    /// Supermarkets and convenience stores (超市/便利商店).
    Grocery,
    /// Transit, taxis, parking (交通).
    Transport,
    /// Department stores, apparel (購物).
    Shopping,
    /// Cinema, KTV, gyms (娛樂).
    Entertainment,
    /// Hospitals, clinics, pharmacies (醫療).
    Medical,
    /// Default when no rule matches (其他).
    Other,
}

impl Category {
    /// Traditional-Chinese display label, as shown in the original
    /// product's UI.
    pub fn zh_label(&self) -> &'static str {
        match self {
            Category::Food => "餐飲",
            Category::Grocery => "超市/便利商店",
            Category::Transport => "交通",
            Category::Shopping => "購物",
            Category::Entertainment => "娛樂",
            Category::Medical => "醫療",
            Category::Other => "其他",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Food => "Food",
            Category::Grocery => "Grocery",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Medical => "Medical",
            Category::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Collaborator-side record built around a parse result.
///
/// The parsing core never persists bills; the caller decides whether
/// and how to store them. This type only fixes the shape: identifier,
/// creation timestamp and category around the parsed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Record identifier, assigned at construction.
    pub id: Uuid,

    /// Merchant/store name.
    pub merchant_name: String,

    /// Total amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// Subtotal amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_amount: Option<Decimal>,

    /// Purchase date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,

    /// When this record was created.
    pub created_at: DateTime<Utc>,

    /// Assigned spending category.
    pub category: Category,

    /// The original OCR text.
    pub raw_text: String,
}

impl Bill {
    /// Assemble a fresh record from a parse result and its category.
    pub fn from_receipt(receipt: ParsedReceipt, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            merchant_name: receipt.merchant_name,
            total_amount: receipt.total_amount,
            subtotal_amount: receipt.subtotal_amount,
            purchase_date: receipt.purchase_date,
            created_at: Utc::now(),
            category,
            raw_text: receipt.raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&Category::Grocery).unwrap();
        assert_eq!(json, r#""grocery""#);

        let back: Category = serde_json::from_str(r#""entertainment""#).unwrap();
        assert_eq!(back, Category::Entertainment);
    }

    #[test]
    fn test_parsed_receipt_omits_absent_fields() {
        let receipt = ParsedReceipt {
            merchant_name: "7-ELEVEN".to_string(),
            total_amount: Some(Decimal::from_str("180").unwrap()),
            subtotal_amount: None,
            purchase_date: None,
            raw_text: "7-ELEVEN\n總計: 180".to_string(),
        };

        let json = serde_json::to_string(&receipt).unwrap();
        assert!(json.contains("total_amount"));
        assert!(!json.contains("subtotal_amount"));
        assert!(!json.contains("purchase_date"));
    }

    #[test]
    fn test_bill_carries_receipt_fields() {
        let receipt = ParsedReceipt {
            merchant_name: "全聯福利中心".to_string(),
            total_amount: Some(Decimal::from_str("512").unwrap()),
            subtotal_amount: Some(Decimal::from_str("488").unwrap()),
            purchase_date: NaiveDate::from_ymd_opt(2026, 2, 12),
            raw_text: "全聯福利中心".to_string(),
        };

        let bill = Bill::from_receipt(receipt.clone(), Category::Grocery);
        assert_eq!(bill.merchant_name, receipt.merchant_name);
        assert_eq!(bill.total_amount, receipt.total_amount);
        assert_eq!(bill.subtotal_amount, receipt.subtotal_amount);
        assert_eq!(bill.purchase_date, receipt.purchase_date);
        assert_eq!(bill.category, Category::Grocery);
    }
}
