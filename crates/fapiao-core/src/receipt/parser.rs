//! Receipt parser combining the rule-based extractors with optional
//! platform capabilities.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::classify::{DateDetector, ExpenseModel, OrganizationDetector};
use crate::models::receipt::{Bill, Category, ParsedReceipt};

use super::rules::{
    amounts::extract_amounts,
    category::CategoryClassifier,
    dates::DateExtractor,
    merchant::{MerchantExtractor, MerchantPolicy},
    FieldExtractor,
};

/// Receipt parser.
///
/// Composes the amount, date and merchant extractors and the category
/// rules into one parse operation. [`parse`](Self::parse) is a pure
/// function of the input text and the configured reference date: the
/// extractors share no state and never fail for data-quality reasons,
/// so the same text always yields the same record.
pub struct ReceiptParser {
    reference_date: NaiveDate,
    merchant_policy: MerchantPolicy,
    date_detector: Option<Box<dyn DateDetector>>,
    organization_detector: Option<Box<dyn OrganizationDetector>>,
    expense_model: Option<Box<dyn ExpenseModel>>,
    classifier: CategoryClassifier,
}

impl ReceiptParser {
    /// Create a parser with default settings: today's date as the
    /// reference, entity-first merchant policy, no platform detectors
    /// and no expense model.
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
            merchant_policy: MerchantPolicy::default(),
            date_detector: None,
            organization_detector: None,
            expense_model: None,
            classifier: CategoryClassifier::new(),
        }
    }

    /// Pin the date used for "never later than now" and closest-date
    /// selection. Tests rely on this to stay deterministic.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Set the merchant extraction policy.
    pub fn with_merchant_policy(mut self, policy: MerchantPolicy) -> Self {
        self.merchant_policy = policy;
        self
    }

    /// Attach a generic date-recognition capability.
    pub fn with_date_detector(mut self, detector: impl DateDetector + 'static) -> Self {
        self.date_detector = Some(Box::new(detector));
        self
    }

    /// Attach a named-entity recognition capability.
    pub fn with_organization_detector(
        mut self,
        detector: impl OrganizationDetector + 'static,
    ) -> Self {
        self.organization_detector = Some(Box::new(detector));
        self
    }

    /// Attach a model-backed expense classifier. Its failures are
    /// mapped to the rule table, never propagated.
    pub fn with_expense_model(mut self, model: impl ExpenseModel + 'static) -> Self {
        self.expense_model = Some(Box::new(model));
        self
    }

    /// Parse OCR text into a structured receipt.
    ///
    /// The three extractors run independently; absence of an amount or
    /// date is a normal outcome, and the merchant name falls back to a
    /// sentinel rather than going missing.
    pub fn parse(&self, text: &str) -> ParsedReceipt {
        debug!("parsing receipt from {} characters of text", text.len());

        let amounts = extract_amounts(text);

        let mut date_extractor = DateExtractor::new(self.reference_date);
        if let Some(detector) = self.date_detector.as_deref() {
            date_extractor = date_extractor.with_detector(detector);
        }
        let purchase_date = date_extractor.extract(text);

        let mut merchant_extractor = MerchantExtractor::new(self.merchant_policy);
        if let Some(detector) = self.organization_detector.as_deref() {
            merchant_extractor = merchant_extractor.with_detector(detector);
        }
        let merchant_name = merchant_extractor.extract(text);

        debug!(
            "extracted merchant {:?}, total {:?}, subtotal {:?}, date {:?}",
            merchant_name, amounts.total, amounts.subtotal, purchase_date
        );

        ParsedReceipt {
            merchant_name,
            total_amount: amounts.total,
            subtotal_amount: amounts.subtotal,
            purchase_date,
            raw_text: text.to_string(),
        }
    }

    /// Assign a spending category to a parsed receipt.
    ///
    /// The model-backed classifier runs first when one is attached;
    /// any failure (typically an unconfigured model) degrades to the
    /// keyword rule table.
    pub fn categorize(&self, receipt: &ParsedReceipt) -> Category {
        if let Some(model) = self.expense_model.as_deref() {
            match model.classify(&receipt.merchant_name, &receipt.raw_text) {
                Ok(category) => return category,
                Err(err) => {
                    debug!("expense model failed ({err}), using keyword rules");
                }
            }
        }

        self.classifier
            .classify(&receipt.merchant_name, &receipt.raw_text)
    }

    /// Parse and categorize in one step, producing the
    /// collaborator-side record.
    pub fn parse_to_bill(&self, text: &str) -> Bill {
        let receipt = self.parse(text);
        let category = self.categorize(&receipt);
        Bill::from_receipt(receipt, category)
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifyError;
    use crate::receipt::rules::UNKNOWN_MERCHANT;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parser() -> ReceiptParser {
        ReceiptParser::new().with_reference_date(ymd(2026, 8, 31))
    }

    struct FakeOrgDetector(Vec<String>);

    impl OrganizationDetector for FakeOrgDetector {
        fn detect_organizations(&self, _text: &str) -> Vec<String> {
            self.0.clone()
        }
    }

    struct FixedModel(Category);

    impl ExpenseModel for FixedModel {
        fn classify(&self, _merchant_name: &str, _text: &str) -> Result<Category, ClassifyError> {
            Ok(self.0)
        }
    }

    struct UnconfiguredModel;

    impl ExpenseModel for UnconfiguredModel {
        fn classify(&self, _merchant_name: &str, _text: &str) -> Result<Category, ClassifyError> {
            Err(ClassifyError::ModelUnavailable)
        }
    }

    #[test]
    fn test_convenience_store_receipt() {
        let parser = parser().with_merchant_policy(MerchantPolicy::FirstLine);
        let receipt = parser.parse("7-ELEVEN\n總計: 180\n日期: 2026/02/12");

        assert_eq!(receipt.merchant_name, "7-ELEVEN");
        assert_eq!(receipt.total_amount, Some(Decimal::from_str("180").unwrap()));
        assert_eq!(receipt.subtotal_amount, None);
        assert_eq!(receipt.purchase_date, Some(ymd(2026, 2, 12)));
        assert_eq!(parser.categorize(&receipt), Category::Grocery);
    }

    #[test]
    fn test_empty_text_still_parses() {
        let receipt = parser().parse("");
        assert_eq!(receipt.merchant_name, UNKNOWN_MERCHANT);
        assert_eq!(receipt.total_amount, None);
        assert_eq!(receipt.subtotal_amount, None);
        assert_eq!(receipt.purchase_date, None);
        assert_eq!(receipt.raw_text, "");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = parser();
        let text = "星巴克咖啡\n小計 100\n總計 120\n113/02/11";
        assert_eq!(parser.parse(text), parser.parse(text));
    }

    #[test]
    fn test_subtotal_and_total_with_minguo_date() {
        let receipt = parser().parse("星巴克咖啡\n小計 100\n總計 120\n113/02/11");
        assert_eq!(receipt.subtotal_amount, Some(Decimal::from_str("100").unwrap()));
        assert_eq!(receipt.total_amount, Some(Decimal::from_str("120").unwrap()));
        assert_eq!(receipt.purchase_date, Some(ymd(2024, 2, 11)));
    }

    #[test]
    fn test_organization_detector_names_merchant() {
        let parser = parser()
            .with_organization_detector(FakeOrgDetector(vec!["家樂福股份有限公司".to_string()]));
        let receipt = parser.parse("2026/01/05\n家樂福股份有限公司\n總計 500");
        assert_eq!(receipt.merchant_name, "家樂福股份有限公司");
    }

    #[test]
    fn test_expense_model_overrides_rules() {
        let parser = parser().with_expense_model(FixedModel(Category::Entertainment));
        let receipt = parser.parse("7-ELEVEN\n總計 180");
        // Keyword rules would say Grocery; the model wins.
        assert_eq!(parser.categorize(&receipt), Category::Entertainment);
    }

    #[test]
    fn test_unconfigured_model_degrades_to_rules() {
        let parser = parser().with_expense_model(UnconfiguredModel);
        let receipt = parser.parse("7-ELEVEN\n總計 180");
        assert_eq!(parser.categorize(&receipt), Category::Grocery);
    }

    #[test]
    fn test_categorization_is_total() {
        let parser = parser();
        let receipt = parser.parse("無名小店");
        assert_eq!(parser.categorize(&receipt), Category::Other);
    }

    #[test]
    fn test_parse_to_bill() {
        let parser = parser().with_merchant_policy(MerchantPolicy::FirstLine);
        let bill = parser.parse_to_bill("7-ELEVEN\n總計: 180\n日期: 2026/02/12");

        assert_eq!(bill.merchant_name, "7-ELEVEN");
        assert_eq!(bill.total_amount, Some(Decimal::from_str("180").unwrap()));
        assert_eq!(bill.purchase_date, Some(ymd(2026, 2, 12)));
        assert_eq!(bill.category, Category::Grocery);
        assert_eq!(bill.raw_text, "7-ELEVEN\n總計: 180\n日期: 2026/02/12");
    }
}
