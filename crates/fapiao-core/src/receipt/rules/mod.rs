//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod merchant;
pub mod patterns;

pub use amounts::{extract_amounts, parse_amount, AmountExtractor, ReceiptAmounts};
pub use category::{CategoryClassifier, CATEGORY_RULES};
pub use dates::DateExtractor;
pub use merchant::{MerchantExtractor, MerchantPolicy, UNKNOWN_MERCHANT};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
