//! Capability seams for platform detectors and the optional expense
//! model.
//!
//! Generic date recognition and organization-name tagging are platform
//! services on the devices this core was written for. They are
//! abstracted behind small traits so the extraction logic stays
//! testable with fakes and degrades silently when a capability is not
//! wired up.

use chrono::NaiveDate;

use crate::error::ClassifyError;
use crate::models::receipt::Category;

/// Locale-aware date recognition over free-form text.
pub trait DateDetector {
    /// All dates mentioned in the text, in document order.
    fn detect_dates(&self, text: &str) -> Vec<NaiveDate>;
}

/// Named-entity recognition restricted to organization names.
pub trait OrganizationDetector {
    /// Organization-tagged spans, in document order.
    fn detect_organizations(&self, text: &str) -> Vec<String>;
}

/// Optional model-backed expense classifier.
///
/// Implementations wrap an external text-classification model. The
/// orchestrator treats any error as "model unavailable" and falls back
/// to the keyword rule table, so implementations are free to fail.
pub trait ExpenseModel {
    /// Predict a category for the given merchant name and receipt text.
    fn classify(&self, merchant_name: &str, text: &str) -> Result<Category, ClassifyError>;
}
