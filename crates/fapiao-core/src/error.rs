//! Error types for the fapiao-core library.
//!
//! The parsing core never fails for data-quality reasons: a receipt
//! with no recognizable amount, date or merchant still parses. The
//! only fallible surface is the optional model-backed expense
//! classifier, which may simply not be configured.

use thiserror::Error;

/// Errors raised by a model-backed expense classifier.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// No classification model has been configured.
    #[error("expense model is not configured")]
    ModelUnavailable,

    /// The configured model failed to produce a prediction.
    #[error("prediction failed: {0}")]
    Prediction(String),
}
