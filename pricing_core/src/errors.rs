//! # Error Types
//!
//! Structured error types for pricing_core. Every failure that can reach the
//! calculator preview is one of these variants, so a front end can decide
//! whether to show the message, swallow it, or clear the preview.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_quantity(quantity: u32) -> QuoteResult<()> {
//!     if quantity == 0 {
//!         return Err(QuoteError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be at least 1",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pricing_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Message shown when the pricing service cannot be reached.
pub const TRANSPORT_ERROR_MESSAGE: &str = "No se pudo calcular el precio. Intente nuevamente.";

/// Structured error type for pricing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (non-positive dimension, zero quantity, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The family/thickness/finish/color combination is not sold
    #[error("Invalid combination: {combination} - {reason}")]
    InvalidCombination { combination: String, reason: String },

    /// The catalog has no price for the requested glass
    #[error("No catalog price for {key}")]
    CatalogEntryNotFound { key: String },

    /// The pricing service answered with an error payload
    #[error("Pricing service rejected the request ({status}): {message}")]
    PricingRejected { status: u16, message: String },

    /// The pricing service could not be reached
    #[error("Transport error: {reason}")]
    Transport { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        QuoteError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidCombination error
    pub fn invalid_combination(combination: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidCombination {
            combination: combination.into(),
            reason: reason.into(),
        }
    }

    /// Create a CatalogEntryNotFound error
    pub fn catalog_entry_not_found(key: impl Into<String>) -> Self {
        QuoteError::CatalogEntryNotFound { key: key.into() }
    }

    /// Create a PricingRejected error
    pub fn pricing_rejected(status: u16, message: impl Into<String>) -> Self {
        QuoteError::PricingRejected {
            status,
            message: message.into(),
        }
    }

    /// Create a Transport error
    pub fn transport(reason: impl Into<String>) -> Self {
        QuoteError::Transport {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        QuoteError::ConfigError {
            reason: reason.into(),
        }
    }

    /// Input-state errors never reach the user; the preview is just cleared.
    pub fn is_silent(&self) -> bool {
        matches!(self, QuoteError::InvalidInput { .. } | QuoteError::MissingField { .. })
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuoteError::Transport { .. })
    }

    /// Message for the calculator preview.
    ///
    /// Service rejections surface their payload text, transport failures a
    /// generic message, everything else its display form.
    pub fn user_message(&self) -> String {
        match self {
            QuoteError::PricingRejected { message, .. } => message.clone(),
            QuoteError::Transport { .. } => TRANSPORT_ERROR_MESSAGE.to_string(),
            QuoteError::InvalidCombination { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::MissingField { .. } => "MISSING_FIELD",
            QuoteError::InvalidCombination { .. } => "INVALID_COMBINATION",
            QuoteError::CatalogEntryNotFound { .. } => "CATALOG_ENTRY_NOT_FOUND",
            QuoteError::PricingRejected { .. } => "PRICING_REJECTED",
            QuoteError::Transport { .. } => "TRANSPORT_ERROR",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::VersionMismatch { .. } => "VERSION_MISMATCH",
            QuoteError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::invalid_combination(
            "PLANO 2mm POLARIZADO",
            "Polarizado requiere 4mm o más",
        );
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidCombination\""));
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(QuoteError::missing_field("family").error_code(), "MISSING_FIELD");
        assert_eq!(QuoteError::transport("timeout").error_code(), "TRANSPORT_ERROR");
        assert_eq!(
            QuoteError::catalog_entry_not_found("PLANO/6").error_code(),
            "CATALOG_ENTRY_NOT_FOUND"
        );
    }

    #[test]
    fn test_user_messages() {
        let rejected = QuoteError::pricing_rejected(422, "Espesor no disponible");
        assert_eq!(rejected.user_message(), "Espesor no disponible");

        let transport = QuoteError::transport("connection refused");
        assert_eq!(transport.user_message(), TRANSPORT_ERROR_MESSAGE);
        assert!(transport.is_recoverable());
    }

    #[test]
    fn test_silent_errors() {
        assert!(QuoteError::invalid_input("width_cm", "0", "must be positive").is_silent());
        assert!(!QuoteError::pricing_rejected(400, "bad").is_silent());
    }
}
