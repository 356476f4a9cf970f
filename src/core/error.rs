use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur before or around validation.
///
/// Rule violations are never reported through this type; they are collected
/// as [`ValidationError`] values inside a [`ValidationResult`](super::ValidationResult).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// Input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is JSON but does not have the shape of an invoice record.
    #[error("malformed invoice record: {0}")]
    MalformedRecord(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Required field absent or empty.
    MissingField,
    /// Field present but fails its type, pattern or whitelist constraint.
    InvalidFormat,
    /// A derived value disagrees with a declared one beyond tolerance.
    ArithmeticMismatch,
    /// Item currency differs from the invoice currency.
    CurrencyMismatch,
}

/// A single rule violation with a reason and a remediation hint.
///
/// Serializes as `{campo, motivo, sugerencia}`; the kind is kept for callers
/// but is not part of the report format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Human-readable field label, including the product index for items.
    #[serde(rename = "campo")]
    pub field: String,
    /// What is wrong.
    #[serde(rename = "motivo")]
    pub reason: String,
    /// How to fix it.
    #[serde(rename = "sugerencia")]
    pub suggestion: String,
    #[serde(skip, default = "default_kind")]
    pub kind: ErrorKind,
}

fn default_kind() -> ErrorKind {
    ErrorKind::InvalidFormat
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suggestion.is_empty() {
            write!(f, "{}: {}", self.field, self.reason)
        } else {
            write!(
                f,
                "{}: {} Sugerencia: {}",
                self.field, self.reason, self.suggestion
            )
        }
    }
}

impl ValidationError {
    pub fn new(
        kind: ErrorKind,
        field: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            suggestion: suggestion.into(),
            kind,
        }
    }

    /// Required field absent or empty.
    pub fn missing(
        field: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::MissingField, field, reason, suggestion)
    }

    /// Field present but malformed.
    pub fn invalid(
        field: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidFormat, field, reason, suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_suggestion() {
        let e = ValidationError::missing("Moneda", "Falta.", "Agréguela.");
        assert_eq!(e.to_string(), "Moneda: Falta. Sugerencia: Agréguela.");
    }

    #[test]
    fn serializes_with_report_keys_only() {
        let e = ValidationError::invalid("Incoterm", "No reconocido.", "Use FOB.");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "campo": "Incoterm",
                "motivo": "No reconocido.",
                "sugerencia": "Use FOB."
            })
        );
    }
}
