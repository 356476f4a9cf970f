//! # factura-dian
//!
//! Completeness and arithmetic validation for commercial import invoices
//! (DIAN Colombia, CT-COA-0124 field set).
//!
//! The engine takes one already-parsed invoice record (header fields plus
//! line items) and returns a verdict with a field-level error report. Each
//! error carries a reason and a remediation suggestion. It performs no I/O.
//!
//! Amounts are parsed into [`rust_decimal::Decimal`] — never floating point —
//! accepting both `1.234,56` and `1,234.56` style separators.
//!
//! ## Quick Start
//!
//! ```rust
//! use factura_dian::core::*;
//! use serde_json::json;
//!
//! let record = InvoiceRecord::from_value(&json!({
//!     "Fields": [
//!         {"Field": "Currency", "Valor": "USD"},
//!         {"Field": "TotalInvoiceValue", "Valor": "1.234,56"}
//!     ],
//!     "Items": []
//! }))
//! .unwrap();
//!
//! let result = validate_invoice(&record);
//! assert_eq!(result.status, ComplianceStatus::NonCompliant);
//! assert_eq!(result.errors[0].field, "Exportador - Nombre");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record model, rule sets, validation engine |
//! | `upload` (default) | Per-file upload wrapping with synthetic error reports, report files |
//! | `cli` | `validar-factura` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "upload")]
pub mod files;

#[cfg(feature = "upload")]
pub mod upload;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
