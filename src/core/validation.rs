use log::debug;
use serde_json::Value;

use super::error::{FacturaError, ValidationError};
use super::header::validate_header;
use super::items::validate_items;
use super::numeric::parse_value;
use super::reconcile::reconcile_total;
use super::types::{HeaderField, InvoiceRecord, ValidationResult};

/// Validate an invoice record against all header, line item and
/// reconciliation rules.
///
/// Validation is exhaustive: every violation found becomes one error, in
/// the order header, items, reconciliation. The result is `Compliant` only
/// when no error was found.
pub fn validate_invoice(record: &InvoiceRecord) -> ValidationResult {
    let mut errors: Vec<ValidationError> = Vec::new();

    let header_errors = validate_header(&record.header);
    debug!("header rules: {} error(s)", header_errors.len());
    errors.extend(header_errors);

    let currency = record.header.get(HeaderField::Currency);
    let declared_total = record
        .header
        .get(HeaderField::TotalInvoiceValue)
        .and_then(parse_value);

    let items = validate_items(&record.items, currency);
    debug!(
        "line item rules: {} item(s), {} error(s), sum {:?}",
        record.items.len(),
        items.errors.len(),
        items.sum
    );
    if !items.estimated.is_empty() {
        debug!(
            "items {:?} contributed quantity × unit price instead of their subtotal",
            items.estimated
        );
    }
    errors.extend(items.errors);

    match reconcile_total(items.sum, declared_total) {
        Some(error) => {
            debug!("reconciliation failed against total {:?}", declared_total);
            errors.push(error);
        }
        None if declared_total.is_none() => debug!("reconciliation skipped: no numeric total"),
        None => {}
    }

    ValidationResult::from_errors(errors)
}

/// Build a record from parsed JSON and validate it.
pub fn validate_value(data: &Value) -> Result<ValidationResult, FacturaError> {
    Ok(validate_invoice(&InvoiceRecord::from_value(data)?))
}

/// Parse JSON bytes, build a record and validate it.
pub fn validate_json_slice(bytes: &[u8]) -> Result<ValidationResult, FacturaError> {
    Ok(validate_invoice(&InvoiceRecord::from_json_slice(bytes)?))
}
